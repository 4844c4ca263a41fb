mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use dangerwrite::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker, WriteEvent},
    session::{next_minutes, prev_minutes, validate_minutes},
    ConfigError, SessionConfig, SessionController, SessionState, Surface,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::{Duration, Instant},
};
use tracing::{info, warn};

const TICK_RATE_MS: u64 = 100;

/// keep typing or lose everything
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A dangerous writing prompt: type continuously until the session ends. Stop typing for too long and your text is erased."
)]
pub struct Cli {
    /// session length in minutes (1, 2, 3, 5, 10, 15, 20, 30 or 60)
    #[clap(short = 'd', long, value_parser = parse_minutes)]
    duration: Option<u32>,

    /// seconds without a keystroke before the text is erased
    #[clap(short = 'i', long, value_parser = clap::value_parser!(u32).range(1..))]
    inactivity_limit: Option<u32>,

    /// remember the given duration and inactivity limit as the new defaults
    #[clap(long)]
    save: bool,
}

fn parse_minutes(s: &str) -> Result<u32, String> {
    let minutes: u32 = s
        .parse()
        .map_err(|_| format!("`{}` is not a whole number of minutes", s))?;
    validate_minutes(minutes).map_err(|e| e.to_string())
}

impl Cli {
    /// Command line values win over the stored defaults
    fn resolve(&self, stored: &Config) -> Result<SessionConfig, ConfigError> {
        SessionConfig::from_minutes(
            self.duration.unwrap_or(stored.duration_minutes),
            self.inactivity_limit
                .unwrap_or(stored.inactivity_limit_secs),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub controller: SessionController<Surface>,
    last_sync: Instant,
}

impl App {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            controller: SessionController::new(config, Surface::new()),
            last_sync: Instant::now(),
        }
    }

    pub fn surface(&self) -> &Surface {
        self.controller.presenter()
    }

    /// Feed real time into the controller's clock
    pub fn sync_clock(&mut self, now: Instant) {
        let delta = now.saturating_duration_since(self.last_sync);
        self.last_sync = now;
        self.controller.advance(delta);
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        if ctrl && key.code == KeyCode::Char('r') {
            self.controller.presenter_mut().dismiss_dialog();
            self.controller.reset();
            return Action::Continue;
        }

        // the dialog is modal until acknowledged
        if self.surface().dialog().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.controller.presenter_mut().dismiss_dialog();
            }
            return Action::Continue;
        }

        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Up => self.cycle_duration(next_minutes),
            KeyCode::Down => self.cycle_duration(prev_minutes),
            KeyCode::Char(c) if !ctrl => {
                self.controller.presenter_mut().insert_char(c);
                self.controller.on_input_event();
            }
            KeyCode::Enter => {
                self.controller.presenter_mut().insert_char('\n');
                self.controller.on_input_event();
            }
            KeyCode::Tab => {
                self.controller.presenter_mut().insert_char('\t');
                self.controller.on_input_event();
            }
            KeyCode::Backspace => {
                self.controller.presenter_mut().backspace();
                self.controller.on_input_event();
            }
            _ => {}
        }
        Action::Continue
    }

    fn cycle_duration(&mut self, step: fn(u32) -> u32) {
        if self.controller.state() != SessionState::Idle {
            return;
        }
        let minutes = step(self.controller.config().duration_minutes());
        if let Err(err) = self.controller.configure(minutes) {
            warn!(%err, "duration change rejected");
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = AppDirs::log_path() {
        logging::init_file_logging(&path);
    }

    let store = FileConfigStore::new();
    let stored = store.load();
    let session_config = match cli.resolve(&stored) {
        Ok(cfg) => cfg,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, err.to_string()).exit();
        }
    };

    if cli.save {
        store.save(&Config::from(&session_config))?;
        info!(path = %store.path().display(), "saved defaults");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session_config);
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        let wait = app
            .controller
            .next_deadline()
            .unwrap_or(Duration::from_millis(TICK_RATE_MS));
        let event = runner.step_within(wait);

        // timers that came due before this event fire first
        app.sync_clock(Instant::now());

        match event {
            WriteEvent::Tick | WriteEvent::Resize => {}
            WriteEvent::Closed => {
                warn!(state = %app.controller.state(), "input source closed");
                break;
            }
            WriteEvent::Key(key) => {
                if app.on_key(key) == Action::Quit {
                    info!(state = %app.controller.state(), "quit");
                    break;
                }
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
