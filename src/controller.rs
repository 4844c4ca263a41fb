use std::time::Duration;

use tracing::{debug, info, trace};

use crate::notification::Notification;
use crate::session::{ConfigError, Progress, SessionConfig, SessionState};
use crate::timer_queue::{Fired, TimerHandle, TimerQueue};

/// Period of both the elapsed and the inactivity timer
pub const TICK: Duration = Duration::from_secs(1);

/// The two independent repeating timers.
///
/// Variant order is the tie-break when both fire at the same instant: the
/// elapsed timer runs first, so a session that reaches its duration succeeds
/// even if the inactivity limit expires in the same second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerKind {
    Elapsed,
    Inactivity,
}

/// Everything the controller reports outward: the progress indicator, the
/// text area and the completion dialogs.
pub trait Presenter {
    fn show_progress(&mut self, progress: Progress);
    fn set_input_enabled(&mut self, enabled: bool);
    fn clear_text(&mut self);
    fn notify(&mut self, notification: Notification);
}

/// Session state machine. Owns the config, both counters and the timers;
/// nothing outside mutates them except through the methods below.
#[derive(Debug)]
pub struct SessionController<P> {
    baseline: SessionConfig,
    config: SessionConfig,
    state: SessionState,
    elapsed_secs: u32,
    inactivity_secs: u32,
    timers: TimerQueue<TimerKind>,
    elapsed_timer: Option<TimerHandle>,
    inactivity_timer: Option<TimerHandle>,
    presenter: P,
}

impl<P: Presenter> SessionController<P> {
    /// `config` also becomes the baseline that [`reset`](Self::reset) restores.
    pub fn new(config: SessionConfig, presenter: P) -> Self {
        let mut controller = Self {
            baseline: config,
            config,
            state: SessionState::Idle,
            elapsed_secs: 0,
            inactivity_secs: 0,
            timers: TimerQueue::new(),
            elapsed_timer: None,
            inactivity_timer: None,
            presenter,
        };
        controller.presenter.set_input_enabled(true);
        controller.report_progress();
        controller
    }

    /// Pick a session length. Only allowed while idle.
    pub fn configure(&mut self, minutes: u32) -> Result<(), ConfigError> {
        if self.state != SessionState::Idle {
            debug!(minutes, state = %self.state, "rejected reconfigure");
            return Err(ConfigError::SessionActive(self.state));
        }
        self.config = self.config.with_minutes(minutes)?;
        info!(minutes, "session length configured");
        self.report_progress();
        Ok(())
    }

    pub fn on_input_event(&mut self) {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Running;
                info!(
                    duration_secs = self.config.duration_secs(),
                    inactivity_limit_secs = self.config.inactivity_limit_secs(),
                    "session started"
                );
                self.start_elapsed_timer();
                self.restart_inactivity_timer();
                self.report_progress();
            }
            SessionState::Running => {
                if self.elapsed_timer.is_none() {
                    self.start_elapsed_timer();
                }
                self.restart_inactivity_timer();
            }
            SessionState::Succeeded | SessionState::Failed => {
                trace!(state = %self.state, "input ignored after session end");
            }
        }
    }

    /// Move the clock forward by `delta`, firing every timer that comes due
    /// in between, earliest first.
    pub fn advance(&mut self, delta: Duration) {
        let until = self.timers.now() + delta;
        while let Some(fired) = self.timers.pop_due(until) {
            self.on_timer(fired);
        }
        self.timers.advance_to(until);
    }

    /// Legal from any state. Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.stop_timers();
        self.elapsed_secs = 0;
        self.inactivity_secs = 0;
        self.config = self.baseline;
        if self.state != SessionState::Idle {
            info!(from = %self.state, "session reset");
        }
        self.state = SessionState::Idle;
        self.presenter.set_input_enabled(true);
        self.presenter.clear_text();
        self.report_progress();
    }

    pub fn current_progress(&self) -> Progress {
        Progress {
            elapsed_secs: self.elapsed_secs,
            duration_secs: self.config.duration_secs(),
        }
    }

    pub fn time_remaining(&self) -> u32 {
        self.config.duration_secs().saturating_sub(self.elapsed_secs)
    }

    pub fn inactivity_remaining(&self) -> u32 {
        self.config
            .inactivity_limit_secs()
            .saturating_sub(self.inactivity_secs)
    }

    /// Time until the next timer callback, if any is scheduled
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn inactivity_secs(&self) -> u32 {
        self.inactivity_secs
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn on_timer(&mut self, fired: Fired<TimerKind>) {
        let slot = match fired.kind {
            TimerKind::Elapsed => &mut self.elapsed_timer,
            TimerKind::Inactivity => &mut self.inactivity_timer,
        };
        // a handle that is no longer current belongs to a cancelled schedule
        if *slot != Some(fired.handle) {
            trace!(kind = ?fired.kind, "discarding stale timer");
            return;
        }
        *slot = None;

        if self.state != SessionState::Running {
            return;
        }
        match fired.kind {
            TimerKind::Elapsed => self.on_elapsed_tick(),
            TimerKind::Inactivity => self.on_inactivity_tick(),
        }
    }

    fn on_elapsed_tick(&mut self) {
        self.elapsed_secs += 1;
        trace!(elapsed_secs = self.elapsed_secs, "elapsed tick");
        self.report_progress();
        if self.elapsed_secs >= self.config.duration_secs() {
            self.succeed();
        } else {
            self.start_elapsed_timer();
        }
    }

    fn on_inactivity_tick(&mut self) {
        self.inactivity_secs += 1;
        trace!(inactivity_secs = self.inactivity_secs, "inactivity tick");
        if self.inactivity_secs >= self.config.inactivity_limit_secs() {
            self.fail();
        } else {
            self.inactivity_timer = Some(self.timers.schedule(TICK, TimerKind::Inactivity));
        }
    }

    fn succeed(&mut self) {
        self.state = SessionState::Succeeded;
        self.stop_timers();
        self.presenter.set_input_enabled(false);
        info!(elapsed_secs = self.elapsed_secs, "session succeeded");
        self.presenter.notify(Notification::Success {
            minutes: self.config.duration_minutes(),
        });
    }

    fn fail(&mut self) {
        self.state = SessionState::Failed;
        self.presenter.clear_text();
        self.stop_timers();
        self.presenter.set_input_enabled(false);
        info!(elapsed_secs = self.elapsed_secs, "session failed");
        self.presenter
            .notify(Notification::failure_after(self.elapsed_secs));
    }

    fn start_elapsed_timer(&mut self) {
        self.elapsed_timer = Some(self.timers.schedule(TICK, TimerKind::Elapsed));
    }

    fn restart_inactivity_timer(&mut self) {
        if let Some(handle) = self.inactivity_timer.take() {
            self.timers.cancel(handle);
        }
        self.inactivity_secs = 0;
        self.inactivity_timer = Some(self.timers.schedule(TICK, TimerKind::Inactivity));
    }

    fn stop_timers(&mut self) {
        for handle in [self.elapsed_timer.take(), self.inactivity_timer.take()]
            .into_iter()
            .flatten()
        {
            self.timers.cancel(handle);
        }
    }

    fn report_progress(&mut self) {
        let progress = self.current_progress();
        self.presenter.show_progress(progress);
    }
}
