mod dialog;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use dangerwrite::SessionState;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 1;
const WARNING_SECS: u32 = 2;

pub fn format_mmss(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let controller = &self.controller;
        let surface = controller.presenter();
        let state = controller.state();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1), // menu bar
                Constraint::Length(1), // progress
                Constraint::Min(3),    // text
                Constraint::Length(1), // status
            ])
            .split(area);

        // menu bar
        let selector_style = if state == SessionState::Idle {
            bold_style.fg(Color::Cyan)
        } else {
            dim_style
        };
        let menu = Paragraph::new(Line::from(vec![
            Span::raw("Session Length (mins): "),
            Span::styled(
                format!("◂ {} ▸", controller.config().duration_minutes()),
                selector_style,
            ),
            Span::styled("   (↑/↓) change  (ctrl+r) restart  (esc) quit", italic_style),
        ]));
        menu.render(chunks[0], buf);

        // progress
        let progress = surface.progress();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(progress.ratio())
            .label(format!(
                "{} / {}",
                format_mmss(progress.elapsed_secs),
                format_mmss(progress.duration_secs)
            ));
        gauge.render(chunks[1], buf);

        // text area
        let danger = state == SessionState::Running
            && controller.inactivity_remaining() <= WARNING_SECS;
        let border_style = match state {
            SessionState::Running if danger => Style::default().fg(Color::Red),
            SessionState::Running => Style::default().fg(Color::Green),
            SessionState::Succeeded => Style::default().fg(Color::Green).add_modifier(Modifier::DIM),
            SessionState::Failed => Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
            SessionState::Idle => Style::default(),
        };
        let block = Block::default().borders(Borders::ALL).border_style(border_style);

        let text = if surface.text().is_empty() && state == SessionState::Idle {
            Paragraph::new(Span::styled(
                format!(
                    "Start typing. Stop for {} seconds and everything you wrote is gone.",
                    controller.config().inactivity_limit_secs()
                ),
                dim_style.add_modifier(Modifier::ITALIC),
            ))
        } else {
            let mut body = surface.text().to_string();
            if surface.is_input_enabled() {
                body.push('▏');
            }
            Paragraph::new(body)
        };
        text.block(block)
            .wrap(Wrap { trim: false })
            .render(chunks[2], buf);

        // status line
        let status = match state {
            SessionState::Idle => Span::styled("ready", dim_style),
            SessionState::Running => Span::styled(
                format!(
                    "{} left   erasing in {}s   {} words",
                    format_mmss(controller.time_remaining()),
                    controller.inactivity_remaining(),
                    surface.word_count()
                ),
                if danger {
                    bold_style.fg(Color::Red)
                } else {
                    bold_style
                },
            ),
            SessionState::Succeeded => Span::styled(
                format!("done: {} words kept", surface.word_count()),
                bold_style.fg(Color::Green),
            ),
            SessionState::Failed => Span::styled("erased", bold_style.fg(Color::Red)),
        };
        Paragraph::new(status).render(chunks[3], buf);

        if let Some(notification) = surface.dialog() {
            dialog::render_dialog(notification, area, buf);
        }
    }
}
