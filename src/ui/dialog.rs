use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use dangerwrite::Notification;

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 7;

/// Rectangle of at most `width` x `height`, centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Blocking info box shown when a session ends
pub fn render_dialog(notification: &Notification, area: Rect, buf: &mut Buffer) {
    let rect = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    let accent = match notification {
        Notification::Success { .. } => Color::Green,
        Notification::Failure { .. } => Color::Red,
    };

    Clear.render(rect, buf);

    let body = vec![
        Line::from(notification.message()),
        Line::from(""),
        Line::from(Span::styled(
            "[enter] OK",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];

    Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .title(Span::styled(
                    notification.title(),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                )),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(rect, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_small_areas() {
        let area = Rect::new(0, 0, 20, 4);
        let r = centered_rect(50, 7, area);
        assert_eq!(r, Rect::new(0, 0, 20, 4));
    }

    #[test]
    fn centered_rect_is_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered_rect(50, 7, area);
        assert_eq!(r, Rect::new(15, 8, 50, 7));
    }
}
