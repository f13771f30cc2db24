use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::input::Action;

pub struct HelpWidget;

impl HelpWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        let palette = &app.palette;
        let entries = [
            (Action::Advance, "Rotate the wheel forward"),
            (Action::Retreat, "Rotate the wheel back"),
            (Action::OpenLink, "Open the project link"),
            (Action::NextTheme, "Next theme"),
            (Action::PrevTheme, "Previous theme"),
            (Action::ToggleReducedMotion, "Toggle reduced motion"),
            (Action::Quit, "Quit"),
        ];

        let key_style = Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line> = entries
            .iter()
            .filter_map(|(action, text)| {
                let key = app.keymap.hint(*action)?;
                Some(Line::from(vec![
                    Span::styled(format!("{:>6}  ", key), key_style),
                    Span::styled(*text, Style::default().fg(palette.ink)),
                ]))
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Scroll, drag or click the wheel. Any key closes.",
            Style::default().fg(palette.muted),
        )));

        let area = frame.area();
        let popup_width = 56u16.min(area.width.saturating_sub(4));
        let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.sand));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(50, 10, area), Rect::new(25, 15, 50, 10));
        let small = Rect::new(0, 0, 10, 4);
        assert_eq!(centered_rect(50, 10, small), Rect::new(0, 0, 10, 4));
    }
}
