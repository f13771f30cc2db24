use flaio_core::wheel::AutoplayState;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::input::Action;

pub struct StatusBarWidget;

impl StatusBarWidget {
    /// Render the bottom bar. Returns the theme label's rect.
    pub fn render(frame: &mut Frame, area: Rect, app: &App) -> Rect {
        let palette = &app.palette;
        let theme = app.theme();
        let label = format!(" {} ", theme.label());
        let label_width = label.width() as u16;

        let autoplay = match app.autoplay_state() {
            AutoplayState::Playing => "▶ auto",
            AutoplayState::Resting => "❚❚ resting",
            AutoplayState::Held => "❚❚ held",
            AutoplayState::Off => "■ off",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let mut text = format!(" {} | {}", theme.description(), autoplay);
            if app.reduced_motion {
                text.push_str(" | reduced motion");
            }
            text
        };

        let help_hint = hints(app);
        let used = label_width as usize + status_text.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let bar = Style::default().bg(palette.sand);
        let line = Line::from(vec![
            Span::styled(
                label,
                Style::default()
                    .fg(palette.page)
                    .bg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(status_text, bar.fg(palette.ink)),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, bar.fg(palette.muted)),
        ]);

        frame.render_widget(Paragraph::new(line).style(bar), area);
        Rect::new(area.x, area.y, label_width.min(area.width), area.height.min(1))
    }
}

fn hints(app: &App) -> String {
    let pairs = [
        (Action::Advance, "next"),
        (Action::OpenLink, "open"),
        (Action::NextTheme, "theme"),
        (Action::ToggleReducedMotion, "motion"),
        (Action::ToggleHelp, "help"),
        (Action::Quit, "quit"),
    ];
    let mut out = String::new();
    for (action, label) in pairs {
        if let Some(key) = app.keymap.hint(action) {
            out.push_str(&format!(" {}:{}", key, label));
        }
    }
    out.push(' ');
    out
}
