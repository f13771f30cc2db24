use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::app::{App, HitMap, Mode};
use crate::widgets::{
    HeroWidget, HelpWidget, ParticleLayer, ProjectPanelWidget, StatusBarWidget,
};

/// Terminals at least this wide get the hero and panel side by side
const WIDE_LAYOUT: u16 = 100;
const PANEL_MARGIN: u16 = 2;

/// Draw the whole page and record where interactive parts landed
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.palette.page).fg(app.palette.ink)),
        area,
    );
    if app.particles_enabled {
        let layer = ParticleLayer::new(&app.raster, &app.palette, app.particles.config().color);
        frame.render_widget(layer, area);
    }

    let [main, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    let (hero_area, panel_area) = split_main(main, app);

    let hero = HeroWidget::render(frame, hero_area, app);
    let link = ProjectPanelWidget::render(frame, panel_area, app);
    let theme = StatusBarWidget::render(frame, status, app);

    if app.mode == Mode::Help {
        HelpWidget::render(frame, app);
    }

    app.hits = HitMap {
        wheel: hero.wheel,
        items: hero.items,
        panel: panel_area,
        link,
        theme,
    };
}

fn split_main(main: Rect, app: &App) -> (Rect, Rect) {
    if main.width >= WIDE_LAYOUT {
        let [hero, panel] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(main);
        (hero, pad(panel))
    } else {
        let wheel_rows = app
            .config
            .wheel
            .visible_items
            .saturating_mul(app.config.wheel.item_height().round() as u16);
        let [hero, panel] =
            Layout::vertical([Constraint::Length(wheel_rows + 2), Constraint::Min(0)])
                .areas(main);
        (hero, pad(panel))
    }
}

fn pad(area: Rect) -> Rect {
    let margin = PANEL_MARGIN.min(area.height / 2);
    Rect::new(
        area.x + PANEL_MARGIN.min(area.width / 2),
        area.y + margin / 2,
        area.width.saturating_sub(PANEL_MARGIN * 2),
        area.height.saturating_sub(margin),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use flaio_core::{AppConfig, DesignTheme, ProjectSet};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;

    fn app(now: Instant) -> App {
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            ProjectSet::builtin(),
            DesignTheme::Editorial,
            now,
        )
        .unwrap();
        app.start(120, 30, now);
        app
    }

    fn text(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        text(terminal.backend().buffer())
    }

    #[test]
    fn test_wide_layout_shows_hero_and_panel() {
        let now = Instant::now();
        let mut app = app(now);
        app.particles_enabled = false;
        let screen = draw(&mut app, 120, 30);
        assert!(screen.contains("fun little"));
        assert!(screen.contains("i own"));
        assert!(screen.contains("apps"));
        assert!(screen.contains("FLAIO Apps"));
        assert!(screen.contains("Editorial"));

        assert!(!app.hits.wheel.is_empty());
        assert!(app.hits.items.iter().any(|(_, logical)| *logical == 0));
        assert!(app.hits.link.is_some());
    }

    #[test]
    fn test_narrow_layout_stacks() {
        let now = Instant::now();
        let mut app = app(now);
        let screen = draw(&mut app, 60, 40);
        assert!(screen.contains("fun little"));
        assert!(screen.contains("FLAIO Apps"));
        assert!(app.hits.panel.y > app.hits.wheel.y);
    }

    #[test]
    fn test_panel_follows_selection() {
        let t0 = Instant::now();
        let mut app = app(t0);
        app.particles_enabled = false;
        app.set_theme(DesignTheme::Minimal);
        app.handle_key(
            crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char('j'),
                crossterm::event::KeyModifiers::NONE,
            ),
            t0,
        );
        let mut now = t0;
        while now < t0 + Duration::from_millis(800) {
            now += Duration::from_millis(16);
            app.on_frame(now);
        }
        let screen = draw(&mut app, 120, 30);
        assert!(screen.contains("FLAIO Atelier"));
        assert!(screen.contains("Minimal"));
    }

    #[test]
    fn test_help_overlay() {
        let now = Instant::now();
        let mut app = app(now);
        app.mode = Mode::Help;
        let screen = draw(&mut app, 120, 30);
        assert!(screen.contains("Help"));
        assert!(screen.contains("Next theme"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let now = Instant::now();
        let mut app = app(now);
        app.handle_resize(3, 2);
        app.on_frame(now + Duration::from_millis(16));
        draw(&mut app, 3, 2);
    }
}
