use flaio_core::wheel::RenderedItem;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::blend;

const LEFT: &str = "fun little";
const RIGHT: &str = "i own";
const GAP: u16 = 2;

/// Where the hero landed on screen, for mouse routing
pub struct HeroHits {
    pub wheel: Rect,
    pub items: Vec<(Rect, i64)>,
}

pub struct HeroWidget;

impl HeroWidget {
    /// Render "fun little <word> i own" with the word on the wheel
    pub fn render(frame: &mut Frame, area: Rect, app: &App) -> HeroHits {
        let wheel_rows = app
            .config
            .wheel
            .visible_items
            .saturating_mul(app.config.wheel.item_height().round() as u16)
            .clamp(1, area.height.max(1));
        let column = app.hero.width();
        let left_w = LEFT.width() as u16;
        let right_w = RIGHT.width() as u16;
        let total = left_w + GAP + column + GAP + right_w;

        let x0 = area.x + area.width.saturating_sub(total) / 2;
        let y0 = area.y + area.height.saturating_sub(wheel_rows) / 2;
        let center = y0 + wheel_rows / 2;

        let wheel = Rect::new(
            x0 + left_w + GAP,
            y0,
            column.min(area.right().saturating_sub(x0 + left_w + GAP)),
            wheel_rows.min(area.height),
        );

        let palette = &app.palette;
        let initial = Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD);
        let plain = Style::default().fg(palette.ink);

        let left = Line::from(vec![
            Span::styled("f", initial),
            Span::styled("un ", plain),
            Span::styled("l", initial),
            Span::styled("ittle", plain),
        ]);
        let right = Line::from(vec![
            Span::styled("i", initial),
            Span::styled(" ", plain),
            Span::styled("o", initial),
            Span::styled("wn", plain),
        ]);
        render_clipped(frame, area, Rect::new(x0, center, left_w, 1), left);
        render_clipped(
            frame,
            area,
            Rect::new(wheel.x + column + GAP, center, right_w, 1),
            right,
        );

        let mut items = Vec::new();
        for item in app.wheel.instances() {
            if item.visual.opacity <= 0.0 {
                continue;
            }
            let row = center as f64 + item.offset;
            let row = row.round();
            if row < wheel.y as f64 || row >= wheel.bottom() as f64 {
                continue;
            }
            let rect = Rect::new(wheel.x, row as u16, wheel.width, 1);
            render_clipped(frame, area, rect, word_line(app, &item, wheel.width));
            if item.visual.interactive {
                items.push((rect, item.logical_index));
            }
        }

        HeroHits { wheel, items }
    }
}

fn word_line<'a>(app: &'a App, item: &RenderedItem, width: u16) -> Line<'a> {
    let palette = &app.palette;
    let word = app.projects.get(item.item_index).word.as_str();
    let visual = item.visual;

    let mut style = if visual.is_active {
        Style::default()
            .fg(blend(palette.accent, palette.page, visual.opacity))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(blend(palette.muted, palette.page, visual.opacity))
    };
    // no blur in a terminal; dim the far ones instead
    if visual.blur >= 1.0 {
        style = style.add_modifier(Modifier::DIM);
    }

    let pad = width.saturating_sub(word.width() as u16) / 2;
    Line::from(vec![
        Span::raw(" ".repeat(pad as usize)),
        Span::styled(word, style),
    ])
}

fn render_clipped(frame: &mut Frame, bounds: Rect, rect: Rect, line: Line) {
    let rect = rect.intersection(bounds);
    if rect.is_empty() {
        return;
    }
    frame.render_widget(Paragraph::new(line), rect);
}
