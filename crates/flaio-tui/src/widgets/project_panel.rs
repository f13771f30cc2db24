use flaio_core::Project;
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::theme::blend;
use crate::widgets::image::HalfblockImage;

/// Below this opacity the card is not drawn at all
const MIN_VISIBLE: f64 = 0.02;
const MAX_WIDTH: u16 = 64;
const SCREENSHOT_ROWS: u16 = 8;

pub struct ProjectPanelWidget;

impl ProjectPanelWidget {
    /// Render the card for the shown project. Returns the link's screen rect.
    pub fn render(frame: &mut Frame, area: Rect, app: &App) -> Option<Rect> {
        let shown = app.panel_frame;
        if shown.opacity < MIN_VISIBLE || area.is_empty() {
            return None;
        }

        let width = area.width.min(MAX_WIDTH);
        let card = Rect::new(
            area.x + (area.width - width) / 2,
            area.y,
            width,
            area.height,
        );
        let card = shift_rows(card, area, px_to_rows(shown.offset, app));

        let project = app.shown_project();
        let palette = &app.palette;
        let fade = |color| blend(color, palette.page, shown.opacity);
        let tint = fade(palette.project_tint(project.accent_hue));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(fade(palette.hairline)))
            .style(Style::default().bg(fade(palette.sand)));
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let screenshot = project
            .screenshot
            .as_deref()
            .and_then(|key| app.assets.get(key));
        let screenshot_rows = if screenshot.is_some() && shown.opacity >= 0.5 {
            SCREENSHOT_ROWS
        } else {
            0
        };
        let app_rows = project.apps.len() as u16;

        let [header, description, shot, apps, tags, link] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(screenshot_rows),
            Constraint::Length(app_rows),
            Constraint::Length(if project.tags.is_empty() { 0 } else { 1 }),
            Constraint::Length(1),
        ])
        .areas(inner.inner(Margin::new(1, 0)));

        let icon = Span::raw(format!("{} ", project.icon));
        let name = Span::styled(
            project.name.as_str(),
            Style::default()
                .fg(fade(palette.ink))
                .add_modifier(Modifier::BOLD),
        );
        let tag = Span::styled(format!("#{}", project.word), Style::default().fg(tint));
        frame.render_widget(
            Paragraph::new(vec![Line::from(vec![icon, name]), Line::from(tag)]),
            header,
        );

        frame.render_widget(
            Paragraph::new(project.description.as_str())
                .style(Style::default().fg(fade(palette.ink)))
                .wrap(Wrap { trim: true }),
            description,
        );

        if let (Some(image), false) = (screenshot, shot.is_empty()) {
            frame.render_widget(HalfblockImage::new(image), shot);
        }

        render_apps(frame, apps, project, app, &fade);

        if !project.tags.is_empty() {
            let text = project
                .tags
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(" · ");
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(fade(palette.muted))),
                tags,
            );
        }

        if link.is_empty() {
            return None;
        }
        let label = format!("→ {}", project.link_label);
        frame.render_widget(
            Paragraph::new(Span::styled(
                label.clone(),
                Style::default()
                    .fg(fade(palette.accent))
                    .add_modifier(Modifier::UNDERLINED),
            )),
            link,
        );
        let label_width = label.width() as u16;
        Some(Rect::new(link.x, link.y, label_width.min(link.width), 1))
    }
}

/// App previews: loaded icon thumbnails, emoji otherwise
fn render_apps<F>(frame: &mut Frame, area: Rect, project: &Project, app: &App, fade: &F)
where
    F: Fn(Color) -> Color,
{
    for (i, preview) in project.apps.iter().enumerate() {
        let row = area.y + i as u16;
        if row >= area.bottom() {
            break;
        }
        let icon_rect = Rect::new(area.x, row, 2.min(area.width), 1);
        let text_rect = Rect::new(area.x + 3, row, area.width.saturating_sub(3), 1);

        match preview.icon_image.as_deref().and_then(|k| app.assets.get(k)) {
            Some(image) => frame.render_widget(HalfblockImage::new(image), icon_rect),
            None => frame.render_widget(Paragraph::new(preview.icon.as_str()), icon_rect),
        }
        if !text_rect.is_empty() {
            frame.render_widget(
                Paragraph::new(preview.name.as_str())
                    .style(Style::default().fg(fade(app.palette.ink))),
                text_rect,
            );
        }
    }
}

/// Virtual pixel offset to whole rows
fn px_to_rows(offset: f64, app: &App) -> i32 {
    let cell = app.config.ui.cell_height_px.max(1) as f64;
    (offset / cell).round() as i32
}

/// Move `rect` vertically, keeping it inside `bounds`
fn shift_rows(rect: Rect, bounds: Rect, rows: i32) -> Rect {
    if rows == 0 {
        return rect;
    }
    let y = (rect.y as i32 + rows).clamp(bounds.y as i32, bounds.bottom() as i32) as u16;
    let bottom =
        (rect.bottom() as i32 + rows).clamp(bounds.y as i32, bounds.bottom() as i32) as u16;
    Rect::new(rect.x, y, rect.width, bottom.saturating_sub(y))
}
