use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyEvent, MouseEvent};
use flaio_core::particles::{FieldState, Viewport};
use flaio_core::wheel::AutoplayState;
use flaio_core::{
    AppConfig, DesignTheme, HeroLayout, InputEvent, NavKey, ParticleField, Project, ProjectSet,
    Raster, Selection, ThemeSignal, WheelController,
};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

use crate::assets::AssetCache;
use crate::event::AssetLoadResult;
use crate::input::{handle_key_event, Action, MouseTracker, PointerEvent};
use crate::keymap::Keymap;
use crate::motion::{PanelFrame, PanelTransition};
use crate::theme::Palette;
use crate::themes::load_palette;

/// Longest step fed to the springs after a stall
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Help overlay
    Help,
}

/// Screen regions from the last render, used to route mouse input
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub wheel: Rect,
    /// Interactive wheel instances and their logical indices
    pub items: Vec<(Rect, i64)>,
    pub panel: Rect,
    pub link: Option<Rect>,
    pub theme: Rect,
}

impl HitMap {
    fn item_at(&self, position: Position) -> Option<i64> {
        self.items
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, logical)| *logical)
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub projects: ProjectSet,
    pub wheel: WheelController,
    pub hero: HeroLayout,
    pub panel: PanelTransition,
    /// Panel state computed on the last frame
    pub panel_frame: PanelFrame,
    pub particles: ParticleField,
    pub raster: Raster,
    pub particles_enabled: bool,
    theme_signal: ThemeSignal,
    pending_theme: Rc<Cell<Option<DesignTheme>>>,
    pub palette: Palette,
    pub keymap: Keymap,
    mouse: MouseTracker,
    pub assets: AssetCache,
    /// Current application mode
    pub mode: Mode,
    /// Terminal has focus
    pub visible: bool,
    pub reduced_motion: bool,
    /// Last pointer cell
    pub pointer: Option<(u16, u16)>,
    pub hits: HitMap,
    last_frame: Option<Instant>,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
    torn_down: bool,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        projects: ProjectSet,
        theme: DesignTheme,
        now: Instant,
    ) -> flaio_core::Result<Self> {
        let reduced_motion = config.reduced_motion();
        let wheel = WheelController::new(
            projects.len(),
            &config.wheel,
            &config.autoplay,
            reduced_motion,
            now,
        )?;
        let hero = HeroLayout::new(word_width(projects.get(0)), reduced_motion);
        let panel = PanelTransition::new(
            0,
            config.panel.transition(),
            config.panel.easing,
            reduced_motion,
        );

        let mut theme_signal = ThemeSignal::new(theme);
        let pending_theme = Rc::new(Cell::new(None));
        let relay = pending_theme.clone();
        theme_signal.subscribe(move |theme| relay.set(Some(theme)));

        Ok(Self {
            palette: load_palette(theme, &config.ui.theme.colors),
            keymap: Keymap::from_config(&config.keymap),
            assets: AssetCache::new(config.assets_dir()),
            particles: ParticleField::new(theme, config.particles),
            particles_enabled: config.ui.particles,
            raster: Raster::default(),
            wheel,
            hero,
            panel,
            panel_frame: PanelFrame {
                index: 0,
                opacity: 1.0,
                offset: 0.0,
            },
            theme_signal,
            pending_theme,
            mouse: MouseTracker::default(),
            mode: Mode::Normal,
            visible: true,
            reduced_motion,
            pointer: None,
            hits: HitMap::default(),
            last_frame: None,
            status_message: None,
            should_quit: false,
            torn_down: false,
            projects,
            config,
        })
    }

    /// Size the particle field to the terminal and start the frame clock
    pub fn start(&mut self, cols: u16, rows: u16, now: Instant) {
        if self.particles_enabled {
            self.particles
                .start(self.viewport(cols, rows), self.reduced_motion, now);
        }
        self.last_frame = Some(now);
        info!(
            theme = %self.theme(),
            projects = self.projects.len(),
            reduced_motion = self.reduced_motion,
            "showcase started"
        );
    }

    fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            cols,
            rows,
            self.config.ui.cell_width_px as f64,
            self.config.ui.cell_height_px as f64,
        )
    }

    #[inline]
    pub fn theme(&self) -> DesignTheme {
        self.theme_signal.get()
    }

    /// For outside observers such as the preference store
    pub fn theme_signal_mut(&mut self) -> &mut ThemeSignal {
        &mut self.theme_signal
    }

    pub fn active_project(&self) -> &Project {
        self.projects.get(self.wheel.active_index())
    }

    /// Project currently drawn in the panel, which lags during a transition
    pub fn shown_project(&self) -> &Project {
        self.projects.get(self.panel_frame.index)
    }

    pub fn autoplay_state(&self) -> AutoplayState {
        self.wheel.autoplay_state()
    }

    /// Whether the frame clock should run at full rate
    pub fn is_animating(&self) -> bool {
        self.wheel.is_animating()
            || self.hero.is_animating()
            || self.panel.is_animating()
            || (self.particles_enabled
                && self.visible
                && self.particles.state() == FieldState::Running)
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let action = handle_key_event(key, &self.keymap, self.mode == Mode::Help);
        match action {
            Action::Quit => self.should_quit = true,
            Action::Advance => self.feed(InputEvent::Key(NavKey::Down), now),
            Action::Retreat => self.feed(InputEvent::Key(NavKey::Up), now),
            Action::OpenLink => self.open_active_link(),
            Action::NextTheme => self.next_theme(),
            Action::PrevTheme => self.prev_theme(),
            Action::ToggleReducedMotion => self.toggle_reduced_motion(),
            Action::ToggleHelp => self.mode = Mode::Help,
            Action::ExitMode => {
                self.mode = Mode::Normal;
                self.clear_status();
            }
            Action::None => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let notch = self.config.wheel.wheel_notch_delta;
        for event in self.mouse.translate(mouse, notch, self.hits.wheel) {
            match event {
                PointerEvent::Wheel { delta } => self.feed(InputEvent::Wheel { delta }, now),
                PointerEvent::DragStart { y } => self.feed(InputEvent::TouchStart { y }, now),
                PointerEvent::DragMove { y } => self.feed(InputEvent::TouchMove { y }, now),
                PointerEvent::DragEnd => self.feed(InputEvent::TouchEnd, now),
                PointerEvent::Click { column, row } => self.click(column, row, now),
                PointerEvent::Hover { column, row } => self.hover(column, row, now),
            }
        }
    }

    fn click(&mut self, column: u16, row: u16, now: Instant) {
        if self.mode == Mode::Help {
            self.mode = Mode::Normal;
            return;
        }
        let position = Position::new(column, row);
        if let Some(logical_index) = self.hits.item_at(position) {
            self.feed(InputEvent::Click { logical_index }, now);
        } else if self.hits.link.is_some_and(|r| r.contains(position)) {
            self.open_active_link();
        } else if self.hits.theme.contains(position) {
            self.next_theme();
        }
    }

    fn hover(&mut self, column: u16, row: u16, now: Instant) {
        self.pointer = Some((column, row));
        let over_panel = self.hits.panel.contains(Position::new(column, row));
        self.wheel.set_autoplay_held(over_panel, now);
    }

    /// Pointer position in the particle field's virtual pixels
    pub fn pointer_px(&self) -> Option<(f64, f64)> {
        let (col, row) = self.pointer?;
        let ui = &self.config.ui;
        Some((
            (col as f64 + 0.5) * ui.cell_width_px as f64,
            (row as f64 + 0.5) * ui.cell_height_px as f64,
        ))
    }

    fn feed(&mut self, event: InputEvent, now: Instant) {
        if let Some(selection) = self.wheel.handle_input(event, now) {
            self.on_selection(selection, now);
        }
    }

    fn on_selection(&mut self, selection: Selection, now: Instant) {
        debug!(
            active = selection.active_index,
            logical = selection.logical_index,
            "selection"
        );
        self.panel.select(selection.active_index, now);
        self.panel_frame = self.panel.frame(now);
    }

    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        if self.particles_enabled {
            self.particles.resize(self.viewport(cols, rows));
        }
    }

    /// Terminal focus changed. Losing focus ends any drag, since the
    /// release will not be reported.
    pub fn set_visible(&mut self, visible: bool, now: Instant) {
        if visible != self.visible {
            debug!(visible, "visibility changed");
        }
        self.visible = visible;
        if !visible {
            self.pointer = None;
            self.mouse.reset();
            if self.wheel.is_dragging() {
                self.feed(InputEvent::TouchEnd, now);
            }
        }
    }

    /// Advance every animation to `now`
    pub fn on_frame(&mut self, now: Instant) {
        let dt = self
            .last_frame
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or_default()
            .min(MAX_FRAME_STEP);
        self.last_frame = Some(now);

        if let Some(selection) = self.wheel.tick(now, dt, self.visible) {
            self.on_selection(selection, now);
        }

        self.hero.measure(word_width(self.active_project()));
        self.hero.tick(dt);
        self.panel_frame = self.panel.frame(now);

        if self.particles_enabled && self.visible {
            let pointer = self.pointer_px();
            self.particles.frame(now, pointer, &mut self.raster);
        }
    }

    pub fn set_theme(&mut self, theme: DesignTheme) {
        if self.theme_signal.set(theme) {
            self.set_status(format!("Theme: {}", theme.label()));
        }
        self.apply_pending_theme();
    }

    pub fn next_theme(&mut self) {
        self.set_theme(self.theme().next());
    }

    pub fn prev_theme(&mut self) {
        self.set_theme(self.theme().prev());
    }

    fn apply_pending_theme(&mut self) {
        let Some(theme) = self.pending_theme.take() else {
            return;
        };
        self.palette = load_palette(theme, &self.config.ui.theme.colors);
        self.particles.set_theme(theme);
        self.raster.clear();
    }

    /// Flip reduced motion. Auto-advance stays off once it has been on.
    pub fn toggle_reduced_motion(&mut self) {
        self.reduced_motion = !self.reduced_motion;
        self.wheel.set_reduced_motion(self.reduced_motion);
        self.hero.set_reduced_motion(self.reduced_motion);
        self.panel.set_reduced_motion(self.reduced_motion);
        info!(reduced_motion = self.reduced_motion, "reduced motion toggled");
        self.set_status(if self.reduced_motion {
            "Reduced motion on"
        } else {
            "Reduced motion off"
        });
    }

    pub fn open_active_link(&mut self) {
        let project = self.active_project();
        let (name, href) = (project.name.clone(), project.href.clone());
        match open::that(&href) {
            Ok(()) => self.set_status(format!("Opened {}", name)),
            Err(e) => {
                warn!(%href, error = %e, "failed to open link");
                self.set_status(format!("Failed to open link: {}", e));
            }
        }
    }

    /// Assets the shown project needs that nobody has asked for yet.
    ///
    /// Each returned entry is marked loading; the caller loads it and reports
    /// back through [`App::asset_loaded`].
    pub fn wanted_assets(&mut self) -> Vec<(String, PathBuf)> {
        let project = self.projects.get(self.panel.target());
        let keys: Vec<String> = project
            .screenshot
            .iter()
            .cloned()
            .chain(project.apps.iter().filter_map(|a| a.icon_image.clone()))
            .collect();

        let mut wanted = Vec::new();
        for key in keys {
            if self.assets.request(&key) {
                let path = self.assets.resolve(&key);
                wanted.push((key, path));
            }
        }
        wanted
    }

    pub fn asset_loaded(&mut self, result: AssetLoadResult) {
        match result {
            AssetLoadResult::Success { key, image } => self.assets.set_loaded(&key, image),
            AssetLoadResult::Failure { key, error } => self.assets.set_failed(&key, error),
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Stop particles, timers and theme listeners. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.particles.stop();
        self.wheel.teardown();
        self.theme_signal.clear();
        debug!("app torn down");
    }
}

/// Display width of a project's wheel word, in cells
pub fn word_width(project: &Project) -> usize {
    UnicodeWidthStr::width(project.word.as_str())
}
