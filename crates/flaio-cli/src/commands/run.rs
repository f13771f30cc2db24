use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use flaio_core::{AppConfig, DesignTheme, ProjectSet};
use flaio_tui::{
    app::App,
    assets::load_asset,
    event::{AppEvent, AssetLoadResult, EventHandler},
    ui,
};

use crate::preference::ThemePreference;

/// Theme at startup: the `--theme` flag, then the stored preference, then config
pub fn resolve_theme(config: &AppConfig, flag: Option<&str>) -> Result<DesignTheme> {
    if let Some(name) = flag {
        return Ok(name.parse()?);
    }
    if let Some(theme) = ThemePreference::new(&config.data_dir()).load() {
        return Ok(theme);
    }
    Ok(config.ui.theme.name.parse().unwrap_or_else(|e| {
        warn!("{}, using the default theme", e);
        DesignTheme::default()
    }))
}

pub async fn run(config: Arc<AppConfig>, theme_flag: Option<&str>) -> Result<()> {
    let theme = resolve_theme(&config, theme_flag)?;
    let projects = ProjectSet::load(config.projects_file().as_deref())?;

    // Create app state
    let mut app = App::new(config.clone(), projects, theme, Instant::now())?;

    // Persist theme changes made inside the TUI
    let preference = ThemePreference::new(&config.data_dir());
    app.theme_signal_mut().subscribe(move |theme| {
        if let Err(e) = preference.save(theme) {
            warn!("Failed to store theme preference: {}", e);
        }
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("FLAIO")
    ) {
        disable_raw_mode()?;
        return Err(e.into());
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &config).await;

    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    config: &AppConfig,
) -> Result<()> {
    let size = terminal.size()?;
    app.start(size.width, size.height, Instant::now());

    let mut events = EventHandler::new(config.ui.frame_duration(), config.ui.idle_duration());

    // Create channel for async asset loading results
    let (asset_tx, mut asset_rx) = mpsc::unbounded_channel::<AssetLoadResult>();

    loop {
        for (key, path) in app.wanted_assets() {
            spawn_asset_load(key, path, asset_tx.clone());
        }

        terminal.draw(|frame| ui::render(frame, app))?;
        events.set_animating(app.is_animating());

        tokio::select! {
            event = events.next() => {
                let now = Instant::now();
                match event? {
                    AppEvent::Key(key) => app.handle_key(key, now),
                    AppEvent::Mouse(mouse) => app.handle_mouse(mouse, now),
                    AppEvent::Resize(width, height) => app.handle_resize(width, height),
                    AppEvent::FocusGained => app.set_visible(true, now),
                    AppEvent::FocusLost => app.set_visible(false, now),
                    AppEvent::Frame => app.on_frame(now),
                }
            }
            Some(result) = asset_rx.recv() => app.asset_loaded(result),
        }

        if app.should_quit {
            info!("quit requested");
            break;
        }
    }

    Ok(())
}

/// Decode an asset on the blocking pool and report back over `tx`
fn spawn_asset_load(key: String, path: PathBuf, tx: mpsc::UnboundedSender<AssetLoadResult>) {
    tokio::task::spawn_blocking(move || {
        let result = match load_asset(&path) {
            Ok(image) => AssetLoadResult::Success { key, image },
            Err(error) => AssetLoadResult::Failure { key, error },
        };
        let _ = tx.send(result);
    });
}
