use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub autoplay: AutoplayConfig,
    #[serde(default)]
    pub particles: ParticleTuning,
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file, theme preference, default assets)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle poll interval in milliseconds (nothing animating)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while anything animates
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Suppress involuntary motion
    #[serde(default)]
    pub reduced_motion: bool,
    /// Draw the ambient particle field
    #[serde(default = "default_true")]
    pub particles: bool,
    /// Virtual pixels per terminal column
    #[serde(default = "default_cell_width")]
    pub cell_width_px: u16,
    /// Virtual pixels per terminal row
    #[serde(default = "default_cell_height")]
    pub cell_height_px: u16,
    /// Optional TOML catalog replacing the built-in projects
    #[serde(default)]
    pub projects_file: Option<PathBuf>,
    /// Directory holding screenshots and app icons (defaults to <data_dir>/assets)
    #[serde(default)]
    pub assets_dir: Option<PathBuf>,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            reduced_motion: false,
            particles: default_true(),
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
            projects_file: None,
            assets_dir: None,
            theme: ThemeConfig::default(),
        }
    }
}

impl UiConfig {
    /// Frame interval while animating
    pub fn frame_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    /// Idle interval when nothing moves
    pub fn idle_duration(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (one of editorial, terminal, cyberpunk, minimal, brutalist, retro)
    pub name: String,
    /// Optional color overrides for palette tokens
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either a bare theme name or a table with overrides
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string (theme name) or a map with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => {
                            name = Some(map.next_value()?);
                        }
                        "colors" => {
                            colors = Some(map.next_value()?);
                        }
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

fn default_theme_name() -> String {
    "editorial".to_string()
}

/// Optional palette overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Page background
    pub page: Option<String>,
    /// Card background
    pub sand: Option<String>,
    /// Primary text
    pub ink: Option<String>,
    /// Secondary text
    pub muted: Option<String>,
    /// Borders and separators
    pub hairline: Option<String>,
    /// Accent color (active wheel word, links)
    pub accent: Option<String>,
}

/// Damped spring parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Distance from target considered settled
    #[serde(default = "default_rest_delta")]
    pub rest_delta: f64,
    /// Speed considered settled
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            rest_delta: default_rest_delta(),
            rest_speed: default_rest_speed(),
        }
    }
}

impl SpringConfig {
    /// Spring driving the hero's wheel column width
    pub fn side() -> Self {
        Self {
            stiffness: 200.0,
            damping: 25.0,
            mass: 0.8,
            rest_delta: 0.05,
            rest_speed: 0.1,
        }
    }

    /// Damping ratio; below 1.0 the spring overshoots its target
    pub fn damping_ratio(&self) -> f64 {
        let critical = 2.0 * (self.stiffness * self.mass).sqrt();
        if critical > 0.0 {
            self.damping / critical
        } else {
            f64::INFINITY
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelConfig {
    /// Height of one wheel item, in terminal rows
    #[serde(default = "default_item_height")]
    pub item_height: f64,
    /// Number of items shown in the viewport
    #[serde(default = "default_visible_items")]
    pub visible_items: u16,
    /// Copies of the item set rendered for the infinite illusion
    #[serde(default = "default_copies")]
    pub copies: u16,
    /// Accumulated wheel delta needed for one step
    #[serde(default = "default_wheel_threshold")]
    pub wheel_threshold: f64,
    /// Cool-down after a wheel step fires
    #[serde(default = "default_wheel_cooldown")]
    pub wheel_cooldown_ms: u64,
    /// Delta contributed by one terminal scroll event
    #[serde(default = "default_wheel_notch_delta")]
    pub wheel_notch_delta: f64,
    #[serde(default)]
    pub spring: SpringConfig,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            item_height: default_item_height(),
            visible_items: default_visible_items(),
            copies: default_copies(),
            wheel_threshold: default_wheel_threshold(),
            wheel_cooldown_ms: default_wheel_cooldown(),
            wheel_notch_delta: default_wheel_notch_delta(),
            spring: SpringConfig::default(),
        }
    }
}

impl WheelConfig {
    /// Item height, falling back to the default for unusable values
    pub fn item_height(&self) -> f64 {
        if self.item_height.is_finite() && self.item_height > 0.0 {
            self.item_height
        } else {
            warn!("Invalid wheel item height {}, using default", self.item_height);
            default_item_height()
        }
    }

    pub fn wheel_cooldown(&self) -> Duration {
        Duration::from_millis(self.wheel_cooldown_ms)
    }

    /// Number of copies, at least one
    pub fn copies(&self) -> u16 {
        self.copies.max(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Period between automatic advances
    #[serde(default = "default_autoplay_interval")]
    pub interval_ms: u64,
    /// Quiet time after an interaction before auto-advance resumes
    #[serde(default = "default_idle_delay")]
    pub idle_delay_ms: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            interval_ms: default_autoplay_interval(),
            idle_delay_ms: default_idle_delay(),
        }
    }
}

impl AutoplayConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_delay_ms)
    }
}

/// Pointer interaction tuning for the particle field
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParticleTuning {
    /// Repulsion radius in virtual pixels
    #[serde(default = "default_pointer_radius")]
    pub pointer_radius: f64,
    /// Repulsion strength at zero distance
    #[serde(default = "default_pointer_force")]
    pub pointer_force: f64,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            pointer_radius: default_pointer_radius(),
            pointer_force: default_pointer_force(),
        }
    }
}

/// Easing curve for time-based transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Duration of each half (exit, enter) of the card transition
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
            easing: EasingType::default(),
        }
    }
}

impl PanelConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-g>" (Shift+g), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Rotate the wheel forward
    #[serde(default = "default_key_advance")]
    pub advance: String,
    /// Rotate the wheel backward
    #[serde(default = "default_key_retreat")]
    pub retreat: String,
    /// Open the active project's link
    #[serde(default = "default_key_open_link")]
    pub open_link: String,
    /// Switch to the next design theme
    #[serde(default = "default_key_next_theme")]
    pub next_theme: String,
    /// Switch to the previous design theme
    #[serde(default = "default_key_prev_theme")]
    pub prev_theme: String,
    /// Turn reduced motion on for the session
    #[serde(default = "default_key_reduced_motion")]
    pub toggle_reduced_motion: String,
    /// Show the help overlay
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            advance: default_key_advance(),
            retreat: default_key_retreat(),
            open_link: default_key_open_link(),
            next_theme: default_key_next_theme(),
            prev_theme: default_key_prev_theme(),
            toggle_reduced_motion: default_key_reduced_motion(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_advance() -> String { "j".to_string() }
fn default_key_retreat() -> String { "k".to_string() }
fn default_key_open_link() -> String { "<CR>".to_string() }
fn default_key_next_theme() -> String { "t".to_string() }
fn default_key_prev_theme() -> String { "T".to_string() }
fn default_key_reduced_motion() -> String { "m".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flaio")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_cell_width() -> u16 {
    8
}

fn default_cell_height() -> u16 {
    16
}

fn default_stiffness() -> f64 {
    350.0
}

fn default_damping() -> f64 {
    35.0
}

fn default_mass() -> f64 {
    0.7
}

fn default_rest_delta() -> f64 {
    0.01
}

fn default_rest_speed() -> f64 {
    0.05
}

pub(crate) fn default_item_height() -> f64 {
    3.0
}

fn default_visible_items() -> u16 {
    5
}

fn default_copies() -> u16 {
    7
}

fn default_wheel_threshold() -> f64 {
    50.0
}

fn default_wheel_cooldown() -> u64 {
    200
}

fn default_wheel_notch_delta() -> f64 {
    100.0 // one mouse-wheel notch, as browsers report it
}

fn default_autoplay_interval() -> u64 {
    3500
}

fn default_idle_delay() -> u64 {
    5000
}

fn default_pointer_radius() -> f64 {
    200.0
}

fn default_pointer_force() -> f64 {
    0.15
}

fn default_transition_ms() -> u64 {
    300
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

/// Environment switch for reduced motion ("1", "true", "yes")
pub const REDUCED_MOTION_ENV: &str = "FLAIO_REDUCED_MOTION";

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/flaio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("flaio")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file written while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("flaio.log")
    }

    /// Directory searched for screenshots and icons
    pub fn assets_dir(&self) -> PathBuf {
        match &self.ui.assets_dir {
            Some(dir) => expand_tilde(dir),
            None => self.data_dir().join("assets"),
        }
    }

    /// Custom project catalog, if configured
    pub fn projects_file(&self) -> Option<PathBuf> {
        self.ui.projects_file.as_deref().map(expand_tilde)
    }

    /// Reduced motion from config or the environment
    pub fn reduced_motion(&self) -> bool {
        self.ui.reduced_motion || env_flag(std::env::var(REDUCED_MOTION_ENV).ok().as_deref())
    }
}

fn env_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_wheel_timing() {
        let config = AppConfig::default();
        assert_eq!(config.autoplay.interval(), Duration::from_millis(3500));
        assert_eq!(config.autoplay.idle_delay(), Duration::from_millis(5000));
        assert_eq!(config.wheel.wheel_cooldown(), Duration::from_millis(200));
        assert_eq!(config.wheel.wheel_threshold, 50.0);
        assert_eq!(config.wheel.spring.stiffness, 350.0);
        assert_eq!(config.wheel.spring.damping, 35.0);
        assert_eq!(config.wheel.spring.mass, 0.7);
        assert_eq!(config.ui.theme.name, "editorial");
    }

    #[test]
    fn test_theme_as_string() {
        let config = AppConfig::from_toml("[ui]\ntheme = \"retro\"\n").unwrap();
        assert_eq!(config.ui.theme.name, "retro");
        assert!(config.ui.theme.colors.accent.is_none());
    }

    #[test]
    fn test_theme_as_table() {
        let toml = r##"
[ui.theme]
name = "terminal"

[ui.theme.colors]
accent = "#00ff41"
"##;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.ui.theme.name, "terminal");
        assert_eq!(config.ui.theme.colors.accent.as_deref(), Some("#00ff41"));
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = AppConfig::from_toml("[wheel]\nitem_height = 4.0\n").unwrap();
        assert_eq!(config.wheel.item_height(), 4.0);
        assert_eq!(config.wheel.visible_items, 5);
        assert_eq!(config.keymap.quit, "q");
    }

    #[test]
    fn test_invalid_item_height_falls_back() {
        let config = WheelConfig {
            item_height: 0.0,
            ..Default::default()
        };
        assert_eq!(config.item_height(), default_item_height());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[wheel\n").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_default_spring_is_overdamped() {
        assert!(SpringConfig::default().damping_ratio() > 1.0);
    }

    #[test]
    fn test_env_flag() {
        assert!(env_flag(Some("1")));
        assert!(env_flag(Some("TRUE")));
        assert!(!env_flag(Some("0")));
        assert!(!env_flag(None));
    }
}
