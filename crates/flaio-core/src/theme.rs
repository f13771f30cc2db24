//! Design themes and the process-wide theme signal.
//!
//! The signal is the only shared state between the app shell and themed
//! components. The shell writes it; components never read it directly but get
//! the current [`DesignTheme`] passed in when the shell relays a change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// One of the six visual presentations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignTheme {
    #[default]
    Editorial,
    Terminal,
    Cyberpunk,
    Minimal,
    Brutalist,
    Retro,
}

impl DesignTheme {
    /// All themes in toggle order
    pub const ALL: [DesignTheme; 6] = [
        DesignTheme::Editorial,
        DesignTheme::Terminal,
        DesignTheme::Cyberpunk,
        DesignTheme::Minimal,
        DesignTheme::Brutalist,
        DesignTheme::Retro,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DesignTheme::Editorial => "editorial",
            DesignTheme::Terminal => "terminal",
            DesignTheme::Cyberpunk => "cyberpunk",
            DesignTheme::Minimal => "minimal",
            DesignTheme::Brutalist => "brutalist",
            DesignTheme::Retro => "retro",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DesignTheme::Editorial => "Editorial",
            DesignTheme::Terminal => "Terminal",
            DesignTheme::Cyberpunk => "Cyberpunk",
            DesignTheme::Minimal => "Minimal",
            DesignTheme::Brutalist => "Brutalist",
            DesignTheme::Retro => "Retro",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DesignTheme::Editorial => "Serif luxury",
            DesignTheme::Terminal => "Hacker green",
            DesignTheme::Cyberpunk => "Neon future",
            DesignTheme::Minimal => "Clean & minimal",
            DesignTheme::Brutalist => "Raw & loud",
            DesignTheme::Retro => "CRT amber",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next theme in toggle order, wrapping
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous theme in toggle order, wrapping
    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for DesignTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DesignTheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "editorial" => Ok(DesignTheme::Editorial),
            "terminal" => Ok(DesignTheme::Terminal),
            "cyberpunk" => Ok(DesignTheme::Cyberpunk),
            // older stored preferences say "apple"
            "minimal" | "apple" => Ok(DesignTheme::Minimal),
            "brutalist" => Ok(DesignTheme::Brutalist),
            "retro" => Ok(DesignTheme::Retro),
            other => Err(Error::UnknownTheme(other.to_string())),
        }
    }
}

/// Handle returned by [`ThemeSignal::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(DesignTheme)>;

/// Observable holder of the active theme.
///
/// Subscribers run synchronously inside [`ThemeSignal::set`], in subscription
/// order, and only when the value actually changes.
pub struct ThemeSignal {
    current: DesignTheme,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Default for ThemeSignal {
    fn default() -> Self {
        Self::new(DesignTheme::default())
    }
}

impl fmt::Debug for ThemeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSignal")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ThemeSignal {
    pub fn new(initial: DesignTheme) -> Self {
        Self {
            current: initial,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    #[inline]
    pub fn get(&self) -> DesignTheme {
        self.current
    }

    /// Change the theme. Returns false (and notifies nobody) if unchanged.
    pub fn set(&mut self, theme: DesignTheme) -> bool {
        if theme == self.current {
            return false;
        }
        debug!(from = %self.current, to = %theme, "theme changed");
        self.current = theme;
        for (_, listener) in self.listeners.iter_mut() {
            listener(theme);
        }
        true
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(DesignTheme) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Drop every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
