use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use flaio_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Runtime keymap for key-to-action lookup
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();

        let mut add_binding = |key_str: &str, action: Action| {
            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', ignoring", key_str);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.advance, Action::Advance);
        add_binding(&config.retreat, Action::Retreat);
        add_binding(&config.open_link, Action::OpenLink);
        add_binding(&config.next_theme, Action::NextTheme);
        add_binding(&config.prev_theme, Action::PrevTheme);
        add_binding(&config.toggle_reduced_motion, Action::ToggleReducedMotion);
        add_binding(&config.help, Action::ToggleHelp);

        // Always available regardless of config
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::Advance);
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::Retreat);
        bindings.entry(KeyBinding::simple(KeyCode::Enter)).or_insert(Action::OpenLink);
        bindings.insert(KeyBinding::simple(KeyCode::Esc), Action::ExitMode);

        Self { bindings }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding).or_else(|| {
            // terminals disagree on whether '?' and 'T' carry SHIFT
            let KeyCode::Char(c) = binding.code else {
                return None;
            };
            if binding.modifiers == KeyModifiers::SHIFT && !c.is_ascii_alphabetic() {
                return self.bindings.get(&KeyBinding::simple(binding.code));
            }
            if binding.modifiers == KeyModifiers::NONE && c.is_ascii_uppercase() {
                return self.bindings.get(&KeyBinding::shift(binding.code));
            }
            None
        })
    }

    /// First key bound to `action`, in config notation, for hints
    pub fn hint(&self, action: Action) -> Option<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(b, _)| describe(b))
            .collect();
        keys.sort_by_key(|k| (k.len(), k.clone()));
        keys.into_iter().next()
    }
}

fn describe(binding: &KeyBinding) -> String {
    let name = match binding.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "⏎".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        other => format!("{:?}", other),
    };
    if binding.modifiers.contains(KeyModifiers::CONTROL) {
        format!("C-{}", name)
    } else {
        name
    }
}

/// Parse a binding from config notation.
///
/// A bare character binds that key; an uppercase letter implies SHIFT.
/// Named keys go in angle brackets with an optional `C-` or `S-` prefix:
/// `<CR>`, `<Space>`, `<C-n>`, `<S-Tab>`.
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
        if inner.is_empty() {
            return None;
        }
        let (modifiers, name) = if let Some(name) = inner.strip_prefix("C-") {
            (KeyModifiers::CONTROL, name)
        } else if let Some(name) = inner.strip_prefix("S-") {
            (KeyModifiers::SHIFT, name)
        } else {
            (KeyModifiers::NONE, inner)
        };
        return named_key(name).map(|code| KeyBinding::new(code, modifiers));
    }

    let c = single_char(s)?;
    let modifiers = if c.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    Some(KeyBinding::new(KeyCode::Char(c), modifiers))
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn named_key(name: &str) -> Option<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        // "<C-n>" style
        other => KeyCode::Char(single_char(other)?),
    };
    Some(code)
}
