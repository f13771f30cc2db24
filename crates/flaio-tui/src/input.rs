use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Advance,
    Retreat,
    OpenLink,
    NextTheme,
    PrevTheme,
    ToggleReducedMotion,
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, keymap: &Keymap, help_open: bool) -> Action {
    let action = keymap
        .get(&KeyBinding::new(key.code, key.modifiers))
        .copied()
        .unwrap_or(Action::None);

    if help_open {
        // any key closes help, quitting still works
        return match action {
            Action::Quit => Action::Quit,
            _ => Action::ExitMode,
        };
    }
    action
}

/// Mouse input after press/drag/release bookkeeping
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// One scroll notch; positive scrolls down
    Wheel { delta: f64 },
    /// A drag that began inside the drag area; `y` is in rows
    DragStart { y: f64 },
    DragMove { y: f64 },
    DragEnd,
    /// Press and release on the same cell, outside a drag
    Click { column: u16, row: u16 },
    /// Pointer position changed
    Hover { column: u16, row: u16 },
}

/// Turns raw mouse events into clicks and drags
#[derive(Debug, Clone, Default)]
pub struct MouseTracker {
    pressed: Option<(u16, u16)>,
    dragging: bool,
}

impl MouseTracker {
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Translate one event. Drags only start on presses inside `drag_area`.
    pub fn translate(
        &mut self,
        mouse: MouseEvent,
        notch: f64,
        drag_area: Rect,
    ) -> Vec<PointerEvent> {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollDown => vec![PointerEvent::Wheel { delta: notch }],
            MouseEventKind::ScrollUp => vec![PointerEvent::Wheel { delta: -notch }],
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = Some((column, row));
                self.dragging = false;
                vec![PointerEvent::Hover { column, row }]
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let mut out = vec![PointerEvent::Hover { column, row }];
                let Some((px, py)) = self.pressed else {
                    return out;
                };
                if !self.dragging {
                    if (px, py) == (column, row) {
                        return out;
                    }
                    if !drag_area.contains(Position::new(px, py)) {
                        return out;
                    }
                    self.dragging = true;
                    out.push(PointerEvent::DragStart { y: py as f64 });
                }
                out.push(PointerEvent::DragMove { y: row as f64 });
                out
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let pressed = self.pressed.take();
                if std::mem::take(&mut self.dragging) {
                    vec![PointerEvent::DragEnd]
                } else if pressed == Some((column, row)) {
                    vec![PointerEvent::Click { column, row }]
                } else {
                    // moved away from where it was pressed
                    Vec::new()
                }
            }
            MouseEventKind::Moved => vec![PointerEvent::Hover { column, row }],
            _ => Vec::new(),
        }
    }

    /// Forget any press in progress
    pub fn reset(&mut self) {
        self.pressed = None;
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    const AREA: Rect = Rect {
        x: 10,
        y: 0,
        width: 20,
        height: 15,
    };

    #[test]
    fn test_keys_map_to_actions() {
        let keymap = Keymap::default();
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &keymap, false), Action::Advance);
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &keymap, false), Action::None);
    }

    #[test]
    fn test_help_swallows_keys() {
        let keymap = Keymap::default();
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &keymap, true), Action::ExitMode);
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key, &keymap, true), Action::Quit);
    }

    #[test]
    fn test_scroll_notches() {
        let mut t = MouseTracker::default();
        assert_eq!(
            t.translate(mouse(MouseEventKind::ScrollDown, 0, 0), 100.0, AREA),
            vec![PointerEvent::Wheel { delta: 100.0 }]
        );
        assert_eq!(
            t.translate(mouse(MouseEventKind::ScrollUp, 0, 0), 100.0, AREA),
            vec![PointerEvent::Wheel { delta: -100.0 }]
        );
    }

    #[test]
    fn test_press_release_is_click() {
        let mut t = MouseTracker::default();
        t.translate(mouse(MouseEventKind::Down(MouseButton::Left), 12, 4), 100.0, AREA);
        let out = t.translate(mouse(MouseEventKind::Up(MouseButton::Left), 12, 4), 100.0, AREA);
        assert_eq!(out, vec![PointerEvent::Click { column: 12, row: 4 }]);
    }

    #[test]
    fn test_drag_in_area() {
        let mut t = MouseTracker::default();
        t.translate(mouse(MouseEventKind::Down(MouseButton::Left), 12, 7), 100.0, AREA);
        let out = t.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 5), 100.0, AREA);
        assert_eq!(
            out,
            vec![
                PointerEvent::Hover { column: 12, row: 5 },
                PointerEvent::DragStart { y: 7.0 },
                PointerEvent::DragMove { y: 5.0 },
            ]
        );
        assert!(t.is_dragging());
        let out = t.translate(mouse(MouseEventKind::Up(MouseButton::Left), 12, 5), 100.0, AREA);
        assert_eq!(out, vec![PointerEvent::DragEnd]);
        assert!(!t.is_dragging());
    }

    #[test]
    fn test_drag_outside_area_is_ignored() {
        let mut t = MouseTracker::default();
        t.translate(mouse(MouseEventKind::Down(MouseButton::Left), 50, 7), 100.0, AREA);
        let out = t.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 50, 5), 100.0, AREA);
        assert_eq!(out, vec![PointerEvent::Hover { column: 50, row: 5 }]);
        let out = t.translate(mouse(MouseEventKind::Up(MouseButton::Left), 50, 5), 100.0, AREA);
        assert!(out.is_empty());
    }

    #[test]
    fn test_release_elsewhere_is_not_a_click() {
        let mut t = MouseTracker::default();
        // pressed on the panel, released over the wheel
        t.translate(mouse(MouseEventKind::Down(MouseButton::Left), 50, 7), 100.0, AREA);
        t.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 12, 4), 100.0, AREA);
        let out = t.translate(mouse(MouseEventKind::Up(MouseButton::Left), 12, 4), 100.0, AREA);
        assert!(out.is_empty());

        // a press that wandered back to its cell still clicks
        t.translate(mouse(MouseEventKind::Down(MouseButton::Left), 50, 7), 100.0, AREA);
        t.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 51, 7), 100.0, AREA);
        let out = t.translate(mouse(MouseEventKind::Up(MouseButton::Left), 50, 7), 100.0, AREA);
        assert_eq!(out, vec![PointerEvent::Click { column: 50, row: 7 }]);
    }
}
