//! Key bindings and text views
//!
//! Turns terminal key events into tick inputs and a `HudSnapshot` into the
//! lines the driver draws. No terminal I/O happens here.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{GamePhase, HudSnapshot, TickInput};

/// A set of key chords bound to one input, with its help text
#[derive(Debug, Clone)]
pub struct KeyBinding {
    chords: Vec<(KeyCode, KeyModifiers)>,
    pub help_key: &'static str,
    pub help_desc: &'static str,
}

impl KeyBinding {
    pub fn new(chords: &[(KeyCode, KeyModifiers)], help_key: &'static str, help_desc: &'static str) -> Self {
        Self {
            chords: chords.to_vec(),
            help_key,
            help_desc,
        }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.chords
            .iter()
            .any(|(code, mods)| key.code == *code && key.modifiers.contains(*mods))
    }
}

/// Game key bindings
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub action: KeyBinding,
    pub quit: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            action: KeyBinding::new(&[(KeyCode::Char(' '), KeyModifiers::NONE)], "space", "jump"),
            quit: KeyBinding::new(
                &[
                    (KeyCode::Char('c'), KeyModifiers::CONTROL),
                    (KeyCode::Char('q'), KeyModifiers::NONE),
                ],
                "q",
                "abort",
            ),
        }
    }
}

impl KeyMap {
    /// Input for a key event, if it is bound
    pub fn input_for(&self, key: &KeyEvent) -> Option<TickInput> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        // Quit first so ctrl+c is never read as anything else
        if self.quit.matches(key) {
            Some(TickInput::Quit)
        } else if self.action.matches(key) {
            Some(TickInput::Impulse)
        } else {
            None
        }
    }

    /// One-line help, e.g. `space jump • q abort`
    pub fn short_help(&self) -> String {
        [&self.action, &self.quit]
            .iter()
            .map(|b| format!("{} {}", b.help_key, b.help_desc))
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

/// Lines to draw for the current phase
pub fn render_view(hud: &HudSnapshot, keymap: &KeyMap, show_help: bool) -> Vec<String> {
    match hud.phase {
        GamePhase::Starting => vec!["<< READY >>".to_string()],
        GamePhase::Playing => {
            let mut lines = vec![
                format!("{:<20}{}m", "CUR ALTITUDE:", hud.altitude),
                format!("{:<20}{}m", "NEXT GATE CEILING:", hud.gate_upper),
                format!("{:<20}{}m", "NEXT GATE FLOOR:", hud.gate_lower),
                format!("{:<20}{}m", "NEXT GATE IN:", hud.distance_to_next_gate),
                format!("{:<20}{}ms", "MISSION CLOCK:", hud.elapsed_ms),
            ];
            if show_help {
                lines.push(keymap.short_help());
            }
            lines
        }
        GamePhase::Dead => vec!["<< DEAD >>".to_string()],
        GamePhase::Exiting => vec!["<< MISSION ABORTED >>".to_string()],
    }
}
