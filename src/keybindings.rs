use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::window::PanelKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ToggleTheme,
    /// Restore the panel's window if minimized, minimize it otherwise.
    TogglePanel(PanelKind),
    /// Begin the close animation on every visible window.
    CloseAll,
    /// Focus the next visible window in stacking order.
    CycleFocus,
}

/// A key press reduced to the parts bindings care about. Event kind and
/// state are deliberately ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl Chord {
    pub fn bare(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::CONTROL,
        }
    }

    fn of(key: &KeyEvent) -> Self {
        Self {
            code: key.code,
            mods: key.modifiers,
        }
    }
}

/// Chord-to-action table. Rebinding a chord replaces its old action.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    table: HashMap<Chord, Action>,
}

impl KeyMap {
    pub fn bind(&mut self, chord: Chord, action: Action) {
        self.table.insert(chord, action);
    }

    pub fn lookup(&self, key: &KeyEvent) -> Option<Action> {
        self.table.get(&Chord::of(key)).copied()
    }

    /// The stock bindings: q or Ctrl+C quits, t flips the theme, digits
    /// 1-6 toggle the windows in dock order, 0 closes everything and Tab
    /// walks the visible stack.
    pub fn stock() -> Self {
        let mut keymap = Self::default();
        keymap.bind(Chord::bare(KeyCode::Char('q')), Action::Quit);
        keymap.bind(Chord::ctrl(KeyCode::Char('c')), Action::Quit);
        keymap.bind(Chord::bare(KeyCode::Char('t')), Action::ToggleTheme);
        for (index, kind) in PanelKind::ALL.iter().enumerate() {
            let digit = char::from(b'1' + index as u8);
            keymap.bind(Chord::bare(KeyCode::Char(digit)), Action::TogglePanel(*kind));
        }
        keymap.bind(Chord::bare(KeyCode::Char('0')), Action::CloseAll);
        keymap.bind(Chord::bare(KeyCode::Tab), Action::CycleFocus);
        keymap
    }
}
