//! Keyboard shortcuts.
//!
//! Shortcuts are written in the conventional `"ctrl+shift+z"` form; `meta`
//! is accepted as a synonym for `ctrl` so one table serves both macOS-style
//! and PC-style bindings. The keymap resolves a key event to an
//! [`EditorAction`] the controller then performs.

/// An editor operation a shortcut can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorAction {
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,
    Delete,
    SelectAll,
}

/// A normalized key chord: the main key plus modifier flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortcut {
    /// Lowercased key name: a single character, or names like `"delete"`.
    pub key: String,
    /// Set for both the control and the platform command key.
    pub command: bool,
    pub shift: bool,
}

impl Shortcut {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into().to_lowercase(),
            command: false,
            shift: false,
        }
    }

    pub fn with_command(mut self) -> Self {
        self.command = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Parse a `"ctrl+shift+z"` style binding.
    ///
    /// Modifiers may come in any order; exactly one non-modifier key is
    /// required. Returns `None` for empty or malformed bindings.
    pub fn parse(binding: &str) -> Option<Self> {
        let mut command = false;
        let mut shift = false;
        let mut key: Option<String> = None;

        for part in binding.split('+') {
            let part = part.trim().to_lowercase();
            match part.as_str() {
                "" => return None,
                "ctrl" | "meta" | "cmd" => command = true,
                "shift" => shift = true,
                _ => {
                    if key.is_some() {
                        return None;
                    }
                    key = Some(part);
                }
            }
        }

        Some(Self {
            key: key?,
            command,
            shift,
        })
    }

    /// The chord for a raw key event.
    pub fn from_event(key: &str, command: bool, shift: bool) -> Self {
        Self {
            key: key.to_lowercase(),
            command,
            shift,
        }
    }
}

/// Ordered shortcut table.
pub struct Keymap {
    bindings: Vec<(Shortcut, EditorAction)>,
}

impl Keymap {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind a `"ctrl+c"` style chord. Returns `false` for unparseable
    /// bindings. Later bindings win over earlier ones for the same chord.
    pub fn bind(&mut self, binding: &str, action: EditorAction) -> bool {
        match Shortcut::parse(binding) {
            Some(shortcut) => {
                self.bindings.retain(|(s, _)| *s != shortcut);
                self.bindings.push((shortcut, action));
                true
            }
            None => false,
        }
    }

    pub fn lookup(&self, shortcut: &Shortcut) -> Option<EditorAction> {
        self.bindings
            .iter()
            .find(|(s, _)| s == shortcut)
            .map(|(_, action)| *action)
    }

    /// Resolve a raw key event to an action.
    pub fn resolve(&self, key: &str, command: bool, shift: bool) -> Option<EditorAction> {
        self.lookup(&Shortcut::from_event(key, command, shift))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        default_keymap()
    }
}

/// The standard editor binding table.
pub fn default_keymap() -> Keymap {
    let mut keymap = Keymap::empty();
    keymap.bind("ctrl+c", EditorAction::Copy);
    keymap.bind("ctrl+x", EditorAction::Cut);
    keymap.bind("ctrl+v", EditorAction::Paste);
    keymap.bind("ctrl+z", EditorAction::Undo);
    keymap.bind("ctrl+shift+z", EditorAction::Redo);
    keymap.bind("ctrl+a", EditorAction::SelectAll);
    keymap.bind("delete", EditorAction::Delete);
    keymap.bind("backspace", EditorAction::Delete);
    keymap
}
