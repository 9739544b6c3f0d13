//! Input event vocabulary.
//!
//! Hosts translate their native keyboard, focus and text-input events into
//! these types before forwarding them to the controller.

/// A logical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key producing a printable character.
    Character(char),
    Space,
    Backspace,
    Delete,
    Tab,
    Enter,
    Shift,
    Control,
    Alt,
    Meta,
    CapsLock,
    Escape,
    PageUp,
    PageDown,
    End,
    Home,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Insert,
    NumLock,
    ScrollLock,
    Pause,
    /// Function key `F1`..=`F24`.
    Function(u8),
    /// A key without a dedicated variant, by legacy key code.
    Other(u32),
}

impl Key {
    /// Translate a legacy DOM key code (`KeyboardEvent.which`).
    pub fn from_key_code(code: u32) -> Self {
        match code {
            8 => Self::Backspace,
            9 => Self::Tab,
            13 => Self::Enter,
            16 => Self::Shift,
            17 => Self::Control,
            18 => Self::Alt,
            19 => Self::Pause,
            20 => Self::CapsLock,
            27 => Self::Escape,
            32 => Self::Space,
            33 => Self::PageUp,
            34 => Self::PageDown,
            35 => Self::End,
            36 => Self::Home,
            37 => Self::ArrowLeft,
            38 => Self::ArrowUp,
            39 => Self::ArrowRight,
            40 => Self::ArrowDown,
            45 => Self::Insert,
            46 => Self::Delete,
            91 | 92 | 93 => Self::Meta,
            112..=135 => Self::Function((code - 111) as u8),
            144 => Self::NumLock,
            145 => Self::ScrollLock,
            48..=57 | 65..=90 => match char::from_u32(code) {
                Some(c) => Self::Character(c.to_ascii_lowercase()),
                None => Self::Other(code),
            },
            _ => Self::Other(code),
        }
    }

    /// Whether this is a function key `F1`..=`F15`.
    pub fn is_low_function_key(self) -> bool {
        matches!(self, Self::Function(1..=15))
    }
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only control held.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key event with no modifiers.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// A key event with the given modifiers.
    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Whether the control key is involved, either held or pressed itself.
    pub fn is_control(&self) -> bool {
        self.modifiers.ctrl || self.key == Key::Control
    }

    /// Whether this key only moves, toggles or controls, and never edits text.
    ///
    /// Such keys must not start a new lookup when they reach the text-input
    /// path.
    pub fn is_control_or_navigation(&self) -> bool {
        if self.is_control() || self.key.is_low_function_key() {
            return true;
        }
        matches!(
            self.key,
            Key::Tab
                | Key::Enter
                | Key::Shift
                | Key::CapsLock
                | Key::Escape
                | Key::PageUp
                | Key::PageDown
                | Key::End
                | Key::Home
                | Key::ArrowLeft
                | Key::ArrowUp
                | Key::ArrowRight
                | Key::ArrowDown
                | Key::Insert
                | Key::NumLock
                | Key::ScrollLock
                | Key::Pause
        )
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// How a text-input event was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputKind {
    /// Ordinary typing or deletion.
    Typing,
    /// Text pasted from the clipboard.
    Paste,
    /// The host could not tell.
    #[default]
    Unknown,
}

impl InputKind {
    /// Whether input of this kind should search without waiting for a
    /// quiet period.
    pub fn is_discrete(self) -> bool {
        matches!(self, Self::Paste | Self::Unknown)
    }
}

/// Where focus went when an input lost it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusTarget {
    /// Focus left the document or went nowhere in particular.
    #[default]
    None,
    /// Focus moved to a link row inside the dropdown.
    DropdownLink,
    /// Focus moved to some other element.
    Elsewhere,
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}
