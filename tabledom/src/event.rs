/// High-level events with element targeting.
///
/// Pointer coordinates are host pixels. Targets are element IDs resolved
/// by hit testing (clickable elements for `Click`, any element for the
/// pointer and drag family).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Key press, targeted at the focused element.
    Key {
        target: Option<String>,
        key: Key,
        modifiers: Modifiers,
    },
    /// Activation of a clickable element (or of nothing, when the press
    /// landed outside every clickable element).
    Click {
        target: Option<String>,
        x: f64,
        y: f64,
        button: PointerButton,
    },
    /// Pointer pressed.
    PointerDown {
        target: Option<String>,
        x: f64,
        y: f64,
        button: PointerButton,
    },
    /// Pointer moved while pressed or hovering.
    PointerMove { x: f64, y: f64 },
    /// Pointer released.
    PointerUp {
        target: Option<String>,
        x: f64,
        y: f64,
        button: PointerButton,
    },
    /// Pointer gesture aborted by the host.
    PointerCancel,
    /// A drag gesture started on a draggable element.
    DragStart { target: String },
    /// The drag pointer is over `target` (None while over nothing).
    DragOver {
        target: Option<String>,
        x: f64,
        y: f64,
    },
    /// The drag pointer left `target`.
    DragLeave { target: String },
    /// The drag was released over `target`.
    Drop { target: Option<String> },
    /// The drag gesture ended (always follows Drop, and also fires alone
    /// for cancelled drags).
    DragEnd,
    /// The host window lost focus.
    WindowBlur,
}

/// Simplified key representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Char('\0'), // Placeholder for unsupported keys
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for PointerButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => PointerButton::Left,
            CtBtn::Right => PointerButton::Right,
            CtBtn::Middle => PointerButton::Middle,
        }
    }
}
