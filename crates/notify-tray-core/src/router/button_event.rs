use crate::message::{
    WM_LBUTTONDBLCLK, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDBLCLK, WM_MBUTTONDOWN,
    WM_MBUTTONUP, WM_RBUTTONDBLCLK, WM_RBUTTONDOWN, WM_RBUTTONUP,
};

/// Cursor position reported with a tray button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal screen coordinate.
    pub x: i32,
    /// Vertical screen coordinate.
    pub y: i32,
}

/// Mouse button that produced a tray event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
}

/// What the button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    /// Pressed.
    Down,
    /// Released.
    Up,
    /// Double-clicked.
    DoubleClick,
}

/// One of the nine button events a tray icon reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonEvent {
    /// Button involved.
    pub button: MouseButton,
    /// Action performed.
    pub action: ButtonAction,
}

impl ButtonEvent {
    /// Number of distinct button events.
    pub const COUNT: usize = 9;

    /// Every event, in router slot order.
    pub const ALL: [ButtonEvent; Self::COUNT] = [
        Self::new(MouseButton::Left, ButtonAction::Down),
        Self::new(MouseButton::Left, ButtonAction::Up),
        Self::new(MouseButton::Left, ButtonAction::DoubleClick),
        Self::new(MouseButton::Middle, ButtonAction::Down),
        Self::new(MouseButton::Middle, ButtonAction::Up),
        Self::new(MouseButton::Middle, ButtonAction::DoubleClick),
        Self::new(MouseButton::Right, ButtonAction::Down),
        Self::new(MouseButton::Right, ButtonAction::Up),
        Self::new(MouseButton::Right, ButtonAction::DoubleClick),
    ];

    /// Pair a button with an action.
    pub const fn new(button: MouseButton, action: ButtonAction) -> Self {
        Self { button, action }
    }

    /// Decode a callback sub-message. Unknown identifiers yield `None`.
    pub fn from_message(id: u32) -> Option<Self> {
        let (button, action) = match id {
            WM_LBUTTONDOWN => (MouseButton::Left, ButtonAction::Down),
            WM_LBUTTONUP => (MouseButton::Left, ButtonAction::Up),
            WM_LBUTTONDBLCLK => (MouseButton::Left, ButtonAction::DoubleClick),
            WM_MBUTTONDOWN => (MouseButton::Middle, ButtonAction::Down),
            WM_MBUTTONUP => (MouseButton::Middle, ButtonAction::Up),
            WM_MBUTTONDBLCLK => (MouseButton::Middle, ButtonAction::DoubleClick),
            WM_RBUTTONDOWN => (MouseButton::Right, ButtonAction::Down),
            WM_RBUTTONUP => (MouseButton::Right, ButtonAction::Up),
            WM_RBUTTONDBLCLK => (MouseButton::Right, ButtonAction::DoubleClick),
            _ => return None,
        };

        Some(Self::new(button, action))
    }

    /// The window message identifier for this event.
    pub fn message_id(self) -> u32 {
        match (self.button, self.action) {
            (MouseButton::Left, ButtonAction::Down) => WM_LBUTTONDOWN,
            (MouseButton::Left, ButtonAction::Up) => WM_LBUTTONUP,
            (MouseButton::Left, ButtonAction::DoubleClick) => WM_LBUTTONDBLCLK,
            (MouseButton::Middle, ButtonAction::Down) => WM_MBUTTONDOWN,
            (MouseButton::Middle, ButtonAction::Up) => WM_MBUTTONUP,
            (MouseButton::Middle, ButtonAction::DoubleClick) => WM_MBUTTONDBLCLK,
            (MouseButton::Right, ButtonAction::Down) => WM_RBUTTONDOWN,
            (MouseButton::Right, ButtonAction::Up) => WM_RBUTTONUP,
            (MouseButton::Right, ButtonAction::DoubleClick) => WM_RBUTTONDBLCLK,
        }
    }

    pub(crate) fn slot(self) -> usize {
        let button = match self.button {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        };
        let action = match self.action {
            ButtonAction::Down => 0,
            ButtonAction::Up => 1,
            ButtonAction::DoubleClick => 2,
        };
        button * 3 + action
    }
}
