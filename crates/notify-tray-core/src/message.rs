//! Raw window message identifiers and parameter decoding.
//!
//! Values match the Win32 headers so the dispatch state machine can be
//! driven without the windowing subsystem present.

/// Sent when a window is being destroyed.
pub const WM_DESTROY: u32 = 0x0002;
/// Sent as a request to close a window.
pub const WM_CLOSE: u32 = 0x0010;
/// Sent when a menu item is chosen.
pub const WM_COMMAND: u32 = 0x0111;
/// First identifier available for private window messages.
pub const WM_USER: u32 = 0x0400;

/// Left button pressed.
pub const WM_LBUTTONDOWN: u32 = 0x0201;
/// Left button released.
pub const WM_LBUTTONUP: u32 = 0x0202;
/// Left button double-clicked.
pub const WM_LBUTTONDBLCLK: u32 = 0x0203;
/// Right button pressed.
pub const WM_RBUTTONDOWN: u32 = 0x0204;
/// Right button released.
pub const WM_RBUTTONUP: u32 = 0x0205;
/// Right button double-clicked.
pub const WM_RBUTTONDBLCLK: u32 = 0x0206;
/// Middle button pressed.
pub const WM_MBUTTONDOWN: u32 = 0x0207;
/// Middle button released.
pub const WM_MBUTTONUP: u32 = 0x0208;
/// Middle button double-clicked.
pub const WM_MBUTTONDBLCLK: u32 = 0x0209;

/// Message the shell sends to the owner window for tray interaction.
pub const CALLBACK_MESSAGE: u32 = WM_USER;

/// One message as delivered to a window procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    /// Message identifier.
    pub id: u32,
    /// First message parameter.
    pub wparam: usize,
    /// Second message parameter.
    pub lparam: isize,
}

impl Message {
    /// Build a message from its raw parts.
    pub fn new(id: u32, wparam: usize, lparam: isize) -> Self {
        Self { id, wparam, lparam }
    }
}

/// Low-order 16 bits of a message parameter.
pub fn low_word(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}

/// Bits 16..32 of a message parameter.
pub fn high_word(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

/// Signed x coordinate packed in the low word.
pub fn x_coordinate(value: usize) -> i32 {
    i32::from(low_word(value) as i16)
}

/// Signed y coordinate packed in the high word.
pub fn y_coordinate(value: usize) -> i32 {
    i32::from(high_word(value) as i16)
}

/// Pack a coordinate pair the way the shell does for version 4 callbacks.
pub fn pack_coordinates(x: i32, y: i32) -> usize {
    let low = (x as i16 as u16) as usize;
    let high = (y as i16 as u16) as usize;
    low | (high << 16)
}
