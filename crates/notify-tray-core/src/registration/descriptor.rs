use crate::{CALLBACK_MESSAGE, ImageHandle, Tooltip, WindowHandle};

use std::ops::{BitOr, BitOrAssign};

/// Callback protocol version requested with `SetVersion`.
pub const NOTIFYICON_VERSION_4: u32 = 4;

/// Bitmask of the populated descriptor fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DescriptorFlags(u32);

impl DescriptorFlags {
    /// `uCallbackMessage` is valid.
    pub const MESSAGE: Self = Self(0x0000_0001);
    /// `hIcon` is valid.
    pub const ICON: Self = Self(0x0000_0002);
    /// `szTip` is valid.
    pub const TIP: Self = Self(0x0000_0004);

    /// Raw bit pattern.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DescriptorFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DescriptorFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// The structure submitted to the shell for one icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayDescriptor {
    /// Window that receives callback messages.
    pub window: WindowHandle,
    /// Identifier of the callback message.
    pub callback_message: u32,
    /// Tooltip text.
    pub tooltip: Tooltip,
    /// Image shown in the notification area, if any.
    pub icon: Option<ImageHandle>,
    /// Requested callback protocol version.
    pub version: u32,
    /// Which of the fields above are populated.
    pub flags: DescriptorFlags,
}

impl TrayDescriptor {
    /// Describe an icon owned by `window`.
    pub fn new(window: WindowHandle, tooltip: Tooltip, icon: Option<ImageHandle>) -> Self {
        let mut descriptor = Self {
            window,
            callback_message: CALLBACK_MESSAGE,
            tooltip,
            icon: None,
            version: NOTIFYICON_VERSION_4,
            flags: DescriptorFlags::default(),
        };

        descriptor.set_icon(icon);
        descriptor
    }

    /// Replace the image and keep the icon flag in step with it.
    pub fn set_icon(&mut self, icon: Option<ImageHandle>) {
        self.icon = icon;
        self.flags = DescriptorFlags::TIP | DescriptorFlags::MESSAGE;
        if icon.is_some() {
            self.flags |= DescriptorFlags::ICON;
        }
    }
}
