mod descriptor;
mod tooltip;
mod tray_registration;

pub use {
    descriptor::{DescriptorFlags, NOTIFYICON_VERSION_4, TrayDescriptor},
    tooltip::{TOOLTIP_CAPACITY, Tooltip},
};

pub(crate) use tray_registration::TrayRegistration;
