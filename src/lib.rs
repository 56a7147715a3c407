pub mod config;
pub mod device;
pub mod reset;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export the public surface of both utilities
pub use crate::{
    device::{
        DeviceInfo, DeviceType, ManualViewport, Subscription, ViewportProvider, classify,
        device_info, device_type, is_desktop, is_full_hd, is_mobile, is_tablet, is_widescreen,
        on_device_change,
    },
    reset::{FieldReseter, ObjectRule, ResetOptions, ResetRules, reset_fields, reset_struct},
};
