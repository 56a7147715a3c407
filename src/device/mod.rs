//! Responsive breakpoint detection
//!
//! Classifies a viewport width into one of five device categories and lets
//! observers follow the category while the viewport is resized:
//! - `DeviceType`: the breakpoint table and pure classification
//! - `ViewportProvider`: the host environment (dimensions and resize events)
//! - `on_device_change`: resize subscription with an immediate first snapshot

mod viewport;
mod watcher;

use serde::{Deserialize, Serialize};

pub use viewport::{ListenerId, ManualViewport, ResizeHandler, ViewportProvider};
#[cfg(feature = "mock")]
pub use viewport::MockViewportProvider;
pub use watcher::{Subscription, on_device_change};

/// Device size category, ordered from the narrowest to the widest viewport
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Mobile,
    Tablet,
    Desktop,
    Widescreen,
    FullHd,
}

impl DeviceType {
    pub const TABLET_MIN_WIDTH: f64 = 769.0;
    pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;
    pub const WIDESCREEN_MIN_WIDTH: f64 = 1216.0;
    pub const FULLHD_MIN_WIDTH: f64 = 1408.0;

    /// Classify a viewport width
    ///
    /// Thresholds are checked from the widest down and the first match wins.
    /// Every input maps to a category: negative widths and NaN are `Mobile`.
    pub fn from_width(width: f64) -> Self {
        if width >= Self::FULLHD_MIN_WIDTH {
            Self::FullHd
        } else if width >= Self::WIDESCREEN_MIN_WIDTH {
            Self::Widescreen
        } else if width >= Self::DESKTOP_MIN_WIDTH {
            Self::Desktop
        } else if width >= Self::TABLET_MIN_WIDTH {
            Self::Tablet
        } else {
            Self::Mobile
        }
    }

    /// Lowest width that still belongs to this category
    pub fn min_width(self) -> f64 {
        match self {
            Self::Mobile => 0.0,
            Self::Tablet => Self::TABLET_MIN_WIDTH,
            Self::Desktop => Self::DESKTOP_MIN_WIDTH,
            Self::Widescreen => Self::WIDESCREEN_MIN_WIDTH,
            Self::FullHd => Self::FULLHD_MIN_WIDTH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
            Self::Widescreen => "widescreen",
            Self::FullHd => "fullhd",
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }

    pub fn is_tablet(self) -> bool {
        self == Self::Tablet
    }

    pub fn is_desktop(self) -> bool {
        self == Self::Desktop
    }

    pub fn is_widescreen(self) -> bool {
        self == Self::Widescreen
    }

    pub fn is_full_hd(self) -> bool {
        self == Self::FullHd
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`DeviceType::from_width`]
pub fn classify(width: f64) -> DeviceType {
    DeviceType::from_width(width)
}

/// Snapshot of the viewport at the time it was taken
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceInfo {
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub width: u32,
    pub height: u32,
}

impl DeviceInfo {
    /// Build a snapshot from raw viewport dimensions
    pub fn from_dimensions(width: f64, height: f64) -> Self {
        Self {
            device_type: DeviceType::from_width(width),
            width: to_pixels(width),
            height: to_pixels(height),
        }
    }
}

// float-to-int casts saturate and map NaN to 0
fn to_pixels(value: f64) -> u32 {
    value.max(0.0).floor() as u32
}

/// Classify the provider's current width
pub fn device_type<P: ViewportProvider + ?Sized>(provider: &P) -> DeviceType {
    DeviceType::from_width(provider.inner_width())
}

/// Sample the provider's current dimensions
pub fn device_info<P: ViewportProvider + ?Sized>(provider: &P) -> DeviceInfo {
    DeviceInfo::from_dimensions(provider.inner_width(), provider.inner_height())
}

pub fn is_mobile<P: ViewportProvider + ?Sized>(provider: &P) -> bool {
    device_type(provider).is_mobile()
}

pub fn is_tablet<P: ViewportProvider + ?Sized>(provider: &P) -> bool {
    device_type(provider).is_tablet()
}

pub fn is_desktop<P: ViewportProvider + ?Sized>(provider: &P) -> bool {
    device_type(provider).is_desktop()
}

pub fn is_widescreen<P: ViewportProvider + ?Sized>(provider: &P) -> bool {
    device_type(provider).is_widescreen()
}

pub fn is_full_hd<P: ViewportProvider + ?Sized>(provider: &P) -> bool {
    device_type(provider).is_full_hd()
}
