//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic millisecond clock)
//! - Frame callback registration lifetime
//! - Errors raised while wiring up the page

pub mod frame;
pub mod time;

pub use frame::FrameRegistration;
pub use time::{Clock, ManualClock, SystemClock};

use std::fmt;

/// Failures while attaching to the host page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    NoWindow,
    NoDocument,
    MissingElement { id: String },
    NotACanvas { id: String },
    NoPerformance,
    Graphics(String),
    /// The page refused a listener or frame callback
    Callback(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::MissingElement { id } => write!(f, "no element with id '{}'", id),
            Self::NotACanvas { id } => write!(f, "element '{}' is not a canvas", id),
            Self::NoPerformance => write!(f, "performance timer unavailable"),
            Self::Graphics(msg) => write!(f, "graphics setup failed: {}", msg),
            Self::Callback(msg) => write!(f, "callback registration failed: {}", msg),
        }
    }
}

impl std::error::Error for PlatformError {}
