//! Clock sources
//!
//! The simulation is driven by millisecond timestamps.
//! - Native: `std::time::Instant` relative to clock creation
//! - WASM: `performance.now()`

use std::cell::Cell;

use super::PlatformError;

/// Monotonic, non-negative millisecond clock
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Real clock for the current platform
#[cfg(not(target_arch = "wasm32"))]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Result<Self, PlatformError> {
        Ok(Self {
            origin: std::time::Instant::now(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(target_arch = "wasm32")]
pub struct SystemClock {
    performance: web_sys::Performance,
}

#[cfg(target_arch = "wasm32")]
impl SystemClock {
    pub fn new() -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let performance = window.performance().ok_or(PlatformError::NoPerformance)?;
        Ok(Self { performance })
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.performance.now()
    }
}

/// Hand-driven clock for headless runs and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn starting_at(ms: f64) -> Self {
        Self { now: Cell::new(ms) }
    }

    pub fn advance(&self, ms: f64) {
        // Never run backwards
        self.now.set(self.now.get() + ms.max(0.0));
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms.max(self.now.get()));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
