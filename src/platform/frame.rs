//! Frame callback registration
//!
//! Exactly one per-frame callback is live while a run is in progress. The
//! registration owns the means to cancel it, and cancels on release or drop,
//! so a torn-down view never keeps a callback mutating state.

/// Owned handle to a registered per-frame callback
pub struct FrameRegistration {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl FrameRegistration {
    /// Wrap a registration; `cancel` deregisters it
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn is_live(&self) -> bool {
        self.cancel.is_some()
    }

    /// Deregister now. Further calls do nothing.
    pub fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for FrameRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for FrameRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRegistration")
            .field("live", &self.is_live())
            .finish()
    }
}
