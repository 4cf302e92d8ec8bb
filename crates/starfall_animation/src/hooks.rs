//! Lifecycle hooks
//!
//! Hooks are attached per `start()` call and run synchronously inside
//! `tick()`. Each hook receives the host, so an end hook can re-enable the
//! control that triggered the effect or remove a transient entity.
//!
//! # Example
//!
//! ```rust
//! use starfall_animation::EffectHooks;
//! use starfall_core::PropertyStore;
//!
//! let hooks: EffectHooks<PropertyStore> = EffectHooks::new()
//!     .on_start(|handle, _host| println!("{handle:?} started"))
//!     .on_end(|handle, _host| println!("{handle:?} finished"));
//! # let _ = hooks;
//! ```

use crate::instance::Sample;
use crate::scheduler::EffectHandle;

/// Called once when the effect moves from Pending to Running
pub type StartHook<H> = Box<dyn FnMut(EffectHandle, &mut H) + Send>;

/// Called for every value written to the host
pub type ProgressHook<H> = Box<dyn FnMut(EffectHandle, &Sample, &mut H) + Send>;

/// Called once after the last member completes; never after a cancel
pub type EndHook<H> = Box<dyn FnMut(EffectHandle, &mut H) + Send>;

/// Optional callbacks for one started effect
pub struct EffectHooks<H> {
    start: Option<StartHook<H>>,
    progress: Option<ProgressHook<H>>,
    end: Option<EndHook<H>>,
}

impl<H> EffectHooks<H> {
    /// No callbacks
    pub fn new() -> Self {
        Self {
            start: None,
            progress: None,
            end: None,
        }
    }

    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: FnMut(EffectHandle, &mut H) + Send + 'static,
    {
        self.start = Some(Box::new(f));
        self
    }

    pub fn on_progress<F>(mut self, f: F) -> Self
    where
        F: FnMut(EffectHandle, &Sample, &mut H) + Send + 'static,
    {
        self.progress = Some(Box::new(f));
        self
    }

    pub fn on_end<F>(mut self, f: F) -> Self
    where
        F: FnMut(EffectHandle, &mut H) + Send + 'static,
    {
        self.end = Some(Box::new(f));
        self
    }

    pub(crate) fn fire_start(&mut self, handle: EffectHandle, host: &mut H) {
        if let Some(f) = self.start.as_mut() {
            f(handle, host);
        }
    }

    pub(crate) fn fire_progress(&mut self, handle: EffectHandle, sample: &Sample, host: &mut H) {
        if let Some(f) = self.progress.as_mut() {
            f(handle, sample, host);
        }
    }

    pub(crate) fn fire_end(&mut self, handle: EffectHandle, host: &mut H) {
        if let Some(f) = self.end.as_mut() {
            f(handle, host);
        }
    }
}

impl<H> Default for EffectHooks<H> {
    fn default() -> Self {
        Self::new()
    }
}
