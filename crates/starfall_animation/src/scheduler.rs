//! Effect scheduler
//!
//! Owns every started effect and advances them when the host ticks. The host
//! calls [`EffectScheduler::tick`] once per frame with the elapsed time; the
//! scheduler writes the new values into the host and runs lifecycle hooks
//! before returning, so no frame shows a finished effect without its cleanup.
//!
//! Per effect, within a tick:
//! - Pending effects resolve their start values, become Running and fire
//!   `on_start` before any progress
//! - every member is advanced, its value written to the host, then
//!   `on_progress` fires
//! - once all members are done, `on_end` fires
//!
//! Effects are advanced in start order. Completed and cancelled effects are
//! pruned at the end of the tick.

use crate::error::{EffectError, Result};
use crate::group::Effect;
use crate::hooks::EffectHooks;
use crate::instance::{EffectInstance, EffectState, Sample};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use starfall_core::{EntityId, PropertyHost};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

new_key_type! {
    /// Handle to a started effect (single or group)
    pub struct EffectHandle;
}

/// A started effect and its hooks
struct ActiveEffect<H> {
    members: SmallVec<[EffectInstance; 2]>,
    hooks: EffectHooks<H>,
    state: EffectState,
}

impl<H: PropertyHost> ActiveEffect<H> {
    fn advance(&mut self, handle: EffectHandle, delta_ms: u64, host: &mut H) {
        if self.state.is_terminal() {
            return;
        }

        if self.state == EffectState::Pending {
            for member in self.members.iter_mut() {
                let current = host.read(member.target(), member.property());
                member.begin(current);
            }
            self.state = EffectState::Running;
            tracing::debug!("EffectScheduler: {:?} running", handle);
            self.hooks.fire_start(handle, host);
        }

        for (index, member) in self.members.iter_mut().enumerate() {
            let Some(value) = member.advance(delta_ms).value() else {
                continue;
            };
            let sample = Sample {
                member: index,
                target: member.target(),
                property: member.property().clone(),
                value,
            };
            host.write(sample.target, &sample.property, value);
            self.hooks.fire_progress(handle, &sample, host);
        }

        if self.members.iter().all(|m| m.state().is_terminal()) {
            self.state = EffectState::Completed;
            tracing::debug!("EffectScheduler: {:?} completed", handle);
            self.hooks.fire_end(handle, host);
        }
    }
}

/// Drives started effects from host ticks
///
/// Not thread-safe by itself: all calls are expected from the host's
/// update loop. Wrap it in a [`SharedScheduler`] when several threads need
/// to start, tick or cancel effects.
pub struct EffectScheduler<H> {
    effects: SlotMap<EffectHandle, ActiveEffect<H>>,
    /// Start order; effects are ticked in this order
    order: Vec<EffectHandle>,
}

impl<H: PropertyHost> EffectScheduler<H> {
    pub fn new() -> Self {
        Self {
            effects: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Schedule an effect on `target`
    ///
    /// The effect is validated as a whole; on `InvalidConfig` nothing is
    /// scheduled. It stays Pending until the next non-zero tick.
    pub fn start(
        &mut self,
        effect: impl Into<Effect>,
        target: EntityId,
        hooks: EffectHooks<H>,
    ) -> Result<EffectHandle> {
        let effect = effect.into();
        if let Err(err) = effect.validate() {
            tracing::debug!("EffectScheduler: rejected effect on {}: {}", target, err);
            return Err(err);
        }

        let members = effect
            .into_members()
            .into_iter()
            .map(|descriptor| EffectInstance::new(descriptor, target))
            .collect::<Result<SmallVec<[EffectInstance; 2]>>>()?;
        let count = members.len();

        let handle = self.effects.insert(ActiveEffect {
            members,
            hooks,
            state: EffectState::Pending,
        });
        self.order.push(handle);

        tracing::debug!(
            "EffectScheduler: scheduled {:?} on {} ({} member(s))",
            handle,
            target,
            count
        );
        Ok(handle)
    }

    /// Advance every pending or running effect by `delta_ms`
    ///
    /// Returns true if effects remain active afterwards. A zero delta
    /// changes nothing and fires no hooks.
    pub fn tick(&mut self, delta_ms: u64, host: &mut H) -> bool {
        if delta_ms == 0 {
            return self.has_active_effects();
        }

        for &handle in &self.order {
            if let Some(effect) = self.effects.get_mut(handle) {
                effect.advance(handle, delta_ms, host);
            }
        }

        let effects = &mut self.effects;
        self.order.retain(|&handle| {
            let finished = effects
                .get(handle)
                .map_or(true, |effect| effect.state.is_terminal());
            if finished {
                effects.remove(handle);
            }
            !finished
        });

        tracing::trace!(
            "EffectScheduler: tick {}ms, {} active",
            delta_ms,
            self.order.len()
        );
        self.has_active_effects()
    }

    /// Cancel an effect and all of its members
    ///
    /// Values already written stay in place and no further hooks fire for
    /// the effect. Fails with `UnknownHandle` if the effect already finished
    /// or never existed.
    pub fn cancel(&mut self, handle: EffectHandle) -> Result<()> {
        let effect = self
            .effects
            .get_mut(handle)
            .filter(|effect| !effect.state.is_terminal())
            .ok_or(EffectError::UnknownHandle(handle))?;

        for member in effect.members.iter_mut() {
            member.cancel();
        }
        effect.state = EffectState::Cancelled;

        tracing::debug!("EffectScheduler: {:?} cancelled", handle);
        Ok(())
    }

    /// State of an effect
    ///
    /// Effects that finished or were cancelled during the current frame are
    /// still reported until the next tick prunes them.
    pub fn state(&self, handle: EffectHandle) -> Result<EffectState> {
        self.effects
            .get(handle)
            .map(|effect| effect.state)
            .ok_or(EffectError::UnknownHandle(handle))
    }

    /// States of an effect's members, in member order
    pub fn member_states(&self, handle: EffectHandle) -> Result<Vec<EffectState>> {
        self.effects
            .get(handle)
            .map(|effect| effect.members.iter().map(EffectInstance::state).collect())
            .ok_or(EffectError::UnknownHandle(handle))
    }

    /// Elapsed time of the longest-running member
    pub fn elapsed_ms(&self, handle: EffectHandle) -> Result<u64> {
        self.effects
            .get(handle)
            .map(|effect| {
                effect
                    .members
                    .iter()
                    .map(EffectInstance::elapsed_ms)
                    .max()
                    .unwrap_or(0)
            })
            .ok_or(EffectError::UnknownHandle(handle))
    }

    /// Whether the effect is Pending or Running
    pub fn is_active(&self, handle: EffectHandle) -> bool {
        self.effects
            .get(handle)
            .is_some_and(|effect| !effect.state.is_terminal())
    }

    /// Number of Pending or Running effects
    pub fn active_count(&self) -> usize {
        self.effects
            .values()
            .filter(|effect| !effect.state.is_terminal())
            .count()
    }

    pub fn has_active_effects(&self) -> bool {
        self.active_count() > 0
    }
}

impl<H: PropertyHost> Default for EffectScheduler<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// A scheduler behind a mutex, for hosts that tick from several threads
///
/// Every call locks the same mutex, so `start`, `tick` and `cancel` never
/// interleave.
pub struct SharedScheduler<H> {
    inner: Arc<Mutex<EffectScheduler<H>>>,
}

impl<H: PropertyHost> SharedScheduler<H> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EffectScheduler::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EffectScheduler<H>> {
        // Hooks run under the lock; a panicking hook must not wedge the scheduler
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(
        &self,
        effect: impl Into<Effect>,
        target: EntityId,
        hooks: EffectHooks<H>,
    ) -> Result<EffectHandle> {
        self.lock().start(effect, target, hooks)
    }

    pub fn tick(&self, delta_ms: u64, host: &mut H) -> bool {
        self.lock().tick(delta_ms, host)
    }

    pub fn cancel(&self, handle: EffectHandle) -> Result<()> {
        self.lock().cancel(handle)
    }

    pub fn state(&self, handle: EffectHandle) -> Result<EffectState> {
        self.lock().state(handle)
    }

    pub fn active_count(&self) -> usize {
        self.lock().active_count()
    }

    /// Run `f` with exclusive access to the scheduler
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut EffectScheduler<H>) -> R,
    {
        f(&mut self.lock())
    }
}

impl<H: PropertyHost> Default for SharedScheduler<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Clone for SharedScheduler<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
