//! Starfall Effect Engine
//!
//! Tick-driven property effects with easing, repeats, parallel groups and
//! lifecycle hooks.
//!
//! # Features
//!
//! - **Descriptors**: immutable property effects with duration, curve and repeat policy
//! - **Curves**: linear, accelerate, decelerate, accelerate-decelerate and custom easing
//! - **Repeat Modes**: restart or reverse (ping-pong) on every cycle
//! - **Groups**: start several effects on one tick and finish them together
//! - **Hooks**: start/progress/end callbacks with access to the host
//! - **Presets**: rotate, translate, scale, fade, colorize and the star shower
//!
//! # Example
//!
//! ```rust
//! use starfall_animation::{EffectDescriptor, EffectHooks, EffectScheduler};
//! use starfall_core::{EntityId, PropertyHost, PropertyId, PropertyStore};
//!
//! let mut host = PropertyStore::new();
//! let star = EntityId::new(1);
//! host.insert_entity(star);
//!
//! let mut scheduler = EffectScheduler::new();
//! let spin = EffectDescriptor::from_to(PropertyId::Rotation, -360.0, 0.0).duration_ms(1000);
//! scheduler.start(spin, star, EffectHooks::new()).unwrap();
//!
//! // One frame of 16ms, then the rest
//! scheduler.tick(16, &mut host);
//! scheduler.tick(984, &mut host);
//!
//! assert_eq!(host.read_float(star, &PropertyId::Rotation), Some(0.0));
//! assert!(!scheduler.has_active_effects());
//! ```

pub mod curve;
pub mod descriptor;
pub mod error;
pub mod group;
pub mod hooks;
pub mod instance;
pub mod presets;
pub mod scheduler;
pub mod values;

pub use curve::{Curve, CurveFn};
pub use descriptor::{EffectDescriptor, RepeatMode, DEFAULT_DURATION_MS};
pub use error::{EffectError, Result};
pub use group::{Effect, EffectGroup};
pub use hooks::{EffectHooks, EndHook, ProgressHook, StartHook};
pub use instance::{EffectInstance, EffectState, Sample, Step};
pub use presets::{shower, EffectPreset, ShowerParams};
pub use scheduler::{EffectHandle, EffectScheduler, SharedScheduler};
pub use values::Interpolate;
