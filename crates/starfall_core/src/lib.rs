//! Starfall Core
//!
//! Host-facing primitives shared by the effect engine and its hosts:
//!
//! - **Color**: straight RGBA color with channel-wise interpolation
//! - **Properties**: addressable entity properties and their values
//! - **PropertyHost**: the bridge the engine uses to read and write properties
//! - **PropertyStore**: an in-memory host for tests and headless stages
//!
//! # Example
//!
//! ```rust
//! use starfall_core::{EntityId, PropertyHost, PropertyId, PropertyStore, PropertyValue};
//!
//! let mut store = PropertyStore::new();
//! let star = EntityId::new(1);
//!
//! store.write(star, &PropertyId::Rotation, PropertyValue::Float(45.0));
//! assert_eq!(store.read_float(star, &PropertyId::Rotation), Some(45.0));
//! ```

pub mod color;
pub mod property;
pub mod store;

pub use color::Color;
pub use property::{EntityId, PropertyHost, PropertyId, PropertyValue};
pub use store::PropertyStore;
