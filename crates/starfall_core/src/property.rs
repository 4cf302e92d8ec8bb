//! Animatable properties
//!
//! The engine addresses host state as `(entity, property)` pairs and never
//! holds entities itself. Hosts implement [`PropertyHost`] to expose their
//! properties for reading (to resolve "current" start values) and writing
//! (to apply each animation sample).

use crate::color::Color;
use std::fmt;

/// Reference to an entity owned by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An addressable property on an entity
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyId {
    /// Rotation around the entity's center, in degrees
    Rotation,
    TranslationX,
    TranslationY,
    ScaleX,
    ScaleY,
    /// Opacity (0.0 transparent, 1.0 opaque)
    Alpha,
    BackgroundColor,
    /// Host-defined property addressed by name
    Named(String),
}

impl PropertyId {
    /// Create a host-defined property id
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Value assumed when the host cannot report a current value
    pub fn default_value(&self) -> PropertyValue {
        match self {
            Self::ScaleX | Self::ScaleY | Self::Alpha => PropertyValue::Float(1.0),
            Self::BackgroundColor => PropertyValue::Color(Color::BLACK),
            Self::Rotation | Self::TranslationX | Self::TranslationY | Self::Named(_) => {
                PropertyValue::Float(0.0)
            }
        }
    }

    /// Property name as a host would spell it
    pub fn name(&self) -> &str {
        match self {
            Self::Rotation => "rotation",
            Self::TranslationX => "translationX",
            Self::TranslationY => "translationY",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::Alpha => "alpha",
            Self::BackgroundColor => "backgroundColor",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of an animatable property
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    Float(f32),
    Color(Color),
}

impl PropertyValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Float(_) => None,
        }
    }

    /// Whether both values are of the same kind (both floats or both colors)
    pub fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Float(_), Self::Float(_)) | (Self::Color(_), Self::Color(_))
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Color(_) => "color",
        }
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<Color> for PropertyValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v:.2}"),
            Self::Color(c) => write!(f, "#{:08X}", c.to_argb()),
        }
    }
}

/// Host bridge for reading and writing entity properties
///
/// Implemented by whatever owns the entities: a UI tree, a scene graph,
/// or the in-memory [`PropertyStore`](crate::PropertyStore).
pub trait PropertyHost {
    /// Current value of `property` on `entity`, if the host knows it
    fn read(&self, entity: EntityId, property: &PropertyId) -> Option<PropertyValue>;

    /// Apply a new value to `property` on `entity`
    fn write(&mut self, entity: EntityId, property: &PropertyId, value: PropertyValue);

    /// Read a float property
    fn read_float(&self, entity: EntityId, property: &PropertyId) -> Option<f32> {
        self.read(entity, property).and_then(|v| v.as_float())
    }

    /// Read a color property
    fn read_color(&self, entity: EntityId, property: &PropertyId) -> Option<Color> {
        self.read(entity, property).and_then(|v| v.as_color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(PropertyId::ScaleX.default_value(), PropertyValue::Float(1.0));
        assert_eq!(PropertyId::Alpha.default_value(), PropertyValue::Float(1.0));
        assert_eq!(PropertyId::Rotation.default_value(), PropertyValue::Float(0.0));
        assert_eq!(
            PropertyId::BackgroundColor.default_value(),
            PropertyValue::Color(Color::BLACK)
        );
    }

    #[test]
    fn test_same_kind() {
        let f = PropertyValue::Float(1.0);
        let c = PropertyValue::Color(Color::RED);
        assert!(f.same_kind(&PropertyValue::Float(3.0)));
        assert!(c.same_kind(&PropertyValue::Color(Color::BLACK)));
        assert!(!f.same_kind(&c));
    }

    #[test]
    fn test_named_property() {
        let prop = PropertyId::named("glow");
        assert_eq!(prop.name(), "glow");
        assert_eq!(prop.to_string(), "glow");
    }
}
