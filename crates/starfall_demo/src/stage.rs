//! Headless star stage
//!
//! Stands in for a UI: a container with a star in it, six trigger buttons,
//! and falling stars spawned by the shower. Implements [`PropertyHost`] so
//! the scheduler can animate anything on it.

use crate::config::StageConfig;
use starfall_core::{EntityId, PropertyHost, PropertyId, PropertyStore, PropertyValue};

/// The demo's trigger buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    Rotate,
    Translate,
    Scale,
    Fade,
    Colorize,
    Shower,
}

impl Trigger {
    pub const ALL: [Trigger; 6] = [
        Self::Rotate,
        Self::Translate,
        Self::Scale,
        Self::Fade,
        Self::Colorize,
        Self::Shower,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// A container holding the star and any falling stars
pub struct Stage {
    props: PropertyStore,
    next_id: u64,
    container: EntityId,
    star: EntityId,
    /// Children of the container, in insertion order
    children: Vec<EntityId>,
    enabled: [bool; 6],
    config: StageConfig,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        let mut stage = Self {
            props: PropertyStore::new(),
            next_id: 0,
            container: EntityId::new(0),
            star: EntityId::new(0),
            children: Vec::new(),
            enabled: [true; 6],
            config,
        };
        stage.container = stage.allocate();
        stage.star = stage.spawn_child();
        stage
    }

    fn allocate(&mut self) -> EntityId {
        self.next_id += 1;
        let id = EntityId::new(self.next_id);
        self.props.insert_entity(id);
        id
    }

    fn spawn_child(&mut self) -> EntityId {
        let id = self.allocate();
        self.children.push(id);
        id
    }

    /// Add a new star to the container
    pub fn spawn_star(&mut self) -> EntityId {
        let id = self.spawn_child();
        tracing::debug!("Stage: spawned star {}", id);
        id
    }

    /// Remove a child from the container
    ///
    /// The container and the primary star cannot be removed.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        if entity == self.container || entity == self.star {
            return false;
        }
        let Some(pos) = self.children.iter().position(|&c| c == entity) else {
            return false;
        };
        self.children.remove(pos);
        self.props.remove_entity(entity);
        tracing::debug!("Stage: removed star {}", entity);
        true
    }

    pub fn container(&self) -> EntityId {
        self.container
    }

    pub fn star(&self) -> EntityId {
        self.star
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.props.contains(entity)
    }

    /// Container width and height
    pub fn size(&self) -> (f32, f32) {
        (self.config.width, self.config.height)
    }

    /// Unscaled star width and height
    pub fn star_size(&self) -> (f32, f32) {
        (self.config.star_width, self.config.star_height)
    }

    pub fn is_enabled(&self, trigger: Trigger) -> bool {
        self.enabled[trigger.index()]
    }

    pub fn set_enabled(&mut self, trigger: Trigger, enabled: bool) {
        tracing::trace!("Stage: {:?} enabled={}", trigger, enabled);
        self.enabled[trigger.index()] = enabled;
    }

    /// Float property, falling back to the property default
    pub fn float(&self, entity: EntityId, property: &PropertyId) -> f32 {
        self.read_float(entity, property)
            .or_else(|| property.default_value().as_float())
            .unwrap_or(0.0)
    }
}

impl PropertyHost for Stage {
    fn read(&self, entity: EntityId, property: &PropertyId) -> Option<PropertyValue> {
        self.props.read(entity, property)
    }

    fn write(&mut self, entity: EntityId, property: &PropertyId, value: PropertyValue) {
        // Writes to removed stars are dropped rather than resurrecting them
        if self.contains(entity) {
            self.props.write(entity, property, value);
        }
    }
}
