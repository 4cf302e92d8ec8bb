//! Effect groups
//!
//! A group plays several descriptors on the same target, started on the same
//! tick and finished together. Starting a group is all-or-nothing: one
//! invalid member rejects the whole group.

use crate::descriptor::EffectDescriptor;
use crate::error::{EffectError, Result};
use smallvec::SmallVec;

/// Member storage; most groups are pairs (fall + spin, scaleX + scaleY)
pub(crate) type Members = SmallVec<[EffectDescriptor; 2]>;

/// Descriptors that play together as one effect
#[derive(Clone, Debug, Default)]
pub struct EffectGroup {
    members: Members,
}

impl EffectGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member (builder pattern)
    pub fn with(mut self, descriptor: EffectDescriptor) -> Self {
        self.members.push(descriptor);
        self
    }

    pub fn push(&mut self, descriptor: EffectDescriptor) {
        self.members.push(descriptor);
    }

    /// Give every member the same cycle duration
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.members = self
            .members
            .into_iter()
            .map(|d| d.duration_ms(duration_ms))
            .collect();
        self
    }

    pub fn members(&self) -> &[EffectDescriptor] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Effective duration: the longest member's total duration
    pub fn total_duration_ms(&self) -> u64 {
        self.members
            .iter()
            .map(EffectDescriptor::total_duration_ms)
            .max()
            .unwrap_or(0)
    }

    /// Validate every member; the first failure rejects the group
    pub fn validate(&self) -> Result<()> {
        if self.members.is_empty() {
            return Err(EffectError::InvalidConfig(
                "effect group has no members".to_string(),
            ));
        }
        self.members.iter().try_for_each(EffectDescriptor::validate)
    }
}

impl FromIterator<EffectDescriptor> for EffectGroup {
    fn from_iter<I: IntoIterator<Item = EffectDescriptor>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

/// Anything the scheduler can start: a single descriptor or a group
#[derive(Clone, Debug)]
pub enum Effect {
    Single(EffectDescriptor),
    Group(EffectGroup),
}

impl Effect {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Single(d) => d.validate(),
            Self::Group(g) => g.validate(),
        }
    }

    pub fn total_duration_ms(&self) -> u64 {
        match self {
            Self::Single(d) => d.total_duration_ms(),
            Self::Group(g) => g.total_duration_ms(),
        }
    }

    pub(crate) fn into_members(self) -> Members {
        match self {
            Self::Single(d) => smallvec::smallvec![d],
            Self::Group(g) => g.members,
        }
    }
}

impl From<EffectDescriptor> for Effect {
    fn from(descriptor: EffectDescriptor) -> Self {
        Self::Single(descriptor)
    }
}

impl From<EffectGroup> for Effect {
    fn from(group: EffectGroup) -> Self {
        Self::Group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::RepeatMode;
    use starfall_core::PropertyId;

    #[test]
    fn test_effective_duration_is_max() {
        let group = EffectGroup::new()
            .with(EffectDescriptor::new(PropertyId::ScaleX, 4.0).duration_ms(400))
            .with(
                EffectDescriptor::new(PropertyId::ScaleY, 4.0)
                    .duration_ms(300)
                    .repeat(1, RepeatMode::Reverse),
            );
        assert_eq!(group.total_duration_ms(), 600);
    }

    #[test]
    fn test_shared_duration_override() {
        let group = EffectGroup::new()
            .with(EffectDescriptor::new(PropertyId::TranslationY, 500.0))
            .with(EffectDescriptor::new(PropertyId::Rotation, 720.0).duration_ms(50))
            .with_duration(1200);
        assert!(group.members().iter().all(|d| d.cycle_duration_ms() == 1200));
    }

    #[test]
    fn test_one_bad_member_rejects_group() {
        let group: EffectGroup = [
            EffectDescriptor::new(PropertyId::TranslationY, 500.0),
            EffectDescriptor::new(PropertyId::Rotation, 720.0).duration_ms(0),
        ]
        .into_iter()
        .collect();
        assert!(matches!(group.validate(), Err(EffectError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_group_rejected() {
        assert!(EffectGroup::new().validate().is_err());
    }

    #[test]
    fn test_single_effect_has_one_member() {
        let effect: Effect = EffectDescriptor::new(PropertyId::Alpha, 0.0).into();
        assert_eq!(effect.into_members().len(), 1);
    }
}
