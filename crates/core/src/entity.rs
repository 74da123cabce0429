//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two entities with the same id are the same record, whatever their other
/// fields currently hold.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// True when `other` refers to the same record.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
