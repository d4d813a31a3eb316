//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities are compared by identity, not by attribute values: an order whose
/// status just changed is still the same order. Types whose equality is purely
/// structural (an order line's price snapshot, say) are plain values and don't
/// implement this.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Identity comparison: same entity iff same identifier, regardless of
    /// current attribute values.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
