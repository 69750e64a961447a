use std::marker::PhantomData;

use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a widget node stored in the arena.
    pub struct NodeId;
}

/// A node identifier that remembers the widget type stored at the node, so
/// callers can reach the concrete widget without naming its type again.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TypedId<T> {
    /// Untyped node identifier.
    id: NodeId,
    /// Marker for the widget type.
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedId<T> {
    /// Wrap an untyped node identifier.
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// The untyped identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> From<TypedId<T>> for NodeId {
    fn from(value: TypedId<T>) -> Self {
        value.id
    }
}
