//! Immutable context passed explicitly through a call graph.
//!
//! A [`Context`] is a persistent chain of bindings. Deriving a context
//! with an extra binding pushes a new head node which points to the
//! previous chain; nothing is copied and the parent stays valid.
//!
//! Any value that is optional, and especially values injected by
//! middleware-like code, can be attached this way. Consumers should deal
//! gracefully with absence instead of unwrapping.
//!
//! # Example
//!
//! ```
//! use ctxvalues::{Context, Key};
//!
//! static RETRIES: Key<u32> = Key::new();
//!
//! let root = Context::background();
//! let child = RETRIES.with_value(&root, 3);
//!
//! assert_eq!(RETRIES.get(&child), Some(&3));
//! assert_eq!(RETRIES.get(&root), None);
//! ```

use crate::{Binding, KeyId, ValueCarrier};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Immutable, persistent carrier of key-value bindings.
///
/// Cloning a [`Context`] is cheap: only the head of the chain is shared.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

struct Node {
    id: KeyId,
    value: Binding,
    parent: Option<Arc<Self>>,
}

// Unlink the chain one node at a time,
// a recursive drop would overflow the stack for long chains.
impl Drop for Node {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(mut node) = next.and_then(Arc::into_inner) {
            next = node.parent.take();
        }
    }
}

impl Context {
    /// Create an empty [`Context`].
    #[inline(always)]
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Create an empty root [`Context`].
    ///
    /// Alias of [`Context::new`], for call sites that start a new chain.
    #[inline(always)]
    #[must_use]
    pub const fn background() -> Self {
        Self::new()
    }

    /// Derive a new [`Context`] which additionally binds `value` to `id`.
    ///
    /// `self` is left untouched. A binding for an `id` which already exists
    /// in the chain shadows the older one in the derived context only.
    #[must_use]
    pub fn with_binding(&self, id: KeyId, value: Binding) -> Self {
        Self {
            head: Some(Arc::new(Node {
                id,
                value,
                parent: self.head.clone(),
            })),
        }
    }

    /// Get the most recent value bound to `id`, if any.
    #[must_use]
    pub fn binding(&self, id: KeyId) -> Option<&(dyn Any + Send + Sync)> {
        self.nodes()
            .find(|node| node.id == id)
            .map(|node| node.value.as_ref())
    }

    /// Returns true if a value is bound to `id` anywhere in the chain.
    #[must_use]
    pub fn contains_id(&self, id: KeyId) -> bool {
        self.nodes().any(|node| node.id == id)
    }

    /// Returns true if no value was ever bound in this chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of bindings in the chain, shadowed ones included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.nodes().count()
    }

    /// Iterate over the [`KeyId`]s bound in this chain, newest first.
    ///
    /// Shadowed bindings are yielded as well.
    pub fn keys(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.nodes().map(|node| node.id)
    }

    /// Returns true if both contexts share the same head.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        match (&a.head, &b.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
    }
}

impl ValueCarrier for Context {
    #[inline(always)]
    fn with_binding(&self, id: KeyId, value: Binding) -> Self {
        Self::with_binding(self, id, value)
    }

    #[inline(always)]
    fn binding(&self, id: KeyId) -> Option<&(dyn Any + Send + Sync)> {
        Self::binding(self, id)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field(
                "bindings",
                &self.keys().map(|id| id.type_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
