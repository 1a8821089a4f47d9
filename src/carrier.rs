//! The substrate a [`Key`] reads from and derives into.
//!
//! [`Key`]: crate::Key

use crate::KeyId;
use std::any::Any;
use std::sync::Arc;

/// A type-erased value bound to a [`KeyId`] within a carrier.
pub type Binding = Arc<dyn Any + Send + Sync>;

/// An immutable key-value carrier that can be used with a [`Key`].
///
/// Implementations must never mutate `self` in [`ValueCarrier::with_binding`]:
/// contexts derived earlier have to stay valid and unaffected.
///
/// [`Key`]: crate::Key
pub trait ValueCarrier: Sized {
    /// Derive a new carrier which additionally binds `value` to `id`.
    #[must_use]
    fn with_binding(&self, id: KeyId, value: Binding) -> Self;

    /// Look up the most recent value bound to `id`.
    fn binding(&self, id: KeyId) -> Option<&(dyn Any + Send + Sync)>;
}

impl<C> ValueCarrier for Arc<C>
where
    C: ValueCarrier,
{
    fn with_binding(&self, id: KeyId, value: Binding) -> Self {
        Self::new((**self).with_binding(id, value))
    }

    #[inline(always)]
    fn binding(&self, id: KeyId) -> Option<&(dyn Any + Send + Sync)> {
        (**self).binding(id)
    }
}
