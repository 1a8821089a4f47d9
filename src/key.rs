//! Type-derived keys to attach and read context values.
//!
//! The identity of a [`Key`] is the [`TypeId`] of its key type `K`.
//! Two keys built independently with the same `K` address the same
//! binding, while keys with a different `K` never collide, even when they
//! share the same value type `V`. Newtype markers can therefore be used to
//! keep semantically different values of the same underlying type apart:
//!
//! ```
//! use ctxvalues::{Context, Key};
//!
//! enum UserIdKey {}
//! enum AdminIdKey {}
//!
//! static USER_ID: Key<UserIdKey, String> = Key::new();
//! static ADMIN_ID: Key<AdminIdKey, String> = Key::new();
//!
//! let ctx = USER_ID.with_value(&Context::background(), "foo".to_owned());
//!
//! assert_eq!(USER_ID.get_or_zero(&ctx), "foo");
//! assert!(ADMIN_ID.get(&ctx).is_none());
//! ```

use crate::{MissingValue, ValueCarrier};
use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// Runtime identity of a [`Key`].
///
/// Only the [`TypeId`] of the key type takes part in comparisons,
/// the type name is kept around for diagnostics.
#[derive(Clone, Copy)]
pub struct KeyId {
    type_id: TypeId,
    type_name: &'static str,
}

impl KeyId {
    /// Identity of the key type `K`.
    #[must_use]
    pub fn of<K: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<K>(),
            type_name: type_name::<K>(),
        }
    }

    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for KeyId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for KeyId {}

impl Hash for KeyId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyId").field(&self.type_name).finish()
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Type-safe key for a single value of type `V` within a [`ValueCarrier`].
///
/// `K` is only used for its identity and is never instantiated,
/// an uninhabited `enum` works well as a marker. When omitted, `V`
/// defaults to `K` and the value type doubles as the key.
///
/// A [`Key`] is zero-sized and holds no state, declare it once as a
/// `static` (or see [`define_key!`]) and use it wherever the value is needed.
///
/// [`define_key!`]: crate::define_key
pub struct Key<K, V = K> {
    _phantom: PhantomData<fn() -> (K, V)>,
}

impl<K, V> Key<K, V> {
    /// Create a new [`Key`].
    #[inline(always)]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<K, V> Key<K, V>
where
    K: 'static,
    V: Send + Sync + 'static,
{
    /// Identity of this [`Key`] within a carrier.
    #[must_use]
    pub fn id(self) -> KeyId {
        KeyId::of::<K>()
    }

    /// Derive a new carrier from `ctx` in which this key is bound to `value`.
    ///
    /// `ctx` itself is left untouched and remains valid.
    #[must_use]
    pub fn with_value<C: ValueCarrier>(self, ctx: &C, value: V) -> C {
        ctx.with_binding(self.id(), Arc::new(value))
    }

    /// Like [`Key::with_value`], but only binds when `value` is `Some`.
    ///
    /// Returns a clone of `ctx` otherwise.
    #[must_use]
    pub fn maybe_with_value<C>(self, ctx: &C, value: Option<V>) -> C
    where
        C: ValueCarrier + Clone,
    {
        match value {
            Some(value) => self.with_value(ctx, value),
            None => ctx.clone(),
        }
    }

    /// Get a reference to the value bound to this key, if any.
    ///
    /// The reference points at the exact instance that was attached.
    /// A binding with the same key type but a different value type
    /// is treated as absent.
    #[must_use]
    pub fn get<C: ValueCarrier>(self, ctx: &C) -> Option<&V> {
        let id = self.id();
        let value = ctx.binding(id)?.downcast_ref::<V>();
        if value.is_none() {
            tracing::trace!(
                key = %id,
                expected = type_name::<V>(),
                "context value has unexpected type: treated as absent"
            );
        }
        value
    }

    /// Get the value bound to this key together with a found indicator.
    ///
    /// Returns `(V::default(), false)` when absent.
    #[must_use]
    pub fn try_get<C: ValueCarrier>(self, ctx: &C) -> (V, bool)
    where
        V: Clone + Default,
    {
        match self.get(ctx) {
            Some(value) => (value.clone(), true),
            None => (V::default(), false),
        }
    }

    /// Get a clone of the value bound to this key, if any.
    #[must_use]
    pub fn get_cloned<C: ValueCarrier>(self, ctx: &C) -> Option<V>
    where
        V: Clone,
    {
        self.get(ctx).cloned()
    }

    /// Get the value bound to this key or the given `fallback`.
    #[must_use]
    pub fn get_or_else<C: ValueCarrier>(self, ctx: &C, fallback: V) -> V
    where
        V: Clone,
    {
        self.get_cloned(ctx).unwrap_or(fallback)
    }

    /// Get the value bound to this key or compute a fallback.
    #[must_use]
    pub fn get_or_else_with<C, F>(self, ctx: &C, fallback: F) -> V
    where
        C: ValueCarrier,
        F: FnOnce() -> V,
        V: Clone,
    {
        self.get_cloned(ctx).unwrap_or_else(fallback)
    }

    /// Get the value bound to this key or the [`Default`] value of `V`.
    #[must_use]
    pub fn get_or_zero<C: ValueCarrier>(self, ctx: &C) -> V
    where
        V: Clone + Default,
    {
        self.get_cloned(ctx).unwrap_or_default()
    }

    /// Get a reference to the value bound to this key or a [`MissingValue`] error.
    pub fn require<C: ValueCarrier>(self, ctx: &C) -> Result<&V, MissingValue> {
        let id = self.id();
        self.get(ctx).ok_or_else(|| {
            tracing::trace!(key = %id, "required context value is missing");
            MissingValue::new::<V>(id)
        })
    }

    /// Returns true if a value of type `V` is bound to this key.
    #[must_use]
    pub fn contains<C: ValueCarrier>(self, ctx: &C) -> bool {
        self.get(ctx).is_some()
    }
}

impl<K, V> Clone for Key<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Key<K, V> {}

impl<K, V> Default for Key<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Key<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("key", &format_args!("{}", type_name::<K>()))
            .field("value", &format_args!("{}", type_name::<V>()))
            .finish()
    }
}
