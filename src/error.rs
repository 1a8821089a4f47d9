//! Error returned when a required context value is absent.

use crate::KeyId;
use std::any::type_name;
use std::fmt;

/// No value of the expected type is bound to a [`Key`].
///
/// Only returned by [`Key::require`], all other accessors
/// signal absence through their return value.
///
/// [`Key`]: crate::Key
/// [`Key::require`]: crate::Key::require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingValue {
    key: KeyId,
    expected: &'static str,
}

impl MissingValue {
    pub(crate) fn new<V: ?Sized>(key: KeyId) -> Self {
        Self {
            key,
            expected: type_name::<V>(),
        }
    }

    /// Identity of the key for which no value was found.
    #[must_use]
    pub fn key(&self) -> KeyId {
        self.key
    }

    /// Name of the value type the key expected.
    #[must_use]
    pub fn expected_type(&self) -> &'static str {
        self.expected
    }
}

impl fmt::Display for MissingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "context value missing for key {} (expected {})",
            self.key, self.expected
        )
    }
}

impl std::error::Error for MissingValue {}
