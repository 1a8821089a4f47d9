//! Type-safe keys for immutable, chained context values.
//!
//! A [`Key`] is a zero-sized capability token whose identity is derived
//! from its key type `K`. It is used to attach a single value of type `V`
//! to a [`Context`] (or any other [`ValueCarrier`]) and to read it back
//! again, without any string or integer key that could collide.
//!
//! Attaching never mutates the context it is given: a new context is
//! derived which shares all earlier bindings with its parent.
//!
//! Absence of a value is a normal outcome and is resolved at the call site:
//!
//! - [`Key::get`] / [`Key::try_get`]: strict lookup with a found indicator;
//! - [`Key::get_or_else`]: substitute a fallback;
//! - [`Key::get_or_zero`]: substitute the [`Default`] value;
//! - [`Key::require`]: propagate a [`MissingValue`] error with `?`.
//!
//! # Example
//!
//! ```
//! use ctxvalues::{Context, Key};
//!
//! #[derive(Debug, Clone, Default, PartialEq, Eq)]
//! struct UserId(String);
//!
//! #[derive(Debug, Clone, Default, PartialEq, Eq)]
//! struct AdminId(String);
//!
//! static USER_ID: Key<UserId> = Key::new();
//! static ADMIN_ID: Key<AdminId> = Key::new();
//!
//! let ctx = Context::background();
//! let ctx = USER_ID.with_value(&ctx, UserId("foo".to_owned()));
//! let ctx = ADMIN_ID.with_value(&ctx, AdminId("foo".to_owned()));
//!
//! assert_eq!(USER_ID.get(&ctx), Some(&UserId("foo".to_owned())));
//! assert_eq!(ADMIN_ID.get_or_zero(&ctx), AdminId("foo".to_owned()));
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

#[doc(hidden)]
#[macro_use]
mod macros;
pub use macros::define_key;

pub mod carrier;
pub use carrier::{Binding, ValueCarrier};

pub mod context;
pub use context::Context;

pub mod error;
pub use error::MissingValue;

pub mod key;
pub use key::{Key, KeyId};
