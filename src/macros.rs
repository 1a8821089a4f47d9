//! hidden ctxvalues macros

/// Declare one or more process-wide [`Key`]s together with their marker types.
///
/// Each item declares an uninhabited marker `enum` and a `static` [`Key`]
/// using that marker as key type. Attributes and doc comments are applied
/// to the `static`.
///
/// ```
/// use ctxvalues::{Context, define_key};
///
/// define_key! {
///     /// Id of the user on whose behalf a request is handled.
///     pub static USER_ID: UserIdKey => String;
///     /// Id of the admin impersonating the user, if any.
///     static ADMIN_ID: AdminIdKey => String;
/// }
///
/// let ctx = USER_ID.with_value(&Context::background(), "foo".to_owned());
///
/// assert_eq!(USER_ID.get_or_zero(&ctx), "foo");
/// assert_eq!(ADMIN_ID.get_or_else(&ctx, "none".to_owned()), "none");
/// ```
///
/// [`Key`]: crate::Key
#[doc(hidden)]
#[macro_export]
macro_rules! __define_key {
    () => {};
    (
        $(#[$m:meta])*
        $vis:vis static $name:ident: $marker:ident => $value:ty;
        $($rest:tt)*
    ) => {
        #[doc = concat!("Key type of [`", stringify!($name), "`].")]
        #[derive(Debug)]
        $vis enum $marker {}

        $(#[$m])*
        $vis static $name: $crate::Key<$marker, $value> = $crate::Key::new();

        $crate::__define_key! { $($rest)* }
    };
}
#[doc(inline)]
pub use crate::__define_key as define_key;
