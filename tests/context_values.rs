use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use ctxvalues::{Binding, Context, Key, KeyId, MissingValue, ValueCarrier, define_key};

define_key! {
    static USER_ID: UserIdKey => String;
    static ADMIN_ID: AdminIdKey => String;
    static MAX_RETRIES: MaxRetriesKey => u8;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TenantId(u64);

#[test]
fn same_value_type_does_not_collide() {
    let ctx = Context::background();
    let ctx = USER_ID.with_value(&ctx, "foo".to_owned());
    let ctx = ADMIN_ID.with_value(&ctx, "foo".to_owned());

    assert_eq!(USER_ID.get_or_else(&ctx, String::new()), "foo");
    assert_eq!(ADMIN_ID.get_or_else(&ctx, String::new()), "foo");
    assert_eq!(ctx.depth(), 2);
}

#[test]
fn values_are_read_back_individually() {
    let ctx = Context::background();
    let ctx = USER_ID.with_value(&ctx, "foo".to_owned());
    let ctx = ADMIN_ID.with_value(&ctx, "baa".to_owned());

    assert_eq!(USER_ID.try_get(&ctx), ("foo".to_owned(), true));
    assert_eq!(ADMIN_ID.try_get(&ctx), ("baa".to_owned(), true));
    assert_eq!(MAX_RETRIES.try_get(&ctx), (0, false));
}

#[test]
fn value_type_can_double_as_key() {
    let tenant: Key<TenantId> = Key::new();

    let ctx = tenant.with_value(&Context::new(), TenantId(7));

    assert_eq!(tenant.get(&ctx), Some(&TenantId(7)));
    assert_eq!(tenant.id(), KeyId::of::<TenantId>());
}

#[test]
fn derivation_keeps_every_generation_valid() {
    let generations: Vec<Context> = (0..5u8).fold(vec![Context::new()], |mut acc, i| {
        let next = MAX_RETRIES.with_value(acc.last().unwrap(), i);
        acc.push(next);
        acc
    });

    assert_eq!(MAX_RETRIES.get(&generations[0]), None);
    for (i, ctx) in generations.iter().enumerate().skip(1) {
        assert_eq!(MAX_RETRIES.get_or_zero(ctx) as usize, i - 1);
        assert_eq!(ctx.depth(), i);
    }
}

#[test]
fn missing_value_propagates_with_question_mark() {
    fn greeting(ctx: &Context) -> Result<String, MissingValue> {
        let user = USER_ID.require(ctx)?;
        Ok(format!("hello {user}"))
    }

    let err = greeting(&Context::new()).unwrap_err();
    assert_eq!(err.key(), USER_ID.id());

    let ctx = USER_ID.with_value(&Context::new(), "glen".to_owned());
    assert_eq!(greeting(&ctx).unwrap(), "hello glen");
}

#[test]
fn shared_context_behind_arc() {
    let base = Arc::new(Context::new());
    let derived = USER_ID.with_value(&base, "arc".to_owned());

    assert!(USER_ID.get(&base).is_none());
    assert_eq!(USER_ID.get(&derived).map(String::as_str), Some("arc"));
}

/// Carrier which snapshots all bindings into a flat map on every derivation.
#[derive(Debug, Clone, Default)]
struct SnapshotCarrier {
    bindings: HashMap<KeyId, Binding>,
}

impl ValueCarrier for SnapshotCarrier {
    fn with_binding(&self, id: KeyId, value: Binding) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.insert(id, value);
        Self { bindings }
    }

    fn binding(&self, id: KeyId) -> Option<&(dyn Any + Send + Sync)> {
        self.bindings.get(&id).map(|value| value.as_ref())
    }
}

#[test]
fn keys_work_with_any_carrier() {
    let base = SnapshotCarrier::default();
    let ctx = USER_ID.with_value(&base, "foo".to_owned());
    let ctx = ADMIN_ID.with_value(&ctx, "baa".to_owned());
    let ctx = USER_ID.with_value(&ctx, "bar".to_owned());

    assert!(base.bindings.is_empty());
    assert_eq!(USER_ID.get_or_zero(&ctx), "bar");
    assert_eq!(ADMIN_ID.get_or_zero(&ctx), "baa");
    assert_eq!(MAX_RETRIES.get_or_else(&ctx, 3), 3);
}
