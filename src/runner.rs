use alloc::{string::ToString as _, vec::Vec};

use tracing::{debug, error};

use crate::{
    any::{value, Absent, AnyValue},
    args::{Args, ResolveArgs},
    errors::{InvokeErrorKind, Traced},
    history::History,
    plan::{Resolved, Slot},
};

/// Materializes a resolved item: fills its open slots from the placeholder
/// args and invokes the factory.
pub(crate) fn run(
    item: &Resolved,
    args: &ResolveArgs,
    name: &str,
    history: &History,
) -> Result<AnyValue, Traced<InvokeErrorKind>> {
    let plan = match item {
        Resolved::Value(val) | Resolved::CacheHit(val) => return Ok(val.clone()),
        Resolved::Absent => return Ok(value(Absent)),
        Resolved::Plan(plan) => plan,
    };

    let mut call_args = Vec::with_capacity(plan.slots.len());
    for slot in &plan.slots {
        match slot {
            Slot::Filled(val) => call_args.push(val.clone()),
            Slot::Open(placeholder) => match args.lookup(name, &placeholder.name) {
                Some(val) => call_args.push(val.clone()),
                None if placeholder.optional => call_args.push(value(Absent)),
                None => {
                    let err = Traced::new(
                        InvokeErrorKind::MissingPlaceholder {
                            item: name.to_string(),
                            name: placeholder.name.clone(),
                        },
                        history.clone(),
                    );
                    error!("{}", err);
                    return Err(err);
                }
            },
        }
    }

    match plan.call(Args::new(call_args)) {
        Ok(val) => {
            debug!("Produced `{}`", name);
            Ok(val)
        }
        Err(err) => {
            let err = Traced::new(InvokeErrorKind::Factory(err), history.clone());
            error!("{}", err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::run;
    use crate::{
        any::{is_absent, value},
        args::{Args, ResolveArgs},
        errors::{InstantiateErrorKind, InvokeErrorKind},
        factory::boxed_factory,
        history::{History, Visit},
        inject::{InjectionSpec, PlaceholderArg},
        plan::{BoundPlan, Resolved, Slot},
        registry::FactoryData,
        utils::thread_safety::RcThreadSafety,
    };

    fn plan_for<F>(factory: F, slots: vec::Vec<Slot>) -> Resolved
    where
        F: FnMut(Args) -> Result<crate::AnyValue, InstantiateErrorKind>
            + Clone
            + Send
            + Sync
            + 'static,
    {
        Resolved::Plan(BoundPlan::new(
            RcThreadSafety::new(FactoryData {
                service: boxed_factory(factory),
                spec: InjectionSpec::default(),
                singleton: false,
                origin_file: None,
                register_source: None,
            }),
            slots,
        ))
    }

    #[test]
    fn test_filled_slots_keep_their_positions() {
        let item = plan_for(
            |args: Args| {
                let first = *args.get::<i32>(0)?;
                let second = *args.get::<&str>(1)?;
                assert_eq!((first, second), (1, "two"));
                Ok(value(first))
            },
            vec![Slot::Filled(value(1i32)), Slot::Filled(value("two"))],
        );

        let val = run(&item, &ResolveArgs::new(), "item", &History::new()).unwrap();
        assert_eq!(*val.downcast_ref::<i32>().unwrap(), 1);
    }

    #[test]
    fn test_open_slot_fills_from_args() {
        let item = plan_for(
            |args: Args| Ok(value(*args.get::<i32>(0)?)),
            vec![Slot::Open(PlaceholderArg {
                name: "key".into(),
                optional: false,
            })],
        );
        let args = ResolveArgs::new().insert("item", "key", value(7i32));

        let val = run(&item, &args, "item", &History::new()).unwrap();
        assert_eq!(*val.downcast_ref::<i32>().unwrap(), 7);
    }

    #[test]
    fn test_missing_optional_placeholder_binds_absent() {
        let item = plan_for(
            |args: Args| {
                assert!(args.opt::<i32>(0)?.is_none());
                Ok(value(()))
            },
            vec![Slot::Open(PlaceholderArg {
                name: "key".into(),
                optional: true,
            })],
        );

        run(&item, &ResolveArgs::new(), "item", &History::new()).unwrap();
    }

    #[test]
    fn test_missing_required_placeholder_names_item_and_parameter() {
        let item = plan_for(
            |_: Args| Ok(value(())),
            vec![Slot::Open(PlaceholderArg {
                name: "key".into(),
                optional: false,
            })],
        );
        let mut history = History::new();
        history.push(Visit::missing("somewhere"));

        let err = run(&item, &ResolveArgs::new(), "item", &history).unwrap_err();
        assert!(matches!(
            err.kind(),
            InvokeErrorKind::MissingPlaceholder { item, name }
                if item == "item" && name == "key",
        ));
        assert_eq!(err.trace().len(), 1);
    }

    #[test]
    fn test_factory_error_is_wrapped() {
        let item = plan_for(
            |_: Args| Err(InstantiateErrorKind::Custom(anyhow::anyhow!("boom"))),
            vec![],
        );

        let err = run(&item, &ResolveArgs::new(), "item", &History::new()).unwrap_err();
        assert!(matches!(err.kind(), InvokeErrorKind::Factory(_)));
    }

    #[test]
    fn test_non_plan_items_pass_through() {
        let cached = value(3i32);
        let val = run(
            &Resolved::CacheHit(cached.clone()),
            &ResolveArgs::new(),
            "item",
            &History::new(),
        )
        .unwrap();
        assert!(RcThreadSafety::ptr_eq(&cached, &val));

        let absent = run(
            &Resolved::Absent,
            &ResolveArgs::new(),
            "item",
            &History::new(),
        )
        .unwrap();
        assert!(is_absent(&absent));
    }
}
