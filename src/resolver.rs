use alloc::{string::ToString as _, vec::Vec};

use tracing::{debug, debug_span, error};

use crate::{
    any::value,
    args::ResolveArgs,
    errors::{ResolveErrorKind, Traced},
    history::{History, Visit},
    inject::PlaceholderArg,
    plan::{BoundPlan, Deferred, Resolved, Slot},
    runner,
    state::State,
};

pub(crate) struct Outcome {
    pub(crate) item: Resolved,
    pub(crate) state: State,
    pub(crate) history: History,
}

impl core::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Outcome")
            .field("state", &self.state)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

/// Resolves `name` against the snapshot, recursively binding its
/// dependencies.
///
/// The history is the ancestor chain of this branch only; every recursion
/// receives its own clone, so an item reachable along two branches is bound
/// twice rather than reported as a cycle. The state is threaded through and
/// handed back so singletons materialized anywhere in the walk stay cached.
pub(crate) fn resolve(
    state: State,
    name: &str,
    args: &ResolveArgs,
    mut history: History,
    optional: bool,
) -> Result<Outcome, Traced<ResolveErrorKind>> {
    let span = debug_span!("resolve", item = name);
    let _guard = span.enter();

    if let Some(cached) = state.singletons().get(name) {
        let cached = cached.clone();
        match state.registry().get(name) {
            Some(data) => history.push(Visit::found(name, data)),
            None => history.push(Visit::missing(name)),
        }
        debug!("Cached");
        return Ok(Outcome {
            item: Resolved::CacheHit(cached),
            state,
            history,
        });
    }

    let Some(data) = state.registry().get(name) else {
        history.push(Visit::missing(name));
        if optional {
            debug!("Not registered, binding absent");
            return Ok(Outcome {
                item: Resolved::Absent,
                state,
                history,
            });
        }
        let err = Traced::new(
            ResolveErrorKind::NotRegistered {
                name: name.to_string(),
            },
            history,
        );
        error!("{}", err);
        return Err(err);
    };
    let data = data.clone();
    history.push(Visit::found(name, &data));

    let mut state = state;
    let mut slots = Vec::with_capacity(data.spec.requests.len());
    for request in &data.spec.requests {
        if request.placeholder {
            slots.push(Slot::Open(PlaceholderArg {
                name: request.name.clone(),
                optional: request.optional,
            }));
            continue;
        }

        let cyclic = request.name == name || history.contains(&request.name);
        if cyclic && !state.singletons().contains(&request.name) {
            let err = Traced::new(
                ResolveErrorKind::CyclicDependency {
                    name: request.name.clone(),
                },
                history,
            );
            error!("{}", err);
            return Err(err);
        }

        let outcome = resolve(state, &request.name, args, history.clone(), request.optional)?;
        state = outcome.state;

        if request.as_factory {
            slots.push(Slot::Filled(value(Deferred::new(
                request.name.clone(),
                outcome.item,
                outcome.history,
            ))));
        } else {
            let val = runner::run(&outcome.item, args, &request.name, &outcome.history)?;
            slots.push(Slot::Filled(val));
        }
    }

    let singleton = data.singleton;
    let plan = BoundPlan::new(data, slots);
    if singleton {
        let val = runner::run(&Resolved::Plan(plan), args, name, &history)?;
        let state = state.with_singleton(name.to_string(), val.clone());
        debug!("Cached `{}`", name);
        return Ok(Outcome {
            item: Resolved::Value(val),
            state,
            history,
        });
    }

    Ok(Outcome {
        item: Resolved::Plan(plan),
        state,
        history,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::{string::String, sync::Arc};
    use core::sync::atomic::{AtomicU8, Ordering};

    use super::{resolve, Outcome};
    use crate::{
        any::value,
        args::{Args, ResolveArgs},
        blueprint::Blueprint,
        errors::{InstantiateErrorKind, ResolveErrorKind},
        history::History,
        plan::Resolved,
        registry::{register_blueprint, RegisterOptions},
        runner,
        state::State,
    };

    fn register(state: State, name: &str, blueprint: Blueprint) -> State {
        register_blueprint(&state, name, blueprint, &RegisterOptions::new().skip_trace())
            .unwrap()
    }

    fn resolve_value(state: State, name: &str) -> (crate::AnyValue, State) {
        let args = ResolveArgs::new();
        let Outcome {
            item,
            state,
            history,
        } = resolve(state, name, &args, History::new(), false).unwrap();
        let val = runner::run(&item, &args, name, &history).unwrap();
        (val, state)
    }

    #[test]
    fn test_chain_binds_dependency_values() {
        let state = register(
            State::default(),
            "base",
            Blueprint::leaf(|_: Args| Ok::<_, InstantiateErrorKind>(value(20i32))),
        );
        let state = register(
            state,
            "doubled",
            Blueprint::new(["base"], |args: Args| {
                Ok::<_, InstantiateErrorKind>(value(*args.get::<i32>(0)? * 2))
            })
            .depends(["base"]),
        );

        let (val, _) = resolve_value(state, "doubled");
        assert_eq!(*val.downcast_ref::<i32>().unwrap(), 40);
    }

    #[test]
    fn test_singleton_materializes_once_per_state_lineage() {
        let call_count = Arc::new(AtomicU8::new(0));
        let state = register(
            State::default(),
            "single",
            Blueprint::leaf({
                let call_count = call_count.clone();
                move |_: Args| {
                    call_count.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, InstantiateErrorKind>(value(5i32))
                }
            })
            .singleton(),
        );

        let (first, state) = resolve_value(state, "single");
        let args = ResolveArgs::new();
        let outcome = resolve(state, "single", &args, History::new(), false).unwrap();

        assert!(matches!(outcome.item, Resolved::CacheHit(_)));
        assert_eq!(*first.downcast_ref::<i32>().unwrap(), 5);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_optional_missing_dependency_binds_absent() {
        let state = register(
            State::default(),
            "tolerant",
            Blueprint::new(["gone"], |args: Args| {
                assert!(args.opt::<i32>(0)?.is_none());
                Ok::<_, InstantiateErrorKind>(value(()))
            })
            .depends(["gone ?"]),
        );

        resolve_value(state, "tolerant");
    }

    #[test]
    fn test_required_missing_dependency_fails_with_trace() {
        let state = register(
            State::default(),
            "strict",
            Blueprint::new(["gone"], |_: Args| {
                Ok::<_, InstantiateErrorKind>(value(()))
            })
            .depends(["gone"]),
        );

        let err = resolve(state, "strict", &ResolveArgs::new(), History::new(), false)
            .unwrap_err();

        assert!(matches!(
            err.kind(),
            ResolveErrorKind::NotRegistered { name } if name == "gone",
        ));
        let names: alloc::vec::Vec<String> =
            err.trace().iter().map(|visit| visit.name.clone()).collect();
        assert_eq!(names, ["strict", "gone"]);
    }

    #[test]
    fn test_cycle_is_reported_with_the_offending_dependency() {
        let state = register(
            State::default(),
            "a",
            Blueprint::new(["b"], |_: Args| Ok::<_, InstantiateErrorKind>(value(())))
                .depends(["b"]),
        );
        let state = register(
            state,
            "b",
            Blueprint::new(["a"], |_: Args| Ok::<_, InstantiateErrorKind>(value(())))
                .depends(["a"]),
        );

        let err = resolve(state, "a", &ResolveArgs::new(), History::new(), false).unwrap_err();

        assert!(matches!(
            err.kind(),
            ResolveErrorKind::CyclicDependency { name } if name == "a",
        ));
        assert_eq!(err.trace().len(), 2);
    }

    #[test]
    fn test_diamond_dependencies_are_not_a_cycle() {
        let state = register(
            State::default(),
            "shared",
            Blueprint::leaf(|_: Args| Ok::<_, InstantiateErrorKind>(value(1i32))),
        );
        let state = register(
            state,
            "left",
            Blueprint::new(["shared"], |args: Args| {
                Ok::<_, InstantiateErrorKind>(value(*args.get::<i32>(0)? + 10))
            })
            .depends(["shared"]),
        );
        let state = register(
            state,
            "right",
            Blueprint::new(["shared"], |args: Args| {
                Ok::<_, InstantiateErrorKind>(value(*args.get::<i32>(0)? + 20))
            })
            .depends(["shared"]),
        );
        let state = register(
            state,
            "top",
            Blueprint::new(["left", "right"], |args: Args| {
                Ok::<_, InstantiateErrorKind>(value(
                    *args.get::<i32>(0)? + *args.get::<i32>(1)?,
                ))
            })
            .depends(["left", "right"]),
        );

        let (val, _) = resolve_value(state, "top");
        assert_eq!(*val.downcast_ref::<i32>().unwrap(), 32);
    }
}
