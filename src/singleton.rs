//! Restricted construction: at most one instance per type per process.
//!
//! A type opts in by implementing [`Singleton`]. Its constructor takes a
//! [`ConstructToken`], which only this module can create, so the only way to
//! get a value is [`instance`]:
//!
//! ```compile_fail
//! use design_patterns::singleton::ConstructToken;
//!
//! let token = ConstructToken { _private: () };
//! ```
//!
//! Instances live in a process-wide registry keyed by `TypeId`. Each entry is
//! a `OnceLock`, so racing first calls construct exactly one value and every
//! caller sees the same address.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use lazy_static::lazy_static;
use tracing::info;

use crate::error::PatternError;

/// Proof that construction was requested by the accessor.
pub struct ConstructToken {
    _private: (),
}

pub trait Singleton: Any + Send + Sync + Sized {
    /// Builds the one instance. Must not request `instance::<Self>()`.
    fn construct(token: ConstructToken) -> Self;
}

type Slot = OnceLock<&'static (dyn Any + Send + Sync)>;

lazy_static! {
    static ref REGISTRY: Mutex<HashMap<TypeId, &'static Slot>> = Mutex::new(HashMap::new());
}

fn slot_for(id: TypeId) -> &'static Slot {
    // Entries are inserted whole and never removed.
    let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    *registry.entry(id).or_insert_with(|| {
        let slot: &'static Slot = Box::leak(Box::new(OnceLock::new()));
        slot
    })
}

/// Returns the process-wide instance of `T`, constructing it on first use.
///
/// The registry lock is released before construction, so a singleton's
/// `construct` may itself request other singletons.
pub fn instance<T: Singleton>() -> Result<&'static T, PatternError> {
    let slot = slot_for(TypeId::of::<T>());
    let stored = *slot.get_or_init(|| {
        info!(singleton = type_name::<T>(), "constructing instance");
        let value: &'static (dyn Any + Send + Sync) =
            Box::leak(Box::new(T::construct(ConstructToken { _private: () })));
        value
    });
    stored
        .downcast_ref::<T>()
        .ok_or_else(|| PatternError::construction_not_allowed(type_name::<T>()))
}

pub fn is_initialized<T: Singleton>() -> bool {
    let registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    registry
        .get(&TypeId::of::<T>())
        .is_some_and(|slot| slot.get().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;

    static RACED_BUILDS: AtomicUsize = AtomicUsize::new(0);

    struct Raced {
        id: usize,
    }

    impl Singleton for Raced {
        fn construct(_token: ConstructToken) -> Self {
            let id = RACED_BUILDS.fetch_add(1, Ordering::SeqCst);
            // Widen the race window.
            thread::sleep(std::time::Duration::from_millis(5));
            Raced { id }
        }
    }

    struct Plain {
        greeting: String,
    }

    impl Singleton for Plain {
        fn construct(_token: ConstructToken) -> Self {
            Plain {
                greeting: "hello".to_string(),
            }
        }
    }

    struct Lazy;

    impl Singleton for Lazy {
        fn construct(_token: ConstructToken) -> Self {
            Lazy
        }
    }

    struct Outer {
        inner: &'static Plain,
    }

    impl Singleton for Outer {
        fn construct(_token: ConstructToken) -> Self {
            Outer {
                inner: instance::<Plain>().unwrap(),
            }
        }
    }

    #[test]
    fn test_same_identity() {
        let a = instance::<Plain>().unwrap();
        let b = instance::<Plain>().unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.greeting, "hello");
    }

    #[test]
    fn test_lazy_construction() {
        assert!(!is_initialized::<Lazy>());
        instance::<Lazy>().unwrap();
        assert!(is_initialized::<Lazy>());
    }

    #[test]
    fn test_construct_may_request_other_singletons() {
        let outer = instance::<Outer>().unwrap();
        assert!(std::ptr::eq(outer.inner, instance::<Plain>().unwrap()));
    }

    #[test]
    fn test_concurrent_first_access_builds_once() {
        const THREADS: usize = 16;
        let barrier = Barrier::new(THREADS);

        let addresses: Vec<usize> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        let raced = instance::<Raced>().unwrap();
                        raced as *const Raced as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(RACED_BUILDS.load(Ordering::SeqCst), 1);
        assert_eq!(instance::<Raced>().unwrap().id, 0);
    }
}
