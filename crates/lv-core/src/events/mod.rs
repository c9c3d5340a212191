//! Pointer listener registry
//!
//! Views that track a gesture past the edge of their own area register a
//! pointer-up listener here. Registration hands back a [`ListenerGuard`];
//! dropping it removes the listener, so a view cannot leak one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use ahash::AHashMap;
use parking_lot::Mutex;

/// Identifier of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<Mutex<Box<dyn FnMut() + Send>>>;

#[derive(Default)]
struct Registry {
    next_id: AtomicU64,
    listeners: Mutex<AHashMap<ListenerId, Listener>>,
}

/// Application-wide registry of pointer-up listeners.
///
/// Cloning is cheap and every clone refers to the same registry.
#[derive(Clone, Default)]
pub struct PointerHub {
    registry: Arc<Registry>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`, active until the returned guard is dropped
    #[must_use = "dropping the guard deregisters the listener"]
    pub fn register(&self, listener: impl FnMut() + Send + 'static) -> ListenerGuard {
        let id = ListenerId(self.registry.next_id.fetch_add(1, Ordering::Relaxed));
        self.registry
            .listeners
            .lock()
            .insert(id, Arc::new(Mutex::new(Box::new(listener))));
        tracing::debug!("Registered pointer-up listener {:?}", id);

        ListenerGuard {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Call every live listener.
    ///
    /// The registry lock is released before listeners run, so a listener may
    /// register or drop guards itself.
    pub fn dispatch_pointer_up(&self) {
        let listeners: Vec<Listener> = self.registry.listeners.lock().values().cloned().collect();
        for listener in listeners {
            (listener.lock())();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.listeners.lock().len()
    }
}

impl std::fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a listener registered; deregisters it on drop
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    registry: Weak<Registry>,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.listeners.lock().remove(&self.id);
            tracing::debug!("Removed pointer-up listener {:?}", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_register_dispatch_and_drop() {
        let hub = PointerHub::new();
        let (count, listener) = counter();

        let guard = hub.register(listener);
        assert_eq!(hub.listener_count(), 1);

        hub.dispatch_pointer_up();
        hub.dispatch_pointer_up();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        drop(guard);
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch_pointer_up();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_guard_released_on_unwind() {
        let hub = PointerHub::new();
        let (_, listener) = counter();

        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = hub.register(listener);
            assert_eq!(hub.listener_count(), 1);
            panic!("view construction failed");
        }));

        assert!(result.is_err());
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_clones_share_registry() {
        let hub = PointerHub::new();
        let other = hub.clone();
        let (count, listener) = counter();

        let _guard = other.register(listener);
        hub.dispatch_pointer_up();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_outliving_hub() {
        let (_, listener) = counter();
        let guard = PointerHub::new().register(listener);
        drop(guard);
    }

    #[test]
    fn test_listener_may_touch_hub() {
        let hub = PointerHub::new();
        let inner = hub.clone();
        let _guard = hub.register(move || {
            let _ = inner.listener_count();
        });
        hub.dispatch_pointer_up();
    }
}
