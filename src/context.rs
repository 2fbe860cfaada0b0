//! Hand a registry to consumers through an explicit scope.
//!
//! A [`RegistryProvider`] wraps one handler and builds its [`RegistryApi`]
//! bundle exactly once. Consumers receive a [`RegistryContext`] from their
//! caller and ask it for the bundle; a context without an installed provider
//! answers with [`OutsideProvider`].
//!
//! The bundle exposes exactly nine operations: `register`, `register_many`,
//! `load_by_key`, `require_key`, `get_one`, `unregister`, `clear`, `has` and
//! `keys`. `size` is only reachable through [`RegistryProvider`].
//! The handler sits behind a single mutex, so lookups return owned clones and
//! predicates passed to [`RegistryApi::unregister`] must not call back into
//! the same bundle.

use crate::error::{OutsideProvider, RegistryKeyNotFound};
use crate::registry::RegistryHandler;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Capability bundle bound to one handler.
///
/// Clones share the handler; [`RegistryApi::ptr_eq`] tells whether two
/// handles came from the same provider.
pub struct RegistryApi<T> {
    handler: Arc<Mutex<RegistryHandler<T>>>,
}

impl<T> Clone for RegistryApi<T> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T> fmt::Debug for RegistryApi<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryApi")
            .field("handler", &Arc::as_ptr(&self.handler))
            .finish()
    }
}

impl<T> RegistryApi<T> {
    fn bind(handler: RegistryHandler<T>) -> Self {
        Self {
            handler: Arc::new(Mutex::new(handler)),
        }
    }

    /// True when both handles are bound to the same handler.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }

    /// Append every item under `key`; see [`RegistryHandler::register_many`].
    pub fn register_many<I>(&self, key: &str, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.handler.lock().register_many(key, items);
    }

    /// Remove the key, or the items matching `predicate`; see
    /// [`RegistryHandler::unregister`].
    ///
    /// The predicate runs with the handler locked. Calling back into any
    /// handle bound to the same handler from inside it deadlocks.
    pub fn unregister<P>(&self, key: &str, predicate: Option<P>)
    where
        P: FnMut(&T, usize) -> bool,
    {
        self.handler.lock().unregister(key, predicate);
    }

    /// Drop one key, or every key when `key` is `None`.
    pub fn clear(&self, key: Option<&str>) {
        self.handler.lock().clear(key);
    }

    /// Whether anything is registered under `key`.
    pub fn has(&self, key: &str) -> bool {
        self.handler.lock().has(key)
    }

    /// Snapshot of present keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.handler.lock().keys()
    }
}

impl<T: PartialEq> RegistryApi<T> {
    /// Append `item` unless an equal one is already registered under `key`.
    pub fn register(&self, key: &str, item: T) {
        self.handler.lock().register(key, item);
    }
}

impl<T: Clone> RegistryApi<T> {
    /// Copy of the bucket for `key`, or `None`.
    pub fn load_by_key(&self, key: &str) -> Option<Vec<T>> {
        self.handler.lock().load_by_key(key).map(<[T]>::to_vec)
    }

    /// Copy of the bucket for `key`, failing when nothing is registered.
    pub fn require_key(&self, key: &str) -> Result<Vec<T>, RegistryKeyNotFound> {
        self.handler.lock().require_key(key).map(<[T]>::to_vec)
    }

    /// Copy of the first item under `key`.
    pub fn get_one(&self, key: &str) -> Option<T> {
        self.handler.lock().get_one(key).cloned()
    }
}

/// Owns the handler for one scope and the bundle built from it.
pub struct RegistryProvider<T> {
    api: RegistryApi<T>,
}

impl<T> RegistryProvider<T> {
    /// Wrap `initial`, or a fresh empty handler.
    pub fn new(initial: Option<RegistryHandler<T>>) -> Self {
        Self {
            api: RegistryApi::bind(initial.unwrap_or_default()),
        }
    }

    /// The bundle built at construction; the same one on every call.
    pub fn api(&self) -> &RegistryApi<T> {
        &self.api
    }

    /// A context with this provider installed.
    pub fn context(&self) -> RegistryContext<T> {
        RegistryContext::installed(self)
    }

    /// Run `f` with direct access to the handler, including `size`.
    pub fn with_handler<R>(&self, f: impl FnOnce(&mut RegistryHandler<T>) -> R) -> R {
        f(&mut *self.api.handler.lock())
    }

    /// Number of distinct keys in the handler.
    pub fn size(&self) -> usize {
        self.api.handler.lock().size()
    }
}

impl<T> Default for RegistryProvider<T> {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Scope object passed down to consumers.
pub struct RegistryContext<T> {
    api: Option<RegistryApi<T>>,
}

impl<T> Clone for RegistryContext<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl<T> RegistryContext<T> {
    /// A context with no provider above it.
    pub fn detached() -> Self {
        Self { api: None }
    }

    /// A context carrying `provider`'s bundle.
    pub fn installed(provider: &RegistryProvider<T>) -> Self {
        Self {
            api: Some(provider.api.clone()),
        }
    }

    /// Whether a provider's bundle is installed.
    pub fn is_installed(&self) -> bool {
        self.api.is_some()
    }

    /// The installed bundle, or [`OutsideProvider`].
    pub fn registry(&self) -> Result<&RegistryApi<T>, OutsideProvider> {
        self.api.as_ref().ok_or(OutsideProvider)
    }
}

/// Retrieve the bundle installed in `ctx`.
pub fn use_registry<T>(ctx: &RegistryContext<T>) -> Result<&RegistryApi<T>, OutsideProvider> {
    ctx.registry()
}
