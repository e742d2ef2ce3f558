//! Shared data bag handed to every guard, callback and hook.

use super::state::State;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

/// Ephemeral per-trigger input.
pub type Input = Box<dyn Any + Send + Sync>;

/// Key-value store for values that outlive a single trigger.
///
/// Values are untyped JSON values; the store never checks their shape.
/// Keys iterate in sorted order so snapshots encode deterministically.
///
/// # Example
///
/// ```rust
/// use statekit::core::Store;
///
/// let mut store = Store::new();
/// store.set("attempts", 3);
/// store.set("owner", "ops");
///
/// assert_eq!(store.get_as::<u32>("attempts"), Some(3));
/// assert_eq!(store.get_as::<u32>("owner"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store(BTreeMap<String, Value>);

impl Store {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read a value back as `T`.
    ///
    /// Returns `None` when the key is absent or the stored value does not
    /// deserialize as `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|value| T::deserialize(value).ok())
    }

    /// Insert a value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Insert any serializable value.
    pub fn set_serialized<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> serde_json::Result<Option<Value>> {
        let value = serde_json::to_value(value)?;
        Ok(self.0.insert(key.into(), value))
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<(String, Value)> for Store {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Mutable context visible to guards, callbacks and transition hooks.
///
/// - `state` is the state whose logic is currently executing. During exit
///   callbacks it is the source state; during transition hooks and entry
///   callbacks it is already the target state.
/// - `input` lives for exactly one trigger and is never persisted.
/// - `data` and `meta` are long-lived and included in snapshots.
///
/// A context handed to work outside the machine (a spawned thread holding a
/// copy of some values, for example) is the caller's to synchronize.
pub struct Context<S: State> {
    state: S,
    input: Option<Input>,
    data: Store,
    meta: Store,
}

impl<S: State> Context<S> {
    /// Create an empty context positioned at `state`.
    pub fn new(state: S) -> Self {
        Self::with_stores(state, Store::new(), Store::new())
    }

    /// Create a context with pre-populated persistent stores.
    pub fn with_stores(state: S, data: Store, meta: Store) -> Self {
        Self {
            state,
            input: None,
            data,
            meta,
        }
    }

    /// The state whose callbacks are currently executing.
    pub fn state(&self) -> &S {
        &self.state
    }

    pub(crate) fn set_state(&mut self, state: S) {
        self.state = state;
    }

    /// Borrow the trigger input as `T`, if present and of that type.
    pub fn input<T: Any>(&self) -> Option<&T> {
        self.input.as_deref().and_then(|input| input.downcast_ref::<T>())
    }

    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    pub(crate) fn replace_input(&mut self, input: Option<Input>) {
        self.input = input;
    }

    pub fn data(&self) -> &Store {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Store {
        &mut self.data
    }

    pub fn meta(&self) -> &Store {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut Store {
        &mut self.meta
    }
}

impl<S: State> fmt::Debug for Context<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("state", &self.state)
            .field("has_input", &self.input.is_some())
            .field("data", &self.data)
            .field("meta", &self.meta)
            .finish()
    }
}
