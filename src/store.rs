//! A minimal parameter store. Params are kept as JSON values under a
//! subspace prefix, and a subspace refuses to be read from until a key table
//! naming its keys has been registered, mirroring how the sdk params module
//! works.

use crate::error::AnteError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::RwLock;

/// Key value storage the host provides. Reads are expected to come from a
/// consistent snapshot for the duration of one transaction check.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
    fn set(&self, key: &[u8], value: Vec<u8>);
}

/// In memory store, used by tests and by hosts that keep params in memory
#[derive(Debug, Default)]
pub struct MemStore {
    inner: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.inner.read() {
            Ok(map) => map.get(key).cloned(),
            Err(poisoned) => poisoned.into_inner().get(key).cloned(),
        }
    }

    fn set(&self, key: &[u8], value: Vec<u8>) {
        match self.inner.write() {
            Ok(mut map) => {
                map.insert(key.to_vec(), value);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(key.to_vec(), value);
            }
        }
    }
}

/// The set of keys a subspace is allowed to hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTable {
    keys: BTreeSet<Vec<u8>>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, key: &[u8]) -> Self {
        self.keys.insert(key.to_vec());
        self
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.keys.contains(key)
    }
}

/// A prefixed view onto a store owned by one module
#[derive(Clone)]
pub struct Subspace {
    store: Arc<dyn KvStore>,
    name: String,
    key_table: Option<KeyTable>,
}

impl Subspace {
    pub fn new(store: Arc<dyn KvStore>, name: &str) -> Self {
        Subspace {
            store,
            name: name.to_string(),
            key_table: None,
        }
    }

    pub fn with_key_table(mut self, table: KeyTable) -> Self {
        self.key_table = Some(table);
        self
    }

    pub fn has_key_table(&self) -> bool {
        self.key_table.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn prefixed(&self, key: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.name.len() + 1 + key.len());
        out.extend_from_slice(self.name.as_bytes());
        out.push(b'/');
        out.extend_from_slice(key);
        out
    }

    fn check_key(&self, key: &[u8]) -> Result<(), AnteError> {
        match &self.key_table {
            None => Err(AnteError::Logic(format!(
                "{} paramspace was not set up via module",
                self.name
            ))),
            Some(table) if !table.contains(key) => Err(AnteError::Logic(format!(
                "parameter {} not registered in {}",
                String::from_utf8_lossy(key),
                self.name
            ))),
            Some(_) => Ok(()),
        }
    }

    pub fn has(&self, key: &[u8]) -> Result<bool, AnteError> {
        self.check_key(key)?;
        Ok(self.store.has(&self.prefixed(key)))
    }

    /// Reads and decodes a value, `None` when the key was never set
    pub fn get<T: DeserializeOwned>(&self, key: &[u8]) -> Result<Option<T>, AnteError> {
        self.check_key(key)?;
        match self.store.get(&self.prefixed(key)) {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&self, key: &[u8], value: &T) -> Result<(), AnteError> {
        self.check_key(key)?;
        let bytes = serde_json::to_vec(value)
            .map_err(|e| AnteError::Logic(format!("could not encode param: {}", e)))?;
        trace!("Setting param {} in {}", String::from_utf8_lossy(key), self.name);
        self.store.set(&self.prefixed(key), bytes);
        Ok(())
    }
}
