//! Singleton: one settings store shared by everyone who asks for it.

use std::collections::BTreeMap;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::PatternError;
use crate::singleton::{instance, ConstructToken, Singleton};
use crate::sink::Sink;

static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

/// Application settings. Fields are private and there is no public
/// constructor; [`instance`] is the only way in.
pub struct SettingsStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl Singleton for SettingsStore {
    fn construct(_token: ConstructToken) -> Self {
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        let mut values = BTreeMap::new();
        values.insert("theme".to_string(), "light".to_string());
        Self {
            values: Mutex::new(values),
        }
    }
}

impl SettingsStore {
    pub fn shared() -> Result<&'static Self, PatternError> {
        instance::<Self>()
    }

    /// How many times the store has been built in this process.
    pub fn constructions() -> usize {
        CONSTRUCTIONS.load(Ordering::SeqCst)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into())
    }

    pub fn do_something(&self) -> String {
        "Doing something...".to_string()
    }
}

pub fn run(sink: &dyn Sink) -> Result<(), PatternError> {
    let first = SettingsStore::shared()?;
    let second = SettingsStore::shared()?;

    sink.emit(&first.do_something());
    sink.emit(&format!(
        "Both handles point at the same store: {}",
        ptr::eq(first, second)
    ));

    first.set("theme", "dark");
    sink.emit(&format!(
        "Theme seen through the second handle: {}",
        second.get("theme").unwrap_or_default()
    ));
    Ok(())
}
