//! Case-insensitive object-name registry for one analysis run

use dashmap::DashMap;

/// Standard objects every org has, seeded before any file is read.
pub const STANDARD_OBJECTS: [&str; 5] = ["Account", "Contact", "Opportunity", "Case", "Lead"];

/// Maps a lower-cased object name to the casing it was first seen with.
///
/// First write wins: once a key is registered, every later resolution of the
/// same key returns the same canonical string. Thread-safe, so a parallel
/// caller keeps the first-write guarantee per key.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    names: DashMap<String, String>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with [`STANDARD_OBJECTS`].
    pub fn with_standard_objects() -> Self {
        let registry = Self::new();
        registry.seed(STANDARD_OBJECTS);
        registry
    }

    /// Register each name that is not already known.
    pub fn seed<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.resolve(name.as_ref());
        }
    }

    /// Canonical casing for `name`, registering it if unseen.
    pub fn resolve(&self, name: &str) -> String {
        self.names
            .entry(name.to_lowercase())
            .or_insert_with(|| name.to_string())
            .value()
            .clone()
    }

    /// Whether `name` is registered, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_lowercase())
    }

    /// Canonical casing for `name` without registering it.
    pub fn lookup(&self, name: &str) -> Option<String> {
        self.names.get(&name.to_lowercase()).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
