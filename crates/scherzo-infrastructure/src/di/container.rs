//! Lazy service container
//!
//! Default [`Registry`] implementation. Definitions and entries live in
//! separate tables; an entry is created from its definition on first
//! [`Registry::get`] and cached until the container is dropped.
//!
//! No lock is held while a recipe runs, so a recipe may resolve other
//! identifiers from the same container. A recipe that comes back to its own
//! identifier is reported as [`Error::CircularDependency`]. The in-progress
//! path is tracked per thread, so concurrent resolutions of one identifier
//! are not mistaken for a cycle.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, PoisonError, RwLock};
use std::thread::{self, ThreadId};

use scherzo_domain::error::{Error, Result};
use scherzo_domain::ports::{Entry, Recipe, Registry};
use tracing::{debug, trace};

/// Lazy, caching service container
#[derive(Default)]
pub struct Container {
    definitions: RwLock<HashMap<String, Recipe>>,
    entries: RwLock<HashMap<String, Entry>>,
    resolving: Mutex<HashMap<ThreadId, Vec<String>>>,
}

/// Marks an identifier as in progress on the current thread until dropped
struct Resolving<'c> {
    paths: &'c Mutex<HashMap<ThreadId, Vec<String>>>,
    thread: ThreadId,
    id: String,
}

impl<'c> Resolving<'c> {
    fn enter(paths: &'c Mutex<HashMap<ThreadId, Vec<String>>>, id: &str) -> Result<Self> {
        let thread = thread::current().id();
        let mut paths_guard = paths.lock().unwrap_or_else(PoisonError::into_inner);
        let path = paths_guard.entry(thread).or_default();
        if path.iter().any(|pending| pending == id) {
            let mut cycle = path.clone();
            cycle.push(id.to_string());
            return Err(Error::CircularDependency {
                id: id.to_string(),
                path: cycle,
            });
        }
        path.push(id.to_string());
        Ok(Self {
            paths,
            thread,
            id: id.to_string(),
        })
    }
}

// Runs on unwind too, so a panicking recipe can be retried
impl Drop for Resolving<'_> {
    fn drop(&mut self) {
        let mut paths = self.paths.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = paths.get_mut(&self.thread) {
            if let Some(position) = path.iter().rposition(|pending| *pending == self.id) {
                path.remove(position);
            }
            if path.is_empty() {
                paths.remove(&self.thread);
            }
        }
    }
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container behind a trait object
    pub fn boxed() -> Box<dyn Registry> {
        Box::new(Self::new())
    }

    /// Number of realized entries
    pub fn entry_count(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn cached(&self, id: &str) -> Option<Entry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn definition(&self, id: &str) -> Option<Recipe> {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Resolve a definition with `id` marked as in progress
    fn resolve(&self, id: &str, recipe: &Recipe) -> Result<Entry> {
        let _resolving = Resolving::enter(&self.resolving, id)?;
        trace!(id, recipe = %recipe.describe(), "Resolving definition");
        recipe.resolve(self, id)
    }
}

impl Registry for Container {
    fn define_all(&self, definitions: Vec<(String, Recipe)>) -> &dyn Registry {
        self.definitions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(definitions);
        self
    }

    fn define(&self, id: &str, recipe: Recipe) -> &dyn Registry {
        self.definitions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), recipe);
        self
    }

    fn set(&self, id: &str, entry: Entry) -> &dyn Registry {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), entry);
        self
    }

    fn has(&self, id: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
            || self
                .definitions
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains_key(id)
    }

    fn get(&self, id: &str) -> Result<Entry> {
        if let Some(entry) = self.cached(id) {
            return Ok(entry);
        }
        let recipe = self.definition(id).ok_or_else(|| Error::not_found(id))?;

        let entry = self.resolve(id, &recipe).map_err(|e| match e {
            Error::NotFound { .. } => e,
            other => Error::resolution(id, other),
        })?;

        debug!(id, "Registered lazy entry");
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.entry(id.to_string()).or_insert(entry).clone())
    }

    fn ids(&self) -> Vec<String> {
        let definitions = self
            .definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        definitions
            .keys()
            .chain(entries.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("ids", &self.ids())
            .field("entries", &self.entry_count())
            .finish()
    }
}
