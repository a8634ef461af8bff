//! Service Registry Port
//!
//! A registry keeps two tables: *definitions* (how to build a service) and
//! *entries* (the built value). An identifier is resolved from its
//! definition on first [`Registry::get`] and the result is cached for the
//! lifetime of the registry.
//!
//! ```text
//! define("greeter", Recipe) ──► definitions
//!                                   │ first get("greeter")
//!                                   ▼
//!                 Recipe::Factory(registry) / Recipe::Type(registry, id)
//!                                   │
//!                                   ▼
//!                                entries ──► Arc<dyn Any>
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use crate::constants::{CONFIG_SERVICE_ID, RESPONSE_SERVICE_ID};
use crate::error::{Error, Result};
use crate::ports::pipeline::Middleware;
use crate::ports::settings::Settings;
use crate::value_objects::ResponseSlot;

/// A realized, cached registry value
pub type Entry = Arc<dyn Any + Send + Sync>;

/// Factory recipe signature
pub type FactoryFn = dyn Fn(&dyn Registry) -> Result<Entry> + Send + Sync;

/// Constructor signature of a [`TypeRef`]
pub type ConstructFn = fn(&dyn Registry, &str) -> Result<Entry>;

/// A type that the registry can construct from a [`Recipe::Type`]
///
/// The constructor receives the registry and the identifier it is being
/// registered under, so a service can look up its own settings group.
pub trait Service: Any + Send + Sync + Sized {
    /// Build the service
    fn create(registry: &dyn Registry, id: &str) -> Result<Self>;
}

/// Reference to a constructible service type
#[derive(Clone, Copy)]
pub struct TypeRef {
    name: &'static str,
    construct: ConstructFn,
}

impl TypeRef {
    /// Reference to `T`; entries hold an `Arc<T>`
    pub fn of<T: Service>() -> Self {
        Self {
            name: type_name::<T>(),
            construct: construct_service::<T>,
        }
    }

    /// Reference to `T` as a chain step target
    ///
    /// Entries hold an `Arc<dyn Middleware>` so the handler chain can call
    /// them without knowing the concrete type.
    pub fn middleware<T: Service + Middleware>() -> Self {
        Self {
            name: type_name::<T>(),
            construct: construct_middleware::<T>,
        }
    }

    /// Reference with a hand-written constructor
    pub fn new(name: &'static str, construct: ConstructFn) -> Self {
        Self { name, construct }
    }

    /// Name of the referenced type
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Construct an entry for `id`
    pub fn construct(&self, registry: &dyn Registry, id: &str) -> Result<Entry> {
        (self.construct)(registry, id)
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.name).finish()
    }
}

fn construct_service<T: Service>(registry: &dyn Registry, id: &str) -> Result<Entry> {
    Ok(Arc::new(T::create(registry, id)?))
}

fn construct_middleware<T: Service + Middleware>(
    registry: &dyn Registry,
    id: &str,
) -> Result<Entry> {
    let middleware: Arc<dyn Middleware> = Arc::new(T::create(registry, id)?);
    Ok(Arc::new(middleware))
}

/// How to build the entry for an identifier
#[derive(Clone)]
pub enum Recipe {
    /// Function called with the registry
    Factory(Arc<FactoryFn>),
    /// Type constructed with the registry and the identifier
    Type(TypeRef),
}

impl Recipe {
    /// Factory producing a `T`; entries hold an `Arc<T>`
    pub fn factory<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Registry) -> Result<T> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(move |registry: &dyn Registry| -> Result<Entry> {
            Ok(Arc::new(factory(registry)?))
        }))
    }

    /// Factory producing a chain step target
    pub fn middleware_factory<M, F>(factory: F) -> Self
    where
        M: Middleware + 'static,
        F: Fn(&dyn Registry) -> Result<M> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(move |registry: &dyn Registry| -> Result<Entry> {
            let middleware: Arc<dyn Middleware> = Arc::new(factory(registry)?);
            Ok(Arc::new(middleware))
        }))
    }

    /// Factory returning a ready-made entry
    pub fn entry_factory<F>(factory: F) -> Self
    where
        F: Fn(&dyn Registry) -> Result<Entry> + Send + Sync + 'static,
    {
        Self::Factory(Arc::new(factory))
    }

    /// Type recipe for `T`
    pub fn of<T: Service>() -> Self {
        Self::Type(TypeRef::of::<T>())
    }

    /// Type recipe for a chain step target `T`
    pub fn middleware<T: Service + Middleware>() -> Self {
        Self::Type(TypeRef::middleware::<T>())
    }

    /// Build the entry for `id`
    pub fn resolve(&self, registry: &dyn Registry, id: &str) -> Result<Entry> {
        match self {
            Self::Factory(factory) => (**factory)(registry),
            Self::Type(type_ref) => type_ref.construct(registry, id),
        }
    }

    /// Short description for diagnostics
    pub fn describe(&self) -> String {
        match self {
            Self::Factory(_) => "factory".to_string(),
            Self::Type(type_ref) => format!("type {}", type_ref.name()),
        }
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(_) => f.write_str("Recipe::Factory"),
            Self::Type(type_ref) => f.debug_tuple("Recipe::Type").field(type_ref).finish(),
        }
    }
}

impl From<TypeRef> for Recipe {
    fn from(type_ref: TypeRef) -> Self {
        Self::Type(type_ref)
    }
}

/// Lazy service registry
///
/// Only [`Registry::get`] can fail; every other operation is total.
pub trait Registry: Send + Sync {
    /// Merge definitions into the definition table, overwriting on collision
    fn define_all(&self, definitions: Vec<(String, Recipe)>) -> &dyn Registry;

    /// Set a single definition
    fn define(&self, id: &str, recipe: Recipe) -> &dyn Registry;

    /// Install a realized entry, bypassing definitions
    fn set(&self, id: &str, entry: Entry) -> &dyn Registry;

    /// True if an entry or a definition exists for `id`
    ///
    /// A `true` result means `get` will not fail with [`Error::NotFound`],
    /// not that it will succeed.
    fn has(&self, id: &str) -> bool;

    /// Cached entry for `id`, resolving its definition on first access
    fn get(&self, id: &str) -> Result<Entry>;

    /// Every identifier known by definition or entry, sorted
    fn ids(&self) -> Vec<String>;
}

/// Typed helpers over any [`Registry`]
pub trait RegistryExt {
    /// Resolve `id` and downcast the entry to `T`
    fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>>;

    /// Install a plain value as the entry for `id`
    fn set_value<T: Any + Send + Sync>(&self, id: &str, value: T) -> &Self;

    /// Define `id` with a factory producing a `T`
    fn define_factory<T, F>(&self, id: &str, factory: F) -> &Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Registry) -> Result<T> + Send + Sync + 'static;

    /// Define `id` as a constructible type
    fn define_type<T: Service>(&self, id: &str) -> &Self;

    /// Resolve `id` as a chain step target
    fn middleware(&self, id: &str) -> Result<Arc<dyn Middleware>>;

    /// The settings store installed under `config`
    fn settings(&self) -> Result<Arc<dyn Settings>>;

    /// The response slot installed under `response`
    fn response(&self) -> Result<Arc<ResponseSlot>>;
}

impl<R: Registry + ?Sized> RegistryExt for R {
    fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
        self.get(id)?
            .downcast::<T>()
            .map_err(|_| Error::type_mismatch(id, type_name::<T>()))
    }

    fn set_value<T: Any + Send + Sync>(&self, id: &str, value: T) -> &Self {
        self.set(id, Arc::new(value));
        self
    }

    fn define_factory<T, F>(&self, id: &str, factory: F) -> &Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Registry) -> Result<T> + Send + Sync + 'static,
    {
        self.define(id, Recipe::factory(factory));
        self
    }

    fn define_type<T: Service>(&self, id: &str) -> &Self {
        self.define(id, Recipe::of::<T>());
        self
    }

    fn middleware(&self, id: &str) -> Result<Arc<dyn Middleware>> {
        self.get(id)?
            .downcast_ref::<Arc<dyn Middleware>>()
            .cloned()
            .ok_or_else(|| Error::type_mismatch(id, "dyn Middleware"))
    }

    fn settings(&self) -> Result<Arc<dyn Settings>> {
        self.get(CONFIG_SERVICE_ID)?
            .downcast_ref::<Arc<dyn Settings>>()
            .cloned()
            .ok_or_else(|| Error::type_mismatch(CONFIG_SERVICE_ID, "dyn Settings"))
    }

    fn response(&self) -> Result<Arc<ResponseSlot>> {
        self.get_as::<ResponseSlot>(RESPONSE_SERVICE_ID)
    }
}
