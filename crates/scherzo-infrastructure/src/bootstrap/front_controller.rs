//! Front controller
//!
//! Single entry point of a run. Builds the registry and settings from
//! layers, registers services, assembles the handler chain, invokes it once
//! and emits the response. Any failure on the way is answered by the
//! [`UncaughtHandler`]; only a failure of that handler escapes `run`.
//!
//! ```text
//! Idle ─► Configuring ─► ServicesRegistered ─► ChainBuilt ─► Invoking ─► Completed
//!              │                 │                  │            │
//!              └─────────────────┴──────┬───────────┴────────────┘
//!                                       ▼
//!                           Failed ─► ErrorReporting ─► Completed
//!                                                   └─► FatalAbort
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use scherzo_domain::constants::{
    CONFIG_SERVICE_ID, HOST_TARGET, MIDDLEWARE_GROUP, RESPONSE_SERVICE_ID, SERVICES_GROUP,
};
use scherzo_domain::error::{Error, Result, RunState};
use scherzo_domain::ports::{Middleware, Next, Payload, Recipe, Registry, Settings, SettingsExt};
use scherzo_domain::value_objects::{Layer, Response, ResponseSlot};
use tracing::{debug, error, info, warn};

use super::emitter::{Emitter, WriterEmitter};
use super::error_controller::{ErrorController, UncaughtHandler};
use super::implementations::{Implementations, RegistryFactory, SettingsFactory};
use super::panic_scope::PanicScope;
use crate::config::{app_settings, default_layer};
use crate::constants::{FALLBACK_LABEL, FALLBACK_SELECTOR};
use crate::di::ServiceCatalog;
use crate::pipeline::{HandlerStack, StepSpec};

/// Inline handler signature
///
/// Receives the run's registry alongside the chain remainder.
pub type InlineFn = dyn Fn(&dyn Registry, Next<'_, '_>) -> Result<Response> + Send + Sync;

struct InlineHandler {
    label: String,
    handler: Arc<InlineFn>,
    terminal: bool,
}

/// Bootstrap object running one request through the chain
pub struct FrontController {
    steps: Vec<StepSpec>,
    handlers: Vec<InlineHandler>,
    catalog: ServiceCatalog,
    implementations: Implementations,
    defaults: Layer,
    emitter: Arc<dyn Emitter>,
    error_handler: Option<Arc<dyn UncaughtHandler>>,
}

impl FrontController {
    /// Controller with built-in defaults, no steps and a stdout emitter
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            handlers: Vec::new(),
            catalog: ServiceCatalog::new(),
            implementations: Implementations::new(),
            defaults: default_layer(),
            emitter: Arc::new(WriterEmitter::stdout()),
            error_handler: None,
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Replace the built-in step list, run before the `middleware` group
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<StepSpec>) -> Self {
        self.steps = steps;
        self
    }

    /// Append one built-in step
    #[must_use]
    pub fn with_step(mut self, step: StepSpec) -> Self {
        self.steps.push(step);
        self
    }

    /// Append an inline handler, run after every configured step
    #[must_use]
    pub fn with_handler<L, F>(self, label: L, handler: F) -> Self
    where
        L: Into<String>,
        F: Fn(&dyn Registry, Next<'_, '_>) -> Result<Response> + Send + Sync + 'static,
    {
        self.push_handler(label.into(), Arc::new(handler), false)
    }

    /// Append an inline handler that always answers
    ///
    /// Its presence suppresses the fallback step.
    #[must_use]
    pub fn with_terminal_handler<L, F>(self, label: L, handler: F) -> Self
    where
        L: Into<String>,
        F: Fn(&dyn Registry, Next<'_, '_>) -> Result<Response> + Send + Sync + 'static,
    {
        self.push_handler(label.into(), Arc::new(handler), true)
    }

    /// Replace the catalog of named service types
    #[must_use]
    pub fn with_catalog(mut self, catalog: ServiceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Register a named service type in the catalog
    #[must_use]
    pub fn with_service_type(mut self, name: &str, description: &str, recipe: Recipe) -> Self {
        self.catalog.register(name, description, recipe);
        self
    }

    /// Register a registry implementation selectable through `app.container`
    #[must_use]
    pub fn with_container_kind(mut self, kind: &str, factory: RegistryFactory) -> Self {
        self.implementations.register_registry(kind, factory);
        self
    }

    /// Register a settings implementation selectable through `app.config`
    #[must_use]
    pub fn with_config_kind(mut self, kind: &str, factory: SettingsFactory) -> Self {
        self.implementations.register_settings(kind, factory);
        self
    }

    /// Replace the lowest-precedence settings layer
    #[must_use]
    pub fn with_defaults(mut self, defaults: Layer) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set where responses are delivered
    #[must_use]
    pub fn with_emitter(mut self, emitter: Arc<dyn Emitter>) -> Self {
        self.emitter = emitter;
        self
    }

    /// Replace the default [`ErrorController`]
    #[must_use]
    pub fn with_error_handler(mut self, handler: Arc<dyn UncaughtHandler>) -> Self {
        self.error_handler = Some(handler);
        self
    }

    fn push_handler(mut self, label: String, handler: Arc<InlineFn>, terminal: bool) -> Self {
        self.handlers.push(InlineHandler {
            label,
            handler,
            terminal,
        });
        self
    }

    /// The catalog of named service types
    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    // ========================================================================
    // Running
    // ========================================================================

    /// Run once without a request
    ///
    /// Returns the emitted response, which is the error report when the run
    /// failed. `Err` is always [`Error::Fatal`].
    pub fn run(&self, layers: Vec<Layer>) -> Result<Response> {
        self.dispatch(&layers, None)
    }

    /// Run once with `request` in flight
    pub fn run_with(&self, layers: Vec<Layer>, request: Payload) -> Result<Response> {
        self.dispatch(&layers, Some(request))
    }

    fn dispatch(&self, layers: &[Layer], request: Option<Payload>) -> Result<Response> {
        let started = Instant::now();
        let scope = PanicScope::enter();
        let mut state = RunState::Idle;
        let mut debug_output = false;
        info!(layers = layers.len(), "Front controller run started");

        let result = match scope.run(|| self.execute(layers, request, &mut state, &mut debug_output))
        {
            Ok(response) => {
                advance(&mut state, RunState::Completed);
                Ok(response)
            }
            Err(failure) => {
                let failure = Error::bootstrap(state, failure);
                error!(error = %failure, "Front controller run failed");
                advance(&mut state, RunState::Failed);
                advance(&mut state, RunState::ErrorReporting);
                match scope.run(|| self.report(&failure, debug_output)) {
                    Ok(response) => {
                        advance(&mut state, RunState::Completed);
                        Ok(response)
                    }
                    Err(secondary) => {
                        advance(&mut state, RunState::FatalAbort);
                        error!(error = %secondary, "Error reporting failed");
                        Err(Error::fatal(failure, secondary))
                    }
                }
            }
        };

        info!(
            state = %state,
            elapsed_ms = started.elapsed().as_millis(),
            "Front controller run finished"
        );
        result
    }

    fn execute(
        &self,
        layers: &[Layer],
        request: Option<Payload>,
        state: &mut RunState,
        debug_output: &mut bool,
    ) -> Result<Response> {
        advance(state, RunState::Configuring);
        let mut all_layers = Vec::with_capacity(layers.len() + 1);
        all_layers.push(self.defaults.clone());
        all_layers.extend(layers.iter().cloned());

        let app = app_settings(&all_layers)?;
        *debug_output = app.debug;
        debug!(
            app = app.name.as_deref().unwrap_or_default(),
            container = %app.container,
            config = %app.config,
            "Selected implementations"
        );
        let registry = self.implementations.registry(&app.container)?;
        let settings = self.implementations.settings(&app.config, &all_layers)?;
        registry.set(CONFIG_SERVICE_ID, Arc::new(Arc::clone(&settings)));
        registry.set(RESPONSE_SERVICE_ID, Arc::new(ResponseSlot::new()));

        self.register_services(registry.as_ref(), settings.as_ref())?;
        advance(state, RunState::ServicesRegistered);

        let stack = self.build_stack(registry.as_ref(), settings.as_ref())?;
        debug!(labels = ?stack.labels(), "Handler chain assembled");
        advance(state, RunState::ChainBuilt);

        advance(state, RunState::Invoking);
        let response = match request {
            Some(request) => stack.invoke_with(request)?,
            None => stack.invoke()?,
        };
        self.emitter.emit(&response)?;
        Ok(response)
    }

    fn register_services(&self, registry: &dyn Registry, settings: &dyn Settings) -> Result<()> {
        let named: BTreeMap<String, String> =
            settings.extract(SERVICES_GROUP, None)?.unwrap_or_default();
        let mut definitions = Vec::with_capacity(named.len());
        for (id, type_name) in named {
            definitions.push((id, self.catalog.resolve(&type_name)?));
        }
        // Inline recipes come last so they win on collision
        definitions.extend(settings.services());

        debug!(count = definitions.len(), "Registering service definitions");
        registry.define_all(definitions);
        Ok(())
    }

    fn build_stack<'a>(
        &'a self,
        registry: &'a dyn Registry,
        settings: &dyn Settings,
    ) -> Result<HandlerStack<'a>> {
        let configured: Vec<StepSpec> = settings
            .extract(MIDDLEWARE_GROUP, None)?
            .unwrap_or_default();
        let terminal = self.steps.iter().chain(&configured).any(|step| step.terminal)
            || self.handlers.iter().any(|inline| inline.terminal);

        let mut stack = HandlerStack::new(registry).with_host(self);
        stack
            .push_multiple(self.steps.iter().cloned())
            .push_multiple(configured);
        for inline in &self.handlers {
            let handler = Arc::clone(&inline.handler);
            stack.push_labelled(inline.label.clone(), move |next| {
                (*handler)(registry, next)
            });
        }
        if !terminal {
            stack.push_step(StepSpec::host(FALLBACK_SELECTOR, FALLBACK_LABEL));
        }
        Ok(stack)
    }

    fn report(&self, failure: &Error, debug_output: bool) -> Result<Response> {
        let response = match &self.error_handler {
            Some(handler) => handler.handle_uncaught(failure)?,
            None => ErrorController::new(debug_output).handle_uncaught(failure)?,
        };
        self.emitter.emit(&response)?;
        Ok(response)
    }
}

impl Default for FrontController {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for FrontController {
    fn handle(&self, selector: &str, next: Next<'_, '_>) -> Result<Response> {
        match selector {
            FALLBACK_SELECTOR => {
                let path = next.request_as::<String>().map(String::as_str);
                warn!(path = ?path, "No handler answered, sending fallback response");
                Ok(Response::not_found(path))
            }
            other => Err(Error::unknown_selector(HOST_TARGET, other)),
        }
    }

    fn selectors(&self) -> Vec<&'static str> {
        vec![FALLBACK_SELECTOR]
    }
}

impl std::fmt::Debug for FrontController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers: Vec<&str> = self.handlers.iter().map(|h| h.label.as_str()).collect();
        f.debug_struct("FrontController")
            .field("steps", &self.steps)
            .field("handlers", &handlers)
            .field("catalog", &self.catalog)
            .field("implementations", &self.implementations)
            .finish_non_exhaustive()
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug!(from = %state, to = %next, "Run state transition");
    *state = next;
}
