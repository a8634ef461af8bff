//! Handler stack
//!
//! Ordered, short-circuitable chain of handlers. Steps pushed from a
//! [`StepSpec`] resolve their target through the registry only when the
//! chain reaches them, so a fast path that answers early never builds the
//! services behind later steps.

use scherzo_domain::error::{Error, Result};
use scherzo_domain::ports::{Handler, Middleware, Next, Payload, Registry, RegistryExt};
use scherzo_domain::value_objects::Response;
use tracing::debug;

use super::step::{StepSpec, Target};

/// Chain of handlers run front to back
pub struct HandlerStack<'a> {
    registry: &'a dyn Registry,
    host: Option<&'a dyn Middleware>,
    handlers: Vec<Handler<'a>>,
    labels: Vec<String>,
}

impl<'a> HandlerStack<'a> {
    /// Create an empty stack resolving step targets through `registry`
    pub fn new(registry: &'a dyn Registry) -> Self {
        Self {
            registry,
            host: None,
            handlers: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Set the middleware that `Target::Host` steps run against
    #[must_use]
    pub fn with_host(mut self, host: &'a dyn Middleware) -> Self {
        self.host = Some(host);
        self
    }

    /// Append a handler function
    pub fn push<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(Next<'_, 'a>) -> Result<Response> + 'a,
    {
        self.push_labelled("inline handler", handler)
    }

    /// Append a handler function with a diagnostic label
    pub fn push_labelled<L, F>(&mut self, label: L, handler: F) -> &mut Self
    where
        L: Into<String>,
        F: Fn(Next<'_, 'a>) -> Result<Response> + 'a,
    {
        self.handlers.push(Box::new(handler));
        self.labels.push(label.into());
        self
    }

    /// Append a declarative step
    pub fn push_step(&mut self, step: StepSpec) -> &mut Self {
        let registry = self.registry;
        let host = self.host;
        let label = step.label.clone();
        self.push_labelled(label, move |next| run_step(registry, host, &step, next))
    }

    /// Append declarative steps in order
    pub fn push_multiple<I>(&mut self, steps: I) -> &mut Self
    where
        I: IntoIterator<Item = StepSpec>,
    {
        for step in steps {
            self.push_step(step);
        }
        self
    }

    /// Number of handlers in the chain
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if nothing has been pushed
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Labels of the handlers, in chain order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Run the chain without a request
    pub fn invoke(self) -> Result<Response> {
        Next::new(&self.handlers, None).run()
    }

    /// Run the chain with `request` in flight
    pub fn invoke_with(self, request: Payload) -> Result<Response> {
        Next::new(&self.handlers, Some(request)).run()
    }
}

fn run_step(
    registry: &dyn Registry,
    host: Option<&dyn Middleware>,
    step: &StepSpec,
    next: Next<'_, '_>,
) -> Result<Response> {
    debug!(
        label = %step.label,
        target = %step.target,
        selector = %step.selector,
        remaining = next.remaining(),
        "Running chain step"
    );
    match &step.target {
        Target::Host => host
            .ok_or_else(|| {
                Error::configuration(format!(
                    "Step '{}' targets the host but the chain has no host",
                    step.label
                ))
            })?
            .handle(&step.selector, next),
        Target::Service(id) => registry.middleware(id)?.handle(&step.selector, next),
    }
}

impl std::fmt::Debug for HandlerStack<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerStack")
            .field("labels", &self.labels)
            .field("has_host", &self.host.is_some())
            .finish()
    }
}
