//! Built-in service types
//!
//! Registered in [`crate::builtin_catalog`] so settings files can use them
//! without host code:
//!
//! ```toml
//! [services]
//! hello = "scherzo.static"
//!
//! [hello]
//! body = "Hello"
//!
//! [[middleware]]
//! target = "hello"
//! selector = "respond"
//! label = "Say hello"
//! terminal = true
//! ```

use scherzo_domain::error::{Error, Result};
use scherzo_domain::ports::{Middleware, Next, Registry, RegistryExt, Service, SettingsExt};
use scherzo_domain::value_objects::Response;
use serde::Deserialize;

/// Catalog name of [`StaticResponder`]
pub const STATIC_RESPONDER_TYPE: &str = "scherzo.static";

/// Answer the request with the configured response
pub const RESPOND_SELECTOR: &str = "respond";

/// Continue the chain and mark the response as passing through
pub const FORWARD_SELECTOR: &str = "forward";

/// Header added by the `forward` selector
pub const SERVED_BY_HEADER: &str = "X-Served-By";

/// Response settings of a [`StaticResponder`], read from the group named
/// after its identifier
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticResponse {
    /// Response body
    pub body: String,
    /// Status code
    pub status: u16,
    /// `Content-Type` header value
    pub content_type: String,
}

impl Default for StaticResponse {
    fn default() -> Self {
        Self {
            body: String::new(),
            status: 200,
            content_type: "text/plain; charset=utf-8".to_string(),
        }
    }
}

/// Chain step target answering with a fixed response
#[derive(Debug, Clone)]
pub struct StaticResponder {
    id: String,
    response: StaticResponse,
}

impl StaticResponder {
    /// The configured response
    pub fn response(&self) -> &StaticResponse {
        &self.response
    }
}

impl Service for StaticResponder {
    fn create(registry: &dyn Registry, id: &str) -> Result<Self> {
        let response = registry
            .settings()?
            .extract::<StaticResponse>(id, None)?
            .unwrap_or_default();
        Ok(Self {
            id: id.to_string(),
            response,
        })
    }
}

impl Middleware for StaticResponder {
    fn handle(&self, selector: &str, next: Next<'_, '_>) -> Result<Response> {
        match selector {
            RESPOND_SELECTOR => Ok(Response::new(self.response.body.clone(), self.response.status)
                .with_header("Content-Type", self.response.content_type.clone())),
            FORWARD_SELECTOR => Ok(next.run()?.with_header(SERVED_BY_HEADER, self.id.clone())),
            other => Err(Error::unknown_selector(self.id.clone(), other)),
        }
    }

    fn selectors(&self) -> Vec<&'static str> {
        vec![RESPOND_SELECTOR, FORWARD_SELECTOR]
    }
}
