//! Domain constants
//!
//! Well-known identifiers shared by the registry, the settings store and
//! the front controller.

/// Registry identifier of the settings store
pub const CONFIG_SERVICE_ID: &str = "config";

/// Registry identifier of the per-run response slot
pub const RESPONSE_SERVICE_ID: &str = "response";

/// Step target naming the front controller itself
pub const HOST_TARGET: &str = "$this";

/// Settings group holding the registry and settings store selection
pub const APP_GROUP: &str = "app";

/// Settings group holding service definitions
pub const SERVICES_GROUP: &str = "services";

/// Settings group holding the application step list
pub const MIDDLEWARE_GROUP: &str = "middleware";

/// Settings group reserved for the router
pub const ROUTES_GROUP: &str = "routes";

/// Settings group reserved for per-route steps
pub const ROUTE_MIDDLEWARE_GROUP: &str = "routeMiddleware";

/// Settings group holding the logging configuration
pub const LOGGING_GROUP: &str = "logging";
