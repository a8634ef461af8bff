//! Constants Tests

use scherzo_domain::constants::{CONFIG_SERVICE_ID, HOST_TARGET, RESPONSE_SERVICE_ID};
use scherzo_infrastructure::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_CONFIG_KIND, DEFAULT_CONTAINER_KIND, DEFAULT_LOG_LEVEL,
    FALLBACK_SELECTOR, LOG_ENV_VAR,
};

#[test]
fn test_well_known_identifiers() {
    assert_eq!(CONFIG_SERVICE_ID, "config");
    assert_eq!(RESPONSE_SERVICE_ID, "response");
    assert_eq!(HOST_TARGET, "$this");
}

#[test]
fn test_implementation_kinds() {
    assert_eq!(DEFAULT_CONTAINER_KIND, "container");
    assert_eq!(DEFAULT_CONFIG_KIND, "config");
    assert_eq!(FALLBACK_SELECTOR, "fallback");
}

#[test]
fn test_environment_names() {
    assert_eq!(CONFIG_ENV_PREFIX, "SCHERZO");
    assert_eq!(LOG_ENV_VAR, "SCHERZO_LOG");
    assert_eq!(DEFAULT_LOG_LEVEL, "info");
}
