//! Declarative chain steps
//!
//! Steps come from the front controller's built-in list and from the
//! `middleware` settings group, in either of two shapes:
//!
//! ```toml
//! middleware = [
//!     ["http", "parseRequest", "Parse request"],
//!     { target = "router", selector = "executeRoute", label = "Execute route", terminal = true },
//! ]
//! ```

use std::fmt;

use scherzo_domain::constants::HOST_TARGET;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What a step runs against
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// The front controller running the chain (`"$this"`)
    Host,
    /// A registry identifier, resolved when the step runs
    Service(String),
}

impl Target {
    /// Parse a settings value; `"$this"` names the host
    pub fn parse(target: &str) -> Self {
        if target == HOST_TARGET {
            Self::Host
        } else {
            Self::Service(target.to_string())
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => f.write_str(HOST_TARGET),
            Self::Service(id) => f.write_str(id),
        }
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let target = String::deserialize(deserializer)?;
        Ok(Self::parse(&target))
    }
}

/// One step of the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StepRepr")]
pub struct StepSpec {
    /// What the step runs against
    pub target: Target,
    /// Which behaviour of the target to run
    pub selector: String,
    /// Diagnostic label
    pub label: String,
    /// The step always produces a response
    pub terminal: bool,
}

impl StepSpec {
    /// Step on a registry service
    pub fn service<I, S, L>(id: I, selector: S, label: L) -> Self
    where
        I: Into<String>,
        S: Into<String>,
        L: Into<String>,
    {
        Self {
            target: Target::Service(id.into()),
            selector: selector.into(),
            label: label.into(),
            terminal: false,
        }
    }

    /// Step on the front controller itself
    pub fn host<S: Into<String>, L: Into<String>>(selector: S, label: L) -> Self {
        Self {
            target: Target::Host,
            selector: selector.into(),
            label: label.into(),
            terminal: false,
        }
    }

    /// Mark the step as always producing a response
    #[must_use]
    pub fn terminal(mut self) -> Self {
        self.terminal = true;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StepRepr {
    Triple(Target, String, String),
    Pair(Target, String),
    Table {
        target: Target,
        selector: String,
        #[serde(default)]
        label: String,
        #[serde(default)]
        terminal: bool,
    },
}

impl From<StepRepr> for StepSpec {
    fn from(repr: StepRepr) -> Self {
        match repr {
            StepRepr::Triple(target, selector, label) => Self {
                target,
                selector,
                label,
                terminal: false,
            },
            StepRepr::Pair(target, selector) => Self {
                target,
                selector,
                label: String::new(),
                terminal: false,
            },
            StepRepr::Table {
                target,
                selector,
                label,
                terminal,
            } => Self {
                target,
                selector,
                label,
                terminal,
            },
        }
    }
}
