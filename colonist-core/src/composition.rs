//! Declarative composition: which groups a colony type declares, and how
//! each group selects, produces and accepts its settlers.
//!
//! These types are serializable so a composition can live in a config
//! file next to the settler manifest:
//!
//! ```json
//! {
//!   "colony": "ants::Anthill",
//!   "groups": [
//!     {
//!       "marker": "workers",
//!       "selector": { "type": "by_marker", "marker": "ant" },
//!       "producer": "construct",
//!       "acceptor": "callback"
//!     }
//!   ]
//! }
//! ```

use crate::error::CompositionError;
use crate::id::{ColonyId, Marker, SettlerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a group finds its candidates.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectorSpec {
    /// Settlers carrying a capability marker.
    ByMarker {
        /// The marker settlers must carry.
        marker: Marker,
    },
    /// Settlers extending or implementing a supertype.
    BySupertype {
        /// The supertype to match.
        supertype: SettlerId,
    },
    /// Settlers whose identity matches a regular expression.
    ByName {
        /// The pattern, in `regex` syntax.
        pattern: String,
    },
    /// An explicit list, in list order.
    Registered {
        /// The settlers to select.
        settlers: Vec<SettlerId>,
    },
}

/// How a group turns a candidate into a deliverable value.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionMode {
    /// Create a new instance through the settler's zero-argument factory.
    Construct,
    /// Ask the colony's produce callback.
    Callback,
    /// Deliver the settler's identity without instantiating it.
    Identity,
}

impl fmt::Display for ProductionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductionMode::Construct => f.write_str("construct"),
            ProductionMode::Callback => f.write_str("callback"),
            ProductionMode::Identity => f.write_str("identity"),
        }
    }
}

/// How a group delivers produced values to the colony.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceMode {
    /// Hand each value to the colony's accept callback.
    Callback,
    /// Produce for side effects only; drop the value.
    Forget,
}

impl fmt::Display for AcceptanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptanceMode::Callback => f.write_str("callback"),
            AcceptanceMode::Forget => f.write_str("forget"),
        }
    }
}

/// One declared strategy group.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Marker naming the group; used for filtering.
    pub marker: Marker,
    /// Selection strategy.
    pub selector: SelectorSpec,
    /// Production strategy.
    pub producer: ProductionMode,
    /// Acceptance strategy.
    pub acceptor: AcceptanceMode,
}

impl GroupSpec {
    /// Declare a group.
    pub fn new(
        marker: impl Into<Marker>,
        selector: SelectorSpec,
        producer: ProductionMode,
        acceptor: AcceptanceMode,
    ) -> Self {
        Self {
            marker: marker.into(),
            selector,
            producer,
            acceptor,
        }
    }
}

/// Every group declared on one colony type, in declaration order.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionSpec {
    /// Colony identity. Defaults to the Rust type name when composed.
    #[serde(default)]
    pub colony: Option<ColonyId>,
    /// Declared groups.
    #[serde(default)]
    pub groups: Vec<GroupSpec>,
}

impl CompositionSpec {
    /// An empty composition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group.
    pub fn with_group(mut self, group: GroupSpec) -> Self {
        self.groups.push(group);
        self
    }

    /// Parse a composition from JSON.
    pub fn from_json(json: &str) -> Result<Self, CompositionError> {
        serde_json::from_str(json).map_err(|e| CompositionError::Malformed(e.to_string()))
    }
}
