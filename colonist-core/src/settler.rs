//! Settler metadata and selection candidates.

use crate::composition::{AcceptanceMode, ProductionMode};
use crate::id::{Marker, SettlerId};
use serde::{Deserialize, Serialize};

/// What shape a settler type has. Only concrete types can be constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlerKind {
    /// A regular type with instances.
    #[default]
    Concrete,
    /// A partial type; has subtypes but no instances of its own.
    Abstract,
    /// A pure capability contract.
    Interface,
}

impl SettlerKind {
    /// Whether instances of this kind can exist.
    pub fn is_instantiable(self) -> bool {
        matches!(self, SettlerKind::Concrete)
    }
}

/// Whether a settler type may be reached from outside its defining module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Visible to colonies.
    #[default]
    Public,
    /// Hidden; never selected.
    Private,
}

/// Everything the discovery scope knows about one settler type.
///
/// Serializable so a scope can be described in a manifest file:
///
/// ```json
/// { "id": "ants::Worker", "markers": ["ant"], "supertypes": ["ants::Ant"] }
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlerInfo {
    /// Type identity.
    pub id: SettlerId,
    /// Capability markers carried by the type.
    #[serde(default)]
    pub markers: Vec<Marker>,
    /// Direct supertypes and implemented interfaces.
    #[serde(default)]
    pub supertypes: Vec<SettlerId>,
    /// Shape of the type.
    #[serde(default)]
    pub kind: SettlerKind,
    /// Visibility of the type.
    #[serde(default)]
    pub visibility: Visibility,
    /// The type has exactly one shared instance.
    #[serde(default)]
    pub singleton: bool,
    /// Production strategy used for this type instead of its group's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<ProductionMode>,
    /// Acceptance strategy used for this type instead of its group's.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptor: Option<AcceptanceMode>,
}

impl SettlerInfo {
    /// Metadata for a public, concrete, unmarked settler.
    pub fn new(id: impl Into<SettlerId>) -> Self {
        Self {
            id: id.into(),
            markers: Vec::new(),
            supertypes: Vec::new(),
            kind: SettlerKind::Concrete,
            visibility: Visibility::Public,
            singleton: false,
            producer: None,
            acceptor: None,
        }
    }

    /// Metadata keyed by a Rust type's name.
    pub fn of<T: ?Sized>() -> Self {
        Self::new(SettlerId::of::<T>())
    }

    /// Add a capability marker.
    pub fn with_marker(mut self, marker: impl Into<Marker>) -> Self {
        self.markers.push(marker.into());
        self
    }

    /// Add a direct supertype.
    pub fn with_supertype(mut self, supertype: impl Into<SettlerId>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// Set the type's shape.
    pub fn with_kind(mut self, kind: SettlerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Hide the type from selection.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Mark the type as having one shared instance.
    pub fn as_singleton(mut self) -> Self {
        self.singleton = true;
        self
    }

    /// Always produce this type with `mode`, whatever its group declares.
    pub fn produced_by(mut self, mode: ProductionMode) -> Self {
        self.producer = Some(mode);
        self
    }

    /// Always accept this type with `mode`, whatever its group declares.
    pub fn accepted_by(mut self, mode: AcceptanceMode) -> Self {
        self.acceptor = Some(mode);
        self
    }

    /// The production strategy for this type in a group producing with `group`.
    pub fn production(&self, group: ProductionMode) -> ProductionMode {
        self.producer.unwrap_or(group)
    }

    /// Whether the type carries `marker`.
    pub fn carries(&self, marker: &Marker) -> bool {
        self.markers.iter().any(|m| m == marker)
    }

    /// Whether the type is visible to colonies.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// One settler picked by a [`Selector`](crate::Selector) for one `found` call.
///
/// Carries the settler's identity and the per-type strategy overrides;
/// nothing is instantiated yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// Identity of the selected settler type.
    pub id: SettlerId,
    /// The settler has one shared instance.
    pub singleton: bool,
    /// Production strategy replacing the group's, if any.
    pub producer: Option<ProductionMode>,
    /// Acceptance strategy replacing the group's, if any.
    pub acceptor: Option<AcceptanceMode>,
}

impl Candidate {
    /// A candidate for a non-singleton settler without overrides.
    pub fn new(id: impl Into<SettlerId>) -> Self {
        Self {
            id: id.into(),
            singleton: false,
            producer: None,
            acceptor: None,
        }
    }

    /// The production strategy for this candidate in a group producing with `group`.
    pub fn production(&self, group: ProductionMode) -> ProductionMode {
        self.producer.unwrap_or(group)
    }

    /// The acceptance strategy for this candidate in a group accepting with `group`.
    pub fn acceptance(&self, group: AcceptanceMode) -> AcceptanceMode {
        self.acceptor.unwrap_or(group)
    }
}

impl From<&SettlerInfo> for Candidate {
    fn from(info: &SettlerInfo) -> Self {
        Self {
            id: info.id.clone(),
            singleton: info.singleton,
            producer: info.producer,
            acceptor: info.acceptor,
        }
    }
}
