#![deny(missing_docs)]
//! Built-in selectors for colonist.
//!
//! Provides four [`Selector`] implementations over a shared
//! [`DiscoveryScope`]:
//! - [`ByMarker`]: settlers carrying a capability marker
//! - [`BySupertype`]: settlers whose supertype chain reaches a type
//! - [`ByName`]: settlers whose identity matches a pattern
//! - [`Registered`]: an explicit list
//!
//! Every selector keeps the scope's order and applies the same
//! admission rule: private settlers are never selected, and abstract
//! types and interfaces are left out when the group constructs its
//! settlers (they could never be instantiated).

use colonist_core::composition::{ProductionMode, SelectorSpec};
use colonist_core::error::DiscoveryError;
use colonist_core::id::{Marker, SettlerId};
use colonist_core::scope::DiscoveryScope;
use colonist_core::selector::{SelectionContext, Selector};
use colonist_core::settler::{Candidate, SettlerInfo};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Build the selector a [`SelectorSpec`] describes.
pub fn from_spec(
    spec: &SelectorSpec,
    scope: Arc<dyn DiscoveryScope>,
) -> Result<Arc<dyn Selector>, DiscoveryError> {
    Ok(match spec {
        SelectorSpec::ByMarker { marker } => Arc::new(ByMarker::new(scope, marker.clone())),
        SelectorSpec::BySupertype { supertype } => {
            Arc::new(BySupertype::new(scope, supertype.clone()))
        }
        SelectorSpec::ByName { pattern } => Arc::new(ByName::new(scope, pattern)?),
        SelectorSpec::Registered { settlers } => {
            Arc::new(Registered::new(scope, settlers.iter().cloned()))
        }
        _ => {
            return Err(DiscoveryError::Other(
                format!("unsupported selector declaration: {spec:?}").into(),
            ));
        }
    })
}

/// Whether `info` may be delivered to a group producing via `ctx.production`.
///
/// A settler's own production override takes the group's place.
fn admit(info: &SettlerInfo, ctx: &SelectionContext<'_>, selector: &str) -> bool {
    if !info.is_public() {
        tracing::warn!(
            settler = %info.id,
            group = %ctx.group,
            selector,
            "colonist.select.skip_private"
        );
        return false;
    }
    let production = info.production(ctx.production);
    if production == ProductionMode::Construct && !info.kind.is_instantiable() {
        tracing::debug!(
            settler = %info.id,
            group = %ctx.group,
            kind = ?info.kind,
            production = %production,
            "colonist.select.skip_uninstantiable"
        );
        return false;
    }
    true
}

/// Scan the whole scope, keeping admitted settlers that satisfy `pred`.
fn scan(
    scope: &dyn DiscoveryScope,
    ctx: &SelectionContext<'_>,
    selector: &str,
    mut pred: impl FnMut(&SettlerInfo) -> Result<bool, DiscoveryError>,
) -> Result<Vec<Candidate>, DiscoveryError> {
    let mut candidates = Vec::new();
    for info in scope.settlers()? {
        if pred(&info)? && admit(&info, ctx, selector) {
            candidates.push(Candidate::from(&info));
        }
    }
    tracing::debug!(
        colony = %ctx.colony,
        group = %ctx.group,
        selector,
        selected = candidates.len(),
        "colonist.select.done"
    );
    Ok(candidates)
}

/// Selects settlers carrying a capability marker.
pub struct ByMarker {
    scope: Arc<dyn DiscoveryScope>,
    marker: Marker,
}

impl ByMarker {
    /// Select settlers in `scope` that carry `marker`.
    pub fn new(scope: Arc<dyn DiscoveryScope>, marker: impl Into<Marker>) -> Self {
        Self {
            scope,
            marker: marker.into(),
        }
    }
}

impl Selector for ByMarker {
    fn select(&self, ctx: &SelectionContext<'_>) -> Result<Vec<Candidate>, DiscoveryError> {
        let describe = self.describe();
        scan(self.scope.as_ref(), ctx, &describe, |info| {
            Ok(info.carries(&self.marker))
        })
    }

    fn describe(&self) -> String {
        format!("marker {}", self.marker)
    }
}

/// Selects settlers whose supertype chain reaches a given type.
///
/// Supertypes are followed transitively through the scope. A supertype
/// the scope doesn't know ends that branch of the walk; cycles are cut.
pub struct BySupertype {
    scope: Arc<dyn DiscoveryScope>,
    supertype: SettlerId,
}

impl BySupertype {
    /// Select settlers in `scope` that extend or implement `supertype`.
    pub fn new(scope: Arc<dyn DiscoveryScope>, supertype: impl Into<SettlerId>) -> Self {
        Self {
            scope,
            supertype: supertype.into(),
        }
    }
}

impl Selector for BySupertype {
    fn select(&self, ctx: &SelectionContext<'_>) -> Result<Vec<Candidate>, DiscoveryError> {
        let describe = self.describe();
        let mut resolver = SubtypeResolver::new(self.scope.as_ref(), &self.supertype);
        scan(self.scope.as_ref(), ctx, &describe, |info| {
            resolver.is_subtype(info)
        })
    }

    fn describe(&self) -> String {
        format!("supertype {}", self.supertype)
    }
}

/// Memoized supertype walk for one `select` call.
struct SubtypeResolver<'a> {
    scope: &'a dyn DiscoveryScope,
    base: &'a SettlerId,
    cache: HashMap<SettlerId, bool>,
}

impl<'a> SubtypeResolver<'a> {
    fn new(scope: &'a dyn DiscoveryScope, base: &'a SettlerId) -> Self {
        let mut cache = HashMap::new();
        cache.insert(base.clone(), true);
        Self { scope, base, cache }
    }

    fn is_subtype(&mut self, info: &SettlerInfo) -> Result<bool, DiscoveryError> {
        let mut visiting = HashSet::new();
        self.walk(info, &mut visiting)
    }

    fn walk(
        &mut self,
        info: &SettlerInfo,
        visiting: &mut HashSet<SettlerId>,
    ) -> Result<bool, DiscoveryError> {
        if let Some(&known) = self.cache.get(&info.id) {
            return Ok(known);
        }
        if !visiting.insert(info.id.clone()) {
            return Ok(false);
        }

        let mut found = false;
        for parent in &info.supertypes {
            if parent == self.base {
                found = true;
                break;
            }
            let Some(parent_info) = self.scope.settler(parent)? else {
                continue;
            };
            if self.walk(&parent_info, visiting)? {
                found = true;
                break;
            }
        }

        visiting.remove(&info.id);
        // A negative answer reached while a cycle was cut is only final
        // for the outermost type of the walk.
        if found || visiting.is_empty() {
            self.cache.insert(info.id.clone(), found);
        }
        Ok(found)
    }
}

/// Selects settlers whose identity matches a regular expression.
///
/// The pattern is unanchored; use `^...$` to match whole identities.
pub struct ByName {
    scope: Arc<dyn DiscoveryScope>,
    pattern: Regex,
}

impl ByName {
    /// Compile `pattern` and select matching settlers in `scope`.
    pub fn new(scope: Arc<dyn DiscoveryScope>, pattern: &str) -> Result<Self, DiscoveryError> {
        let pattern = Regex::new(pattern).map_err(|e| DiscoveryError::InvalidPattern {
            pattern: pattern.to_owned(),
            message: e.to_string(),
        })?;
        Ok(Self { scope, pattern })
    }
}

impl Selector for ByName {
    fn select(&self, ctx: &SelectionContext<'_>) -> Result<Vec<Candidate>, DiscoveryError> {
        let describe = self.describe();
        scan(self.scope.as_ref(), ctx, &describe, |info| {
            Ok(self.pattern.is_match(info.id.as_str()))
        })
    }

    fn describe(&self) -> String {
        format!("name /{}/", self.pattern.as_str())
    }
}

/// Selects an explicit list of settlers, in list order.
///
/// Every listed id must be known to the scope.
pub struct Registered {
    scope: Arc<dyn DiscoveryScope>,
    settlers: Vec<SettlerId>,
}

impl Registered {
    /// Select exactly `settlers` from `scope`.
    pub fn new<I, S>(scope: Arc<dyn DiscoveryScope>, settlers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SettlerId>,
    {
        Self {
            scope,
            settlers: settlers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Selector for Registered {
    fn select(&self, ctx: &SelectionContext<'_>) -> Result<Vec<Candidate>, DiscoveryError> {
        let describe = self.describe();
        let mut candidates = Vec::with_capacity(self.settlers.len());
        for id in &self.settlers {
            let info = self
                .scope
                .settler(id)?
                .ok_or_else(|| DiscoveryError::UnknownSettler(id.clone()))?;
            if admit(&info, ctx, &describe) {
                candidates.push(Candidate::from(&info));
            }
        }
        Ok(candidates)
    }

    fn describe(&self) -> String {
        format!("registered list of {}", self.settlers.len())
    }
}
