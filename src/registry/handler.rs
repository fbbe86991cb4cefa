//! # Handler Contracts
//!
//! The two capability contracts a handler can satisfy, and the type-erased
//! [`Handler`] the store keeps.
//!
//! Implementing [`DragSource`] or [`DropTarget`] proves the capability set at
//! compile time. Handlers assembled at runtime ([`DynamicSource`],
//! [`DynamicTarget`]) report what they actually provide through
//! `capabilities()`, which the contract validator checks before registration.

use super::handler_id::Role;
use serde_json::Value;
use std::sync::Arc;

/// A single method of a handler contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CanDrag,
    BeginDrag,
    EndDrag,
    CanDrop,
    Hover,
    Drop,
}

impl Capability {
    /// Everything a source must provide, in protocol order
    pub const SOURCE: [Capability; 3] = [
        Capability::CanDrag,
        Capability::BeginDrag,
        Capability::EndDrag,
    ];

    /// Everything a target must provide, in protocol order
    pub const TARGET: [Capability; 3] = [Capability::CanDrop, Capability::Hover, Capability::Drop];

    pub fn required_for(role: Role) -> &'static [Capability] {
        match role {
            Role::Source => &Self::SOURCE,
            Role::Target => &Self::TARGET,
        }
    }

    /// Protocol method name
    pub const fn method_name(self) -> &'static str {
        match self {
            Capability::CanDrag => "canDrag",
            Capability::BeginDrag => "beginDrag",
            Capability::EndDrag => "endDrag",
            Capability::CanDrop => "canDrop",
            Capability::Hover => "hover",
            Capability::Drop => "drop",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method_name())
    }
}

/// A participant that can start an interaction and supply its payload
pub trait DragSource: Send + Sync {
    fn can_drag(&self) -> bool;

    /// Start the interaction; the returned value is the dragged item
    fn begin_drag(&self) -> Value;

    fn end_drag(&self);

    /// Capabilities this handler actually provides
    fn capabilities(&self) -> Vec<Capability> {
        Capability::SOURCE.to_vec()
    }
}

/// A participant that can receive an interaction
pub trait DropTarget: Send + Sync {
    fn can_drop(&self, item: &Value) -> bool;

    fn hover(&self, item: &Value);

    /// Accept `item`, optionally producing a drop result
    fn drop_item(&self, item: &Value) -> Option<Value>;

    /// Capabilities this handler actually provides
    fn capabilities(&self) -> Vec<Capability> {
        Capability::TARGET.to_vec()
    }
}

/// A registered handler of either role
#[derive(Clone)]
pub enum Handler {
    Source(Arc<dyn DragSource>),
    Target(Arc<dyn DropTarget>),
}

impl Handler {
    pub fn role(&self) -> Role {
        match self {
            Handler::Source(_) => Role::Source,
            Handler::Target(_) => Role::Target,
        }
    }

    pub fn as_source(&self) -> Option<&Arc<dyn DragSource>> {
        match self {
            Handler::Source(source) => Some(source),
            Handler::Target(_) => None,
        }
    }

    pub fn as_target(&self) -> Option<&Arc<dyn DropTarget>> {
        match self {
            Handler::Target(target) => Some(target),
            Handler::Source(_) => None,
        }
    }

    /// Reference equality: both wrap the same allocation
    pub fn same_handler(&self, other: &Handler) -> bool {
        match (self, other) {
            (Handler::Source(a), Handler::Source(b)) => Arc::ptr_eq(a, b),
            (Handler::Target(a), Handler::Target(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handler::Source(_) => f.write_str("Handler::Source(<Arc<dyn DragSource>>)"),
            Handler::Target(_) => f.write_str("Handler::Target(<Arc<dyn DropTarget>>)"),
        }
    }
}

type Predicate = Box<dyn Fn() -> bool + Send + Sync>;
type Producer = Box<dyn Fn() -> Value + Send + Sync>;
type Callback = Box<dyn Fn() + Send + Sync>;
type ItemPredicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;
type ItemCallback = Box<dyn Fn(&Value) + Send + Sync>;
type ItemHandler = Box<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Source assembled from closures at runtime
///
/// Missing closures are reported by `capabilities()` and rejected at
/// registration; the trait methods fall back to inert defaults.
#[derive(Default)]
pub struct DynamicSource {
    can_drag: Option<Predicate>,
    begin_drag: Option<Producer>,
    end_drag: Option<Callback>,
}

impl DynamicSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_can_drag(mut self, f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.can_drag = Some(Box::new(f));
        self
    }

    pub fn on_begin_drag(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.begin_drag = Some(Box::new(f));
        self
    }

    pub fn on_end_drag(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.end_drag = Some(Box::new(f));
        self
    }
}

impl DragSource for DynamicSource {
    fn can_drag(&self) -> bool {
        self.can_drag.as_ref().is_some_and(|f| f())
    }

    fn begin_drag(&self) -> Value {
        self.begin_drag.as_ref().map_or(Value::Null, |f| f())
    }

    fn end_drag(&self) {
        if let Some(f) = &self.end_drag {
            f();
        }
    }

    fn capabilities(&self) -> Vec<Capability> {
        let provided = [
            (Capability::CanDrag, self.can_drag.is_some()),
            (Capability::BeginDrag, self.begin_drag.is_some()),
            (Capability::EndDrag, self.end_drag.is_some()),
        ];
        provided
            .into_iter()
            .filter_map(|(capability, present)| present.then_some(capability))
            .collect()
    }
}

/// Target assembled from closures at runtime
#[derive(Default)]
pub struct DynamicTarget {
    can_drop: Option<ItemPredicate>,
    hover: Option<ItemCallback>,
    drop: Option<ItemHandler>,
}

impl DynamicTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_can_drop(mut self, f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.can_drop = Some(Box::new(f));
        self
    }

    pub fn on_hover(mut self, f: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.hover = Some(Box::new(f));
        self
    }

    pub fn on_drop(mut self, f: impl Fn(&Value) -> Option<Value> + Send + Sync + 'static) -> Self {
        self.drop = Some(Box::new(f));
        self
    }
}

impl DropTarget for DynamicTarget {
    fn can_drop(&self, item: &Value) -> bool {
        self.can_drop.as_ref().is_some_and(|f| f(item))
    }

    fn hover(&self, item: &Value) {
        if let Some(f) = &self.hover {
            f(item);
        }
    }

    fn drop_item(&self, item: &Value) -> Option<Value> {
        self.drop.as_ref().and_then(|f| f(item))
    }

    fn capabilities(&self) -> Vec<Capability> {
        let provided = [
            (Capability::CanDrop, self.can_drop.is_some()),
            (Capability::Hover, self.hover.is_some()),
            (Capability::Drop, self.drop.is_some()),
        ];
        provided
            .into_iter()
            .filter_map(|(capability, present)| present.then_some(capability))
            .collect()
    }
}
