use dnd_registry::{DragSource, DropTarget};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;

/// Source that always allows dragging and hands out a fixed item
#[derive(Debug)]
pub struct CardSource {
    pub item: Value,
    pub ended: Mutex<u32>,
}

impl CardSource {
    pub fn new(id: u64) -> Self {
        Self {
            item: json!({ "kind": "card", "id": id }),
            ended: Mutex::new(0),
        }
    }

    pub fn shared(id: u64) -> Arc<Self> {
        Arc::new(Self::new(id))
    }
}

impl DragSource for CardSource {
    fn can_drag(&self) -> bool {
        true
    }

    fn begin_drag(&self) -> Value {
        self.item.clone()
    }

    fn end_drag(&self) {
        *self.ended.lock() += 1;
    }
}

/// Target that accepts cards and records what it saw
#[derive(Debug, Default)]
pub struct DeckTarget {
    pub hovered: Mutex<Vec<Value>>,
    pub dropped: Mutex<Vec<Value>>,
}

impl DeckTarget {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl DropTarget for DeckTarget {
    fn can_drop(&self, item: &Value) -> bool {
        item["kind"] == "card"
    }

    fn hover(&self, item: &Value) {
        self.hovered.lock().push(item.clone());
    }

    fn drop_item(&self, item: &Value) -> Option<Value> {
        self.dropped.lock().push(item.clone());
        Some(json!({ "deck": "main" }))
    }
}
