//! Editing operations on a canvas document.
//!
//! These are the document-level rules the editor relies on: one collector
//! per canvas, no self-connections, and no wires left behind when a box is
//! deleted. The totals engine is deliberately more permissive than this
//! (it tolerates whatever ends up in a stored document); these helpers keep
//! well-formed documents well-formed.

use anyhow::{anyhow, Result};
use models::{Canvas, CanvasItem, Connection, ConnectionSide, ItemKind, Position};
use std::collections::HashSet;
use uuid::Uuid;

/// Palette entry describing a new item before it is placed on the canvas.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    pub kind: ItemKind,
    pub label: String,
    pub color: String,
    pub default_value: String,
    pub position: Position,
}

/// Places a new item on the canvas and returns its generated id.
///
/// Names are numbered per kind ("Bill 1", "Bill 2", ...). A second
/// collector is rejected; the totals only ever follow one.
pub fn add_item(canvas: &mut Canvas, template: ItemTemplate) -> Result<String> {
    if template.kind == ItemKind::Collector
        && canvas.items.iter().any(|i| i.kind == ItemKind::Collector)
    {
        return Err(anyhow!("canvas '{}' already has a collector", canvas.name));
    }

    let count = canvas
        .items
        .iter()
        .filter(|i| i.kind == template.kind)
        .count();
    let name = format!("{} {}", template.label, count + 1);
    let investment_return =
        (template.kind == ItemKind::Investment).then(|| "0".to_string());

    let id = Uuid::new_v4().to_string();
    canvas.items.push(CanvasItem {
        id: id.clone(),
        kind: template.kind,
        name,
        label: template.label,
        color: template.color,
        position: template.position,
        value: template.default_value,
        investment_return,
    });
    Ok(id)
}

/// Removes an item and every connection touching it. Returns false when no
/// item had that id.
pub fn remove_item(canvas: &mut Canvas, id: &str) -> bool {
    let before = canvas.items.len();
    canvas.items.retain(|i| i.id != id);
    if canvas.items.len() == before {
        return false;
    }
    canvas
        .connections
        .retain(|c| c.from != id && c.to != id);
    true
}

/// Wires two items together and returns the new connection's id.
///
/// Self-connections are rejected here; the totals engine tolerates them in
/// stored documents but the editor never creates one.
pub fn connect(
    canvas: &mut Canvas,
    from: &str,
    from_side: ConnectionSide,
    to: &str,
    to_side: ConnectionSide,
) -> Result<String> {
    if from == to {
        return Err(anyhow!("cannot connect item '{}' to itself", from));
    }

    let id = Uuid::new_v4().to_string();
    canvas.connections.push(Connection {
        id: id.clone(),
        from: from.to_string(),
        to: to.to_string(),
        from_side,
        to_side,
    });
    Ok(id)
}

/// Removes a connection by id. Returns false when no connection had that id.
pub fn disconnect(canvas: &mut Canvas, connection_id: &str) -> bool {
    let before = canvas.connections.len();
    canvas.connections.retain(|c| c.id != connection_id);
    canvas.connections.len() != before
}

/// Connection ids that appear more than once in the document.
pub fn find_duplicate_connection_ids(canvas: &Canvas) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for conn in &canvas.connections {
        if !seen.insert(conn.id.as_str()) && !duplicates.contains(&conn.id) {
            duplicates.push(conn.id.clone());
        }
    }
    duplicates
}

/// Connections with at least one endpoint that references no item.
///
/// Dangling wires are legal in stored documents (the endpoint carries no
/// value and the totals skip it) but usually mean a deletion went through
/// an older client that did not cascade.
pub fn find_dangling_connections(canvas: &Canvas) -> Vec<&Connection> {
    let ids: HashSet<&str> = canvas.items.iter().map(|i| i.id.as_str()).collect();
    canvas
        .connections
        .iter()
        .filter(|c| !ids.contains(c.from.as_str()) || !ids.contains(c.to.as_str()))
        .collect()
}
