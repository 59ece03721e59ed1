//! Totals for a cash-flow canvas.
//!
//! Given a snapshot of canvas items and the connections between them, find
//! everything wired (directly or through other boxes) to the collector and
//! fold the values into three figures: the signed running total, the
//! invested principal, and the expected investment returns. The caller owns
//! the snapshot; nothing here mutates it or touches storage.

pub mod money;
pub mod reachability;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

use models::{Canvas, CanvasItem, CanvasTotals, Connection, ItemKind};

use crate::money::{parse_amount, parse_rate};
use crate::reachability::connected_items;

/// Computes the three canvas figures from an item/connection snapshot.
///
/// Items with no path to the collector contribute nothing regardless of
/// their value. Without any collector the result is all zeros. The editor
/// only ever places one collector per canvas; if a document carries more
/// anyway, the first in item order wins and the remaining collectors'
/// subgraphs are left out of the figures.
pub fn calculate_totals(items: &[CanvasItem], connections: &[Connection]) -> CanvasTotals {
    let mut totals = CanvasTotals::default();

    let collector = match items.iter().find(|item| item.kind == ItemKind::Collector) {
        Some(c) => c,
        None => return totals,
    };

    let connected = connected_items(&collector.id, connections);

    for item in items {
        if !connected.contains(&item.id) {
            continue;
        }
        let value = parse_amount(&item.value);
        match item.kind {
            ItemKind::Income => totals.total += value,
            ItemKind::Bill => totals.total -= value,
            ItemKind::Investment => {
                // Principal leaves the running total but is tracked on its
                // own, together with the return it is expected to generate.
                totals.total -= value;
                totals.total_investments += value;
                let rate = parse_rate(item.investment_return.as_deref().unwrap_or("0"));
                totals.investment_returns += value * rate / 100.0;
            }
            // The collector is the sink, never a contributor.
            ItemKind::Collector => {}
        }
    }

    totals
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsReport {
    pub generated_at: String,
    pub canvas: String,
    pub totals: CanvasTotals,
}

/// Loads a canvas document and computes its totals report.
pub fn generate_totals(canvas_path: &Path) -> Result<TotalsReport> {
    let canvas = load_canvas_json(canvas_path)?;
    let totals = calculate_totals(&canvas.items, &canvas.connections);
    Ok(TotalsReport {
        generated_at: Local::now().to_rfc3339(),
        canvas: canvas.name,
        totals,
    })
}

pub fn load_canvas_json(path: &Path) -> Result<Canvas> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    let canvas: Canvas = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing canvas JSON in {}", path.display()))?;
    Ok(canvas)
}

pub fn write_totals_json(report: &TotalsReport, out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(out_path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{ConnectionSide, Position};

    fn item(id: &str, kind: ItemKind, value: &str) -> CanvasItem {
        CanvasItem {
            id: id.to_string(),
            kind,
            name: id.to_string(),
            label: kind.as_str().to_string(),
            color: "#000000".to_string(),
            position: Position { x: 0.0, y: 0.0 },
            value: value.to_string(),
            investment_return: None,
        }
    }

    fn investment(id: &str, value: &str, rate: &str) -> CanvasItem {
        CanvasItem {
            investment_return: Some(rate.to_string()),
            ..item(id, ItemKind::Investment, value)
        }
    }

    fn conn(id: &str, from: &str, to: &str) -> Connection {
        Connection {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            from_side: ConnectionSide::Right,
            to_side: ConnectionSide::Left,
        }
    }

    #[test]
    fn test_single_income_adds_to_total() {
        let items = vec![
            item("c", ItemKind::Collector, "$ 0.00"),
            item("a", ItemKind::Income, "100"),
        ];
        let connections = vec![conn("e1", "a", "c")];

        let totals = calculate_totals(&items, &connections);
        assert_eq!(totals.total, 100.0);
        assert_eq!(totals.total_investments, 0.0);
        assert_eq!(totals.investment_returns, 0.0);
    }

    #[test]
    fn test_bill_subtracts_from_total() {
        let items = vec![
            item("c", ItemKind::Collector, "$ 0.00"),
            item("b", ItemKind::Bill, "$40.00"),
        ];
        let connections = vec![conn("e1", "b", "c")];

        let totals = calculate_totals(&items, &connections);
        assert_eq!(totals.total, -40.0);
    }

    #[test]
    fn test_investment_tracks_principal_and_returns() {
        let items = vec![
            item("c", ItemKind::Collector, "$ 0.00"),
            investment("i", "1000", "5"),
        ];
        let connections = vec![conn("e1", "i", "c")];

        let totals = calculate_totals(&items, &connections);
        assert_eq!(totals.total, -1000.0);
        assert_eq!(totals.total_investments, 1000.0);
        assert!((totals.investment_returns - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_unconnected_income_contributes_nothing() {
        let items = vec![
            item("c", ItemKind::Collector, "$ 0.00"),
            item("a", ItemKind::Income, "100"),
        ];

        let totals = calculate_totals(&items, &[]);
        assert_eq!(totals, CanvasTotals::default());
    }

    #[test]
    fn test_chain_through_stale_id_still_counts() {
        // "x" exists only in the wiring: the chain a-x-b-c must still carry
        // a and b into the total, while x itself has no value to add.
        let items = vec![
            item("c", ItemKind::Collector, "$ 0.00"),
            item("a", ItemKind::Income, "100"),
            item("b", ItemKind::Bill, "30"),
        ];
        let connections = vec![
            conn("e1", "a", "x"),
            conn("e2", "x", "b"),
            conn("e3", "b", "c"),
        ];

        let totals = calculate_totals(&items, &connections);
        assert_eq!(totals.total, 70.0);
    }

    #[test]
    fn test_first_collector_wins() {
        // Two collectors, each with their own income. Only the subgraph of
        // the first collector in item order makes it into the figures.
        let items = vec![
            item("c1", ItemKind::Collector, "$ 0.00"),
            item("c2", ItemKind::Collector, "$ 0.00"),
            item("a1", ItemKind::Income, "100"),
            item("a2", ItemKind::Income, "999"),
        ];
        let connections = vec![conn("e1", "a1", "c1"), conn("e2", "a2", "c2")];

        let totals = calculate_totals(&items, &connections);
        assert_eq!(totals.total, 100.0);
    }

    #[test]
    fn test_second_collector_never_contributes_a_value() {
        // A stray second collector sitting inside the first one's subgraph
        // is still excluded from the fold.
        let items = vec![
            item("c1", ItemKind::Collector, "$ 0.00"),
            item("c2", ItemKind::Collector, "123"),
            item("a", ItemKind::Income, "100"),
        ];
        let connections = vec![conn("e1", "a", "c1"), conn("e2", "c2", "c1")];

        let totals = calculate_totals(&items, &connections);
        assert_eq!(totals.total, 100.0);
    }

    #[test]
    fn test_no_collector_means_zero_totals() {
        let items = vec![
            item("a", ItemKind::Income, "100"),
            item("b", ItemKind::Bill, "40"),
        ];
        let connections = vec![conn("e1", "a", "b")];

        let totals = calculate_totals(&items, &connections);
        assert_eq!(totals, CanvasTotals::default());
    }

    #[test]
    fn test_malformed_value_counts_as_zero() {
        let items = vec![
            item("c", ItemKind::Collector, "$ 0.00"),
            item("a", ItemKind::Income, "abc"),
            item("b", ItemKind::Income, "50"),
        ];
        let connections = vec![conn("e1", "a", "c"), conn("e2", "b", "c")];

        let totals = calculate_totals(&items, &connections);
        assert_eq!(totals.total, 50.0);
    }

    #[test]
    fn test_missing_return_rate_defaults_to_zero() {
        let items = vec![
            item("c", ItemKind::Collector, "$ 0.00"),
            item("i", ItemKind::Investment, "1000"),
        ];
        let connections = vec![conn("e1", "i", "c")];

        let totals = calculate_totals(&items, &connections);
        assert_eq!(totals.total_investments, 1000.0);
        assert_eq!(totals.investment_returns, 0.0);
    }

    #[test]
    fn test_self_loop_and_duplicates_are_harmless() {
        let items = vec![
            item("c", ItemKind::Collector, "$ 0.00"),
            item("a", ItemKind::Income, "100"),
        ];
        let connections = vec![
            conn("e1", "a", "a"),
            conn("e2", "a", "c"),
            conn("e3", "a", "c"),
        ];

        let totals = calculate_totals(&items, &connections);
        assert_eq!(totals.total, 100.0);
    }

    #[test]
    fn test_same_snapshot_same_result() {
        let items = vec![
            item("c", ItemKind::Collector, "$ 0.00"),
            item("a", ItemKind::Income, "1,250.75"),
            investment("i", "$2,000", "3.5"),
        ];
        let connections = vec![conn("e1", "a", "c"), conn("e2", "i", "a")];

        let first = calculate_totals(&items, &connections);
        let second = calculate_totals(&items, &connections);
        assert_eq!(first, second);
        assert!((first.total - (1250.75 - 2000.0)).abs() < 1e-9);
        assert!((first.investment_returns - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_canvas_end_to_end() {
        let items = vec![
            item("sal", ItemKind::Income, "$ 3,200.00"),
            item("rent", ItemKind::Bill, "$ 1,100.00"),
            item("food", ItemKind::Bill, "$ 450.00"),
            investment("etf", "$ 500.00", "7"),
            item("tot", ItemKind::Collector, "$ 0.00"),
            // Parked off to the side, not wired up yet.
            item("gym", ItemKind::Bill, "$ 60.00"),
        ];
        let connections = vec![
            conn("e1", "sal", "tot"),
            conn("e2", "rent", "tot"),
            conn("e3", "food", "tot"),
            conn("e4", "etf", "tot"),
        ];

        let totals = calculate_totals(&items, &connections);
        assert!((totals.total - (3200.0 - 1100.0 - 450.0 - 500.0)).abs() < 1e-9);
        assert_eq!(totals.total_investments, 500.0);
        assert!((totals.investment_returns - 35.0).abs() < 1e-9);
    }
}
