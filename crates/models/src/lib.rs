
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Item kinds

/// Closed set of canvas item kinds. Stored documents historically used the
/// string `total` for the collector kind, so deserialization accepts it as
/// an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
	Bill,
	Income,
	Investment,
	#[serde(alias = "total")]
	Collector,
}

impl ItemKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ItemKind::Bill => "bill",
			ItemKind::Income => "income",
			ItemKind::Investment => "investment",
			ItemKind::Collector => "collector",
		}
	}
}

impl fmt::Display for ItemKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Error)]
#[error("unknown item kind '{0}', expected one of: bill, income, investment, collector")]
pub struct UnknownItemKind(pub String);

impl FromStr for ItemKind {
	type Err = UnknownItemKind;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"bill" => Ok(ItemKind::Bill),
			"income" => Ok(ItemKind::Income),
			"investment" => Ok(ItemKind::Investment),
			"collector" | "total" => Ok(ItemKind::Collector),
			other => Err(UnknownItemKind(other.to_string())),
		}
	}
}

// Canvas document

/// Which side of a box a connection is anchored to. Purely cosmetic: the
/// renderer uses it to route the line, the totals never look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionSide {
	Left,
	Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CanvasItem {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: ItemKind,
	pub name: String,
	pub label: String,
	pub color: String,
	pub position: Position,
	/// Raw currency string as typed by the user, e.g. "$ 1,200.00".
	#[serde(default)]
	pub value: String,
	/// Raw percentage string, only meaningful on investment items.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub investment_return: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
	pub id: String,
	pub from: String,
	pub to: String,
	pub from_side: ConnectionSide,
	pub to_side: ConnectionSide,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
	#[serde(default)]
	pub user_id: String,
	pub name: String,
	#[serde(default)]
	pub items: Vec<CanvasItem>,
	#[serde(default)]
	pub connections: Vec<Connection>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<DateTime<Utc>>,
}

// Output models

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanvasTotals {
	pub total: f64,
	pub total_investments: f64,
	pub investment_returns: f64,
}
