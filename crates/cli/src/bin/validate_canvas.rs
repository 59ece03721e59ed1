use aggregation_engine::money::parse_amount;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use models::{Canvas, ItemKind};
use serde_json::Value;
use std::str::FromStr;
use std::{fs, path::PathBuf};
use utils::{find_dangling_connections, find_duplicate_connection_ids};

#[derive(Parser, Debug)]
#[command(name = "validate-canvas", about = "Check a canvas JSON document for schema and wiring problems.")]
struct Args {
    /// Path to a canvas JSON document
    #[arg(short, long)]
    canvas: PathBuf,
}

#[derive(Default)]
struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Report {
    fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }
    fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
    fn print(&self, file: &str) {
        for w in &self.warnings {
            println!("[WARN] {}: {}", file, w);
        }
        for e in &self.errors {
            println!("[ERROR] {}: {}", file, e);
        }
    }
    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

fn looks_numeric(raw: &str) -> bool {
    raw.chars().any(|c| c.is_ascii_digit())
}

fn validate_document(val: &Value) -> Report {
    let mut rep = Report::default();

    // canvas name length rule from the stored schema
    let name = val.get("name").and_then(|v| v.as_str()).unwrap_or("");
    if name.len() < 3 || name.len() > 50 {
        rep.warn(format!(
            "canvas name '{}' outside the 3..=50 character range",
            name
        ));
    }

    let mut collectors = 0usize;
    if let Some(items) = val.get("items").and_then(|v| v.as_array()) {
        for (i, item) in items.iter().enumerate() {
            if item.get("id").and_then(|v| v.as_str()).unwrap_or("").is_empty() {
                rep.error(format!("items[{}] missing 'id'", i));
            }

            let t = item.get("type").and_then(|v| v.as_str()).unwrap_or("");
            match ItemKind::from_str(t) {
                Err(e) => rep.error(format!("items[{}]: {}", i, e)),
                Ok(ItemKind::Collector) => collectors += 1,
                Ok(kind) => {
                    let raw = item.get("value").and_then(|v| v.as_str()).unwrap_or("");
                    if raw.trim().is_empty() {
                        rep.warn(format!(
                            "items[{}] ({}) has no value, it will count as 0",
                            i, kind
                        ));
                    } else if !looks_numeric(raw) {
                        rep.warn(format!(
                            "items[{}] ({}) value '{}' is not numeric, it will count as {}",
                            i,
                            kind,
                            raw,
                            parse_amount(raw)
                        ));
                    }

                    if kind == ItemKind::Investment {
                        let rate = item
                            .get("investmentReturn")
                            .and_then(|v| v.as_str())
                            .unwrap_or("0");
                        if !rate.trim().is_empty() && !looks_numeric(rate) {
                            rep.warn(format!(
                                "items[{}] investmentReturn '{}' is not numeric, returns will use 0",
                                i, rate
                            ));
                        }
                    }
                }
            }
        }
    } else {
        rep.warn("missing or non-array 'items'");
    }

    if collectors == 0 {
        rep.warn("no collector item, totals will be zero");
    } else if collectors > 1 {
        rep.warn(format!(
            "{} collector items; totals only follow the first one",
            collectors
        ));
    }

    if let Some(connections) = val.get("connections").and_then(|v| v.as_array()) {
        for (i, conn) in connections.iter().enumerate() {
            for key in ["from", "to"] {
                if conn.get(key).and_then(|v| v.as_str()).unwrap_or("").is_empty() {
                    rep.error(format!("connections[{}] missing '{}'", i, key));
                }
            }
        }
    }

    rep
}

// Wiring hygiene needs the typed document; skipped when it does not even
// deserialize (the raw pass above will have reported why).
fn validate_wiring(val: &Value, rep: &mut Report) {
    let canvas: Canvas = match serde_json::from_value(val.clone()) {
        Ok(c) => c,
        Err(e) => {
            rep.error(format!("document does not deserialize: {}", e));
            return;
        }
    };

    for id in find_duplicate_connection_ids(&canvas) {
        rep.warn(format!("duplicate connection id '{}'", id));
    }
    for conn in find_dangling_connections(&canvas) {
        rep.warn(format!(
            "connection '{}' references a missing item ({} -> {})",
            conn.id, conn.from, conn.to
        ));
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file_name = args
        .canvas
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("canvas.json")
        .to_string();
    let txt = fs::read_to_string(&args.canvas)
        .with_context(|| format!("reading {}", args.canvas.display()))?;
    let val: Value = serde_json::from_str(&txt)
        .with_context(|| format!("parsing {}", args.canvas.display()))?;

    let mut report = validate_document(&val);
    validate_wiring(&val, &mut report);
    report.print(&file_name);

    if report.has_errors() {
        Err(anyhow!("Validation failed"))
    } else {
        println!("{} passed basic validation.", file_name);
        Ok(())
    }
}
