use aggregation_engine::money::format_usd;
use aggregation_engine::{generate_totals, write_totals_json};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    let canvas = env::args()
        .position(|a| a == "--canvas")
        .and_then(|i| env::args().nth(i + 1))
        .unwrap_or("canvas.json".to_string());
    let out = env::args()
        .position(|a| a == "--out")
        .and_then(|i| env::args().nth(i + 1));

    let canvas_path = PathBuf::from(&canvas);

    let report = generate_totals(&canvas_path).context("calculate totals")?;

    println!(
        "{}\n  total      : {}\n  investments: {}\n  returns    : {}",
        report.canvas,
        format_usd(report.totals.total),
        format_usd(report.totals.total_investments),
        format_usd(report.totals.investment_returns)
    );

    if let Some(out) = out {
        let out_path = PathBuf::from(&out);
        write_totals_json(&report, &out_path).context("write totals report")?;
        println!("Wrote {}", out_path.display());
    }

    Ok(())
}
