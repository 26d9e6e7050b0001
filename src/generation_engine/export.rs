use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::generation_engine::models::{Entry, GenerationReport, Provenance};

/// File name the listing is offered under for download.
pub const DEFAULT_LISTING_FILE_NAME: &str = "mega_sena_jogos.txt";

/// How the text listing renders each line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStyle {
    /// Numbers only: `03 08 11 14 16 29`.
    #[default]
    Plain,
    /// Seed lines keep their label, `03 08 11 14 16 29 (Janine)`, so the
    /// listing can be parsed back as seed text.
    Labeled,
}

fn listing_line(entry: &Entry, style: ListingStyle) -> String {
    match (style, entry.provenance()) {
        (ListingStyle::Labeled, Provenance::Seed) => {
            format!("{} ({})", entry.numbers_str(), entry.label())
        }
        _ => entry.numbers_str(),
    }
}

/// Newline-separated listing of every produced entry: seeds, then derived,
/// then exploratory.
pub fn render_listing(report: &GenerationReport, style: ListingStyle) -> String {
    report
        .entries()
        .map(|e| listing_line(e, style))
        .collect::<Vec<_>>()
        .join("\n")
}

fn entry_json(entry: &Entry) -> Value {
    json!({
        "numbers": entry.numbers(),
        "label": entry.label(),
        "provenance": entry.provenance(),
        "profile": entry.profile(),
    })
}

/// Numeric summary plus every entry, ready to hand to a UI or write to disk.
pub fn to_summary_json(report: &GenerationReport) -> Value {
    let counts = report.counts();
    let warnings: Vec<Value> = report
        .warnings
        .iter()
        .map(|w| {
            json!({
                "provenance": w.provenance,
                "requested": w.requested,
                "produced": w.produced,
                "cause": w.cause,
                "message": w.to_string(),
            })
        })
        .collect();
    let entries: Vec<Value> = report.entries().map(entry_json).collect();

    json!({
        "plan": report.plan,
        "produced": {
            "seeds": counts.seeds,
            "derived": counts.derived,
            "exploratory": counts.exploratory,
        },
        "absorbed_seeds": report.absorbed_seeds,
        "yielded": report.yielded(),
        "unit_price": report.unit_price,
        "cost": report.cost(),
        "partial": report.is_partial(),
        "warnings": warnings,
        "entries": entries,
    })
}
