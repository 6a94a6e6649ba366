//! Text report generation for replay results

use crate::replay::ReplayOutcome;
use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

const RULE: &str = "───────────────────────────────────────────────";

/// Render a replay outcome as a plain text report
pub fn render_text(outcome: &ReplayOutcome, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    if let Err(e) = write_report(&mut out, outcome, generated_at) {
        log::error!("Failed to render report: {}", e);
    }
    out
}

/// Write the report sections to `out`
pub fn write_report<W: Write>(
    out: &mut W,
    outcome: &ReplayOutcome,
    generated_at: DateTime<Utc>,
) -> fmt::Result {
    writeln!(out, "Vehicle Data Replay Report")?;
    writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Notifications delivered: {}", outcome.notifications)?;
    writeln!(out, "Lines skipped:           {}", outcome.skipped_lines)?;
    writeln!(out, "Scheduler ticks:         {}", outcome.ticks)?;

    writeln!(out, "\nChange edges")?;
    writeln!(out, "{}", RULE)?;
    if outcome.edges.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for edge in &outcome.edges {
        let value = edge
            .value
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "  tick {:>5}  line {:>5}  {:<28} {}",
            edge.tick,
            edge.line,
            edge.field.as_str(),
            value
        )?;
    }

    writeln!(out, "\nChanges per watched field")?;
    writeln!(out, "{}", RULE)?;
    for field in &outcome.watched {
        writeln!(
            out,
            "  {:<28} {}",
            field.label(),
            outcome.change_count(*field)
        )?;
    }

    writeln!(out, "\nFinal snapshot")?;
    writeln!(out, "{}", RULE)?;
    for (field, value) in outcome.final_snapshot.iter() {
        let marker = if outcome.pending.contains(&field) { " *" } else { "" };
        writeln!(out, "  {:<28} {}{}", field.as_str(), value, marker)?;
    }
    if !outcome.pending.is_empty() {
        writeln!(out, "\n  * changed since last observed (not polled)")?;
    }

    Ok(())
}
