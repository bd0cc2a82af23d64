//! Summarize a chrome trace captured with `--features profile`
//! (bevy/trace_chrome): total and mean duration per span name.

use std::collections::HashMap;
use std::{env, fs};

use serde::Deserialize;

#[derive(Deserialize)]
struct TraceEvent {
    #[serde(default)]
    name: String,
    #[serde(default)]
    ph: String,
    /// Microseconds.
    #[serde(default)]
    dur: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .ok_or("usage: summarize-trace <trace.json>")?;
    let root: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;

    // Chrome traces come either as a bare event array or wrapped in
    // {"traceEvents": [...]}.
    let events = root
        .as_array()
        .cloned()
        .or_else(|| root.get("traceEvents")?.as_array().cloned())
        .ok_or("not a chrome trace: expected an array or a traceEvents field")?;

    let mut totals: HashMap<String, (f64, u64)> = HashMap::new();
    for value in events {
        let Ok(event) = serde_json::from_value::<TraceEvent>(value) else {
            continue;
        };
        // Only complete ("X") events carry a duration.
        if event.ph != "X" {
            continue;
        }
        let entry = totals.entry(event.name).or_default();
        entry.0 += event.dur;
        entry.1 += 1;
    }

    let mut rows: Vec<_> = totals.into_iter().collect();
    rows.sort_by(|a, b| b.1.0.total_cmp(&a.1.0));

    println!(
        "{:<56} {:>12} {:>10} {:>12}",
        "span", "total ms", "calls", "mean us"
    );
    for (name, (total_us, calls)) in rows.into_iter().take(30) {
        println!(
            "{:<56} {:>12.3} {:>10} {:>12.3}",
            name,
            total_us / 1_000.0,
            calls,
            total_us / calls as f64
        );
    }
    Ok(())
}
