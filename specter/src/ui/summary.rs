// specter/src/ui/summary.rs
//! Per-label replacement summary printed after processing.

use std::collections::BTreeMap;
use std::io::{self, Write};

use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use specter_core::EffectiveSpan;

/// Prints a small per-label table of resolved spans and touched words.
pub fn print_summary(spans: &[EffectiveSpan], writer: &mut impl Write) -> io::Result<()> {
    if spans.is_empty() {
        writeln!(writer, "No sensitive spans detected.")?;
        return Ok(());
    }

    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for span in spans {
        let entry = counts.entry(span.label.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += span.touched.len();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Label", "Spans", "Words"]);
    for (label, (spans, words)) in counts {
        table.add_row(vec![label.to_string(), spans.to_string(), words.to_string()]);
    }

    writeln!(writer, "{}", table)?;
    Ok(())
}
