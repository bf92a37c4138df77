//! Output formatting for expansion results

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde_json::json;
use taxodepth_core::{Direction, ExpansionStats, MatchSet, TermId};

/// Prints matched terms as a table, selected terms first.
pub fn print_table(selected: &[TermId], matched: &MatchSet, stats: &ExpansionStats) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("term").fg(Color::Cyan),
        Cell::new("origin").fg(Color::Cyan),
    ]);

    let mut rows = matched.to_sorted_vec();
    rows.sort_by_key(|term| !selected.contains(term));

    for term in rows {
        let origin = if selected.contains(&term) {
            "selected"
        } else {
            "expanded"
        };
        table.add_row(vec![Cell::new(term.to_string()), Cell::new(origin)]);
    }

    println!("{table}");
    println!(
        "{} terms matched ({} added in {} rounds)",
        matched.len().to_string().green().bold(),
        stats.added,
        stats.rounds
    );
}

/// Prints the expansion as a JSON document.
pub fn print_json(depth: i32, matched: &MatchSet, stats: &ExpansionStats) -> anyhow::Result<()> {
    let doc = json!({
        "depth": depth,
        "direction": Direction::from_depth(depth),
        "matched": matched.to_sorted_vec(),
        "stats": {
            "rounds": stats.rounds,
            "lookups": stats.lookups,
            "added": stats.added,
        },
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
