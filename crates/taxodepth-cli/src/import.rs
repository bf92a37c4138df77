//! Hierarchy file loading for the taxodepth CLI
//!
//! Supports CSV files with a `tid,parent` header and JSON Lines files with
//! one `{"tid": …, "parent": …}` object per line. A row whose parent is
//! empty, `null` or `0` marks a root term and adds no edge.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use taxodepth_core::{HierarchyEdge, HierarchyStore, TermId};

/// Column holding the child term.
pub const TERM_COLUMN: &str = "tid";
/// Column holding the parent term.
pub const PARENT_COLUMN: &str = "parent";

/// Counters from loading one hierarchy file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Data rows read.
    pub rows: usize,
    /// Distinct edges added to the store.
    pub edges: usize,
    /// Root rows (no parent).
    pub roots: usize,
    /// Rows repeating an edge already loaded.
    pub duplicates: usize,
}

impl LoadStats {
    fn record(&mut self, store: &mut HierarchyStore, child: TermId, parent: Option<TermId>) {
        self.rows += 1;
        match parent {
            None => self.roots += 1,
            Some(parent) => {
                if store.add_edge(HierarchyEdge::new(child, parent)) {
                    self.edges += 1;
                } else {
                    self.duplicates += 1;
                }
            }
        }
    }
}

/// Loads a hierarchy file, picking the format from its extension.
pub fn load_hierarchy(path: &Path) -> Result<(HierarchyStore, LoadStats)> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_lowercase().as_str() {
        "jsonl" | "ndjson" => load_jsonl(path),
        "csv" => load_csv(path),
        _ => bail!("Unsupported hierarchy format: '{ext}'. Use .csv or .jsonl"),
    }
}

/// Loads a CSV hierarchy with `tid` and `parent` columns.
pub fn load_csv(path: &Path) -> Result<(HierarchyStore, LoadStats)> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let term_idx = column_index(&headers, TERM_COLUMN)?;
    let parent_idx = column_index(&headers, PARENT_COLUMN)?;

    let mut store = HierarchyStore::new();
    let mut stats = LoadStats::default();

    for result in reader.records() {
        let record = result.context("Malformed CSV record")?;
        let line = record.position().map_or(0, csv::Position::line);

        let child = record
            .get(term_idx)
            .map(str::parse::<TermId>)
            .transpose()
            .with_context(|| format!("line {line}: invalid '{TERM_COLUMN}'"))?
            .with_context(|| format!("line {line}: missing '{TERM_COLUMN}'"))?;
        let parent = parse_parent(record.get(parent_idx).unwrap_or(""))
            .with_context(|| format!("line {line}: invalid '{PARENT_COLUMN}'"))?;

        stats.record(&mut store, child, parent);
    }

    Ok((store, stats))
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    tid: TermId,
    #[serde(default)]
    parent: Option<TermId>,
}

/// Loads a JSON Lines hierarchy. Blank lines are skipped.
///
/// Ids may be JSON numbers or strings; all-digit strings are read as
/// numbers, and a `""` or `"0"` parent marks a root like `null` does.
pub fn load_jsonl(path: &Path) -> Result<(HierarchyStore, LoadStats)> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open JSONL file {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut store = HierarchyStore::new();
    let mut stats = LoadStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let line_no = idx + 1;
        let row: JsonRow = serde_json::from_str(&line)
            .with_context(|| format!("line {line_no}: invalid hierarchy row"))?;

        let child = canonical(row.tid)
            .with_context(|| format!("line {line_no}: invalid '{TERM_COLUMN}'"))?;
        let parent = match row.parent {
            Some(TermId::Name(raw)) => parse_parent(&raw)
                .with_context(|| format!("line {line_no}: invalid '{PARENT_COLUMN}'"))?,
            other => other.filter(|p| !is_root_marker(p)),
        };

        stats.record(&mut store, child, parent);
    }

    Ok((store, stats))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .with_context(|| format!("Column '{name}' not found in CSV header"))
}

/// String ids go through the same parsing as CSV cells and CLI terms, so
/// `"2"` and `2` name the same term.
fn canonical(term: TermId) -> Result<TermId> {
    match term {
        TermId::Name(raw) => Ok(raw.parse()?),
        int @ TermId::Int(_) => Ok(int),
    }
}

fn parse_parent(raw: &str) -> Result<Option<TermId>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let parent: TermId = raw.parse()?;
    Ok(Some(parent).filter(|p| !is_root_marker(p)))
}

fn is_root_marker(term: &TermId) -> bool {
    *term == TermId::Int(0)
}
