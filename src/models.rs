use calamine::Data;
use std::fmt;

/// A single spreadsheet cell after extraction. Rendering is a plain
/// string conversion over the variant, no number or date formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::Float(v) => Cell::Number(*v),
            Data::Int(v) => Cell::Number(*v as f64),
            Data::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// One file's Summary sheet: metric column labels plus rows indexed by the
/// time-key column. Row keys compare by exact string equality.
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    metrics: Vec<String>,
    rows: Vec<(String, Vec<Cell>)>,
}

impl SummaryTable {
    pub fn new(metrics: Vec<String>) -> Self {
        Self {
            metrics,
            rows: Vec::new(),
        }
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn width(&self) -> usize {
        self.metrics.len()
    }

    /// Duplicate keys keep their first position; the latest cells win.
    pub fn push_row(&mut self, key: String, cells: Vec<Cell>) {
        if let Some(existing) = self.rows.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = cells;
        } else {
            self.rows.push((key, cells));
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&[Cell]> {
        self.rows
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, cells)| cells.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Insertion-ordered mapping from file identifier (name without extension)
/// to its extracted summary. The order files were discovered determines the
/// left-to-right column grouping downstream.
#[derive(Debug, Default)]
pub struct NamedSummarySet {
    entries: Vec<(String, SummaryTable)>,
}

impl NamedSummarySet {
    pub fn insert(&mut self, name: String, table: SummaryTable) {
        self.entries.push((name, table));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SummaryTable)> {
        self.entries.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One file's slice of the merged table: the group label shown in the outer
/// header row and the metric labels under it.
#[derive(Debug, Clone)]
pub struct ColumnGroup {
    pub file: String,
    pub metrics: Vec<String>,
}

/// The side-by-side concatenation of every summary. Columns are identified
/// by the (file, metric) pair, never flattened to a joined string, so two
/// files may reuse the same metric name without colliding.
#[derive(Debug)]
pub struct MergedTable {
    pub row_keys: Vec<String>,
    pub groups: Vec<ColumnGroup>,
    pub cells: Vec<Vec<Cell>>,
}

impl MergedTable {
    pub fn width(&self) -> usize {
        self.groups.iter().map(|g| g.metrics.len()).sum()
    }

    pub fn cell(&self, key: &str, file: &str, metric: &str) -> Option<&Cell> {
        let row = self.row_keys.iter().position(|k| k == key)?;
        let mut offset = 0;
        for group in &self.groups {
            if group.file == file {
                let idx = group.metrics.iter().position(|m| m == metric)?;
                return self.cells[row].get(offset + idx);
            }
            offset += group.metrics.len();
        }
        None
    }
}
