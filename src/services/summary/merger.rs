use crate::models::{Cell, ColumnGroup, MergedTable, NamedSummarySet};

/// Concatenates every summary side by side. Row keys are the outer union
/// across tables, ordered first-seen in set order; a file missing a key
/// contributes empty cells for that row. `None` means there was nothing to
/// merge and the renderer should emit its no-data notice.
pub fn merge(set: &NamedSummarySet) -> Option<MergedTable> {
    if set.is_empty() {
        return None;
    }

    let mut groups = Vec::new();
    let mut row_keys: Vec<String> = Vec::new();
    for (name, table) in set.iter() {
        groups.push(ColumnGroup {
            file: name.to_string(),
            metrics: table.metrics().to_vec(),
        });
        for key in table.keys() {
            if !row_keys.iter().any(|existing| existing == key) {
                row_keys.push(key.to_string());
            }
        }
    }

    let cells = row_keys
        .iter()
        .map(|key| {
            let mut row = Vec::new();
            for (_, table) in set.iter() {
                match table.get(key) {
                    Some(cells) => row.extend_from_slice(cells),
                    None => row.extend(std::iter::repeat(Cell::Empty).take(table.width())),
                }
            }
            row
        })
        .collect();

    Some(MergedTable {
        row_keys,
        groups,
        cells,
    })
}
