use crate::models::MergedTable;

/// Emits the merged table as an HTML table with a two-row header: the key
/// column label spans both header rows, each file spans its metric columns,
/// and the second row lists the metric labels. Cell text is escaped here,
/// at the rendering boundary; the merge stage never sees markup.
pub fn render_grouped_table(merged: Option<&MergedTable>, key_label: &str) -> String {
    let Some(table) = merged else {
        return "<p>No summary data found.</p>".to_string();
    };

    let mut html =
        String::from(r#"<table border="1" style="width:100%; border-collapse: collapse;">"#);
    html.push_str(&format!(
        r#"<tr><th rowspan="2">{}</th>"#,
        html_escape(key_label)
    ));
    for group in &table.groups {
        html.push_str(&format!(
            r#"<th colspan="{}">{}</th>"#,
            group.metrics.len(),
            html_escape(&group.file)
        ));
    }
    html.push_str("</tr><tr>");
    for group in &table.groups {
        for metric in &group.metrics {
            html.push_str(&format!("<th>{}</th>", html_escape(metric)));
        }
    }
    html.push_str("</tr>");

    for (key, row) in table.row_keys.iter().zip(&table.cells) {
        html.push_str(&format!("<tr><td>{}</td>", html_escape(key)));
        for cell in row {
            html.push_str(&format!("<td>{}</td>", html_escape(&cell.to_string())));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, NamedSummarySet, SummaryTable};
    use crate::services::summary::merge;

    fn two_file_set() -> NamedSummarySet {
        let mut file1 = SummaryTable::new(vec!["A".to_string(), "B".to_string()]);
        file1.push_row("Jan".to_string(), vec![Cell::Number(1.0), Cell::Number(2.0)]);
        file1.push_row("Feb".to_string(), vec![Cell::Number(3.0), Cell::Number(4.0)]);

        let mut file2 = SummaryTable::new(vec!["A".to_string(), "C".to_string()]);
        file2.push_row("Feb".to_string(), vec![Cell::Number(5.0), Cell::Number(6.0)]);
        file2.push_row("Mar".to_string(), vec![Cell::Number(7.0), Cell::Number(8.0)]);

        let mut set = NamedSummarySet::default();
        set.insert("file1".to_string(), file1);
        set.insert("file2".to_string(), file2);
        set
    }

    #[test]
    fn none_renders_no_data_notice() {
        let html = render_grouped_table(None, "Month of Nivedan");
        assert!(html.contains("No summary data found."));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn grouped_header_spans_match_metric_counts() {
        let set = two_file_set();
        let merged = merge(&set).unwrap();
        let html = render_grouped_table(Some(&merged), "Month of Nivedan");

        assert!(html.contains(r#"<th rowspan="2">Month of Nivedan</th>"#));
        assert!(html.contains(r#"<th colspan="2">file1</th><th colspan="2">file2</th>"#));
        assert!(html.contains("<th>A</th><th>B</th><th>A</th><th>C</th>"));
    }

    #[test]
    fn body_rows_follow_merged_order_with_empty_holes() {
        let set = two_file_set();
        let merged = merge(&set).unwrap();
        let html = render_grouped_table(Some(&merged), "Month of Nivedan");

        // Jan is absent from file2, so its last two cells are empty.
        assert!(html.contains("<tr><td>Jan</td><td>1</td><td>2</td><td></td><td></td></tr>"));
        assert!(html.contains("<tr><td>Feb</td><td>3</td><td>4</td><td>5</td><td>6</td></tr>"));
        assert!(html.contains("<tr><td>Mar</td><td></td><td></td><td>7</td><td>8</td></tr>"));
    }

    #[test]
    fn cell_text_is_escaped() {
        let mut table = SummaryTable::new(vec!["Note".to_string()]);
        table.push_row(
            "Jan".to_string(),
            vec![Cell::Text("<script>alert(1)</script>".to_string())],
        );
        let mut set = NamedSummarySet::default();
        set.insert("a&b".to_string(), table);

        let merged = merge(&set).unwrap();
        let html = render_grouped_table(Some(&merged), "Month of Nivedan");

        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("a&amp;b"));
        assert!(!html.contains("<script>"));
    }
}
