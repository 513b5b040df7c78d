use crate::view::TableView;

fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// CSV of every row matching the current search, in display order. Only
/// data columns are exported.
pub fn export_csv(table: &TableView) -> String {
    let mut out = String::new();

    let header: Vec<String> = table.columns().iter().map(|c| field(c.title)).collect();
    out.push_str(&header.join(","));
    out.push_str("\r\n");

    for row in table.filtered_rows() {
        let line: Vec<String> = row.cells.iter().map(|cell| field(&cell.text)).collect();
        out.push_str(&line.join(","));
        out.push_str("\r\n");
    }

    out
}
