//! Table rendering for formatted output.

/// A simple box-drawing table.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: Vec<&str>) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row. Missing cells render empty; extra cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        out.push_str(&border(&widths, '┌', '┬', '┐'));
        out.push('\n');
        out.push_str(&row_line(&self.headers, &widths));
        out.push('\n');
        out.push_str(&border(&widths, '├', '┼', '┤'));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row_line(row, &widths));
            out.push('\n');
        }
        out.push_str(&border(&widths, '└', '┴', '┘'));

        out
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let mut s = String::new();
    s.push(left);
    for (i, width) in widths.iter().enumerate() {
        s.push_str(&"─".repeat(width + 2));
        if i < widths.len() - 1 {
            s.push(mid);
        }
    }
    s.push(right);
    s
}

fn row_line(row: &[String], widths: &[usize]) -> String {
    let mut s = String::from("│");
    for (i, width) in widths.iter().enumerate() {
        let cell = row.get(i).map(|c| c.as_str()).unwrap_or("");
        let pad = width.saturating_sub(cell.chars().count());
        s.push(' ');
        s.push_str(cell);
        s.push_str(&" ".repeat(pad));
        s.push_str(" │");
    }
    s
}
