use unicode_width::UnicodeWidthStr;

/// Extra columns of padding after each header.
pub const HEADER_PADDING: usize = 5;

/// Plain-text table whose columns are left-aligned and sized from the header
/// labels rather than the cell contents.
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .map(|header| header.width() + HEADER_PADDING)
            .collect()
    }

    /// Render header and rows, one line each, without a trailing newline.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| render_row(row, &widths))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    row.iter()
        .zip(widths)
        .map(|(cell, width)| {
            let padding = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(padding))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_columns_to_header_width() {
        let mut table = TextTable::new(["Ranking", "User"]);
        table.push_row(vec!["1".to_string(), "alice".to_string()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Ranking      User     ");
        assert_eq!(lines[1], "1            alice    ");
    }

    #[test]
    fn overlong_cells_are_not_truncated() {
        let mut table = TextTable::new(["Id"]);
        table.push_row(vec!["a-very-long-cell".to_string()]);

        assert!(table.render().ends_with("a-very-long-cell"));
    }
}
