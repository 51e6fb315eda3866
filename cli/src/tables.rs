use itertools::Itertools;

#[derive(Clone, Copy)]
pub enum Align {
    Left,
    Right,
}

pub struct Column<'a, TRow> {
    title: String,
    align: Align,
    get_content: &'a dyn Fn(&TRow) -> String,
}
impl<'a, TRow> Column<'a, TRow> {
    pub fn new(title: &str, get_content: &'a dyn Fn(&TRow) -> String) -> Self {
        Self {
            title: title.to_string(),
            align: Align::Left,
            get_content,
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

enum RowData {
    Separator,
    Cells(Vec<String>),
}

#[derive(Clone)]
pub struct Settings {
    pub colsep: String,
}
impl Default for Settings {
    fn default() -> Self {
        Settings {
            colsep: "│".to_string(),
        }
    }
}

pub struct Table<'a, TRow> {
    columns: Vec<Column<'a, TRow>>,
    rows: Vec<RowData>,
    settings: Settings,
}
impl<'a, TRow> Table<'a, TRow> {
    /// A new table, starting with the column titles
    pub fn new(columns: Vec<Column<'a, TRow>>, settings: &Settings) -> Self {
        let titles = columns.iter().map(|c| c.title.clone()).collect();
        Self {
            rows: vec![RowData::Cells(titles), RowData::Separator],
            columns,
            settings: settings.clone(),
        }
    }

    pub fn add_rows<'r>(&mut self, rows: impl IntoIterator<Item = &'r TRow>)
    where
        TRow: 'r,
    {
        for row in rows {
            let cells =
                self.columns.iter().map(|col| (col.get_content)(row)).collect();
            self.rows.push(RowData::Cells(cells));
        }
    }

    /// A last row, after a separator.  Cells are given explicitly since a
    /// footer (a total for instance) is rarely of the same type as the rows.
    pub fn add_footer(&mut self, cells: Vec<String>) {
        self.rows.push(RowData::Separator);
        self.rows.push(RowData::Cells(cells));
    }

    /// Widest cell in each column
    fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(colidx, _)| {
                self.rows
                    .iter()
                    .filter_map(|row| match row {
                        RowData::Separator => None,
                        RowData::Cells(cells) => cells.get(colidx),
                    })
                    .map(|c| c.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table.  Lines longer than max_width are truncated.
    pub fn to_string(&self, max_width: usize) -> String {
        let widths = self.compute_widths();
        let mut result = String::new();

        for row in &self.rows {
            let line = match row {
                RowData::Separator => widths
                    .iter()
                    .map(|w| "─".repeat(*w))
                    .join(&self.settings.colsep),
                RowData::Cells(cells) => self
                    .columns
                    .iter()
                    .zip(&widths)
                    .zip(cells.iter().map(String::as_str).chain(std::iter::repeat("")))
                    .map(|((col, &width), cell)| match col.align {
                        Align::Left => format!("{cell:<width$}"),
                        Align::Right => format!("{cell:>width$}"),
                    })
                    .join(&self.settings.colsep),
            };
            result.extend(line.chars().take(max_width));
            result.push('\n');
        }
        result
    }
}

#[cfg(test)]
mod test {
    use crate::tables::{Align, Column, Settings, Table};

    #[test]
    fn test_table() {
        let name = |row: &(&'static str, u32)| row.0.to_string();
        let count = |row: &(&'static str, u32)| row.1.to_string();
        let columns = vec![
            Column::new("Name", &name),
            Column::new("Count", &count).with_align(Align::Right),
        ];
        let mut table = Table::new(columns, &Settings::default());
        table.add_rows(&[("first", 3), ("second", 12)]);
        table.add_footer(vec!["total".to_string(), "15".to_string()]);

        assert_eq!(
            table.to_string(80),
            "Name  │Count\n\
             ──────│─────\n\
             first │    3\n\
             second│   12\n\
             ──────│─────\n\
             total │   15\n"
        );

        // Too narrow for the whole table
        assert_eq!(
            table.to_string(8),
            "Name  │C\n\
             ──────│─\n\
             first │ \n\
             second│ \n\
             ──────│─\n\
             total │ \n"
        );
    }
}
