//! Minimal CSV writer for report tables.
//!
//! Text cells are always quoted with inner quotes doubled; numeric cells
//! are written bare. Rows are joined with `\n` and the output has no
//! trailing newline.

/// A single CSV cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Integer(i64),
}

/// Builds a CSV document row by row.
#[derive(Debug, Default)]
pub struct CsvWriter {
    out: String,
    rows: usize,
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one row.
    pub fn write_row(&mut self, cells: &[Cell<'_>]) {
        if self.rows > 0 {
            self.out.push('\n');
        }
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            match cell {
                Cell::Text(text) => {
                    self.out.push('"');
                    self.out.push_str(&text.replace('"', "\"\""));
                    self.out.push('"');
                }
                Cell::Integer(n) => self.out.push_str(&n.to_string()),
            }
        }
        self.rows += 1;
    }

    /// Appends a header row of quoted labels.
    pub fn write_header(&mut self, labels: &[&str]) {
        let cells: Vec<Cell<'_>> = labels.iter().map(|l| Cell::Text(l)).collect();
        self.write_row(&cells);
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_text_and_leaves_numbers_bare() {
        let mut w = CsvWriter::new();
        w.write_header(&["Id", "Name"]);
        w.write_row(&[Cell::Integer(1), Cell::Text("Pizza")]);
        assert_eq!(w.finish(), "\"Id\",\"Name\"\n1,\"Pizza\"");
    }

    #[test]
    fn doubles_inner_quotes() {
        let mut w = CsvWriter::new();
        w.write_row(&[Cell::Text("Joe's \"big\" warehouse, east")]);
        assert_eq!(w.finish(), "\"Joe's \"\"big\"\" warehouse, east\"");
    }

    #[test]
    fn empty_writer_is_empty() {
        assert_eq!(CsvWriter::new().finish(), "");
    }
}
