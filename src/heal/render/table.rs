use colored::{Color, Colorize};

const TOP: (char, char, char) = ('┌', '┬', '┐');
const BOTTOM: (char, char, char) = ('└', '┴', '┘');
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// Boxed text table with one color per row.
#[derive(Clone, Debug)]
pub struct Table {
    row_colors: Vec<Color>,
    align_right: Vec<bool>,
    indent: usize,
}

impl Table {
    pub fn new(row_colors: Vec<Color>, align_right: Vec<bool>, indent: usize) -> Table {
        Table {
            row_colors,
            align_right,
            indent,
        }
    }

    /// Renders `rows` as borders plus one line per row, each terminated by a
    /// newline.
    pub fn render(&self, rows: &[Vec<String>]) -> String {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                rows.iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let indent = " ".repeat(self.indent);
        let mut out = String::new();
        out.push_str(&indent);
        out.push_str(&border(&widths, TOP));
        out.push('\n');
        for (i, row) in rows.iter().enumerate() {
            out.push_str(&indent);
            out.push(VERTICAL);
            for (col, width) in widths.iter().enumerate() {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                let padded = if self.align_right.get(col).copied().unwrap_or(false) {
                    format!("{:>width$}", cell, width = width)
                } else {
                    format!("{:<width$}", cell, width = width)
                };
                let text = match self.row_colors.get(i) {
                    Some(color) => padded.color(*color).bold().to_string(),
                    None => padded,
                };
                out.push(' ');
                out.push_str(&text);
                out.push(' ');
                out.push(VERTICAL);
            }
            out.push('\n');
        }
        out.push_str(&indent);
        out.push_str(&border(&widths, BOTTOM));
        out.push('\n');
        out
    }
}

fn border(widths: &[usize], (left, mid, right): (char, char, char)) -> String {
    let mut s = String::new();
    s.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            s.push(mid);
        }
        s.extend(std::iter::repeat(HORIZONTAL).take(width + 2));
    }
    s.push(right);
    s
}
