//! Table recognizer (C7), invoked from the block scanner's table-priority
//! step when the `TABLES` extension is active. Only GFM-style pipe tables
//! (a header row, an alignment row, then body rows) are recognized.

use crate::buffer::Buffer;
use crate::driver::State;
use crate::inline;
use crate::renderer::{Render, Table};

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(|&b| b == b' ' || b == b'\t')
}

fn trim(mut bytes: &[u8]) -> &[u8] {
    while bytes.first() == Some(&b' ') {
        bytes = &bytes[1..];
    }
    while bytes.last() == Some(&b' ') {
        bytes = &bytes[..bytes.len() - 1];
    }
    bytes
}

/// Splits a row on unescaped `|`, stripping one leading and trailing pipe if
/// present (`| a | b |` and `a | b` both yield two cells).
fn split_row(line: &[u8]) -> Vec<&[u8]> {
    let mut line = trim(line);
    if line.first() == Some(&b'|') {
        line = &line[1..];
    }
    if line.last() == Some(&b'|') && !line.ends_with(b"\\|") {
        line = &line[..line.len() - 1];
    }

    let mut cells = Vec::new();
    let mut start = 0;
    let mut k = 0;
    while k < line.len() {
        if line[k] == b'\\' && k + 1 < line.len() {
            k += 2;
            continue;
        }
        if line[k] == b'|' {
            cells.push(trim(&line[start..k]));
            start = k + 1;
        }
        k += 1;
    }
    cells.push(trim(&line[start..]));
    cells
}

fn parse_alignment(cell: &[u8]) -> Option<Table> {
    let cell = trim(cell);
    if cell.is_empty() {
        return None;
    }
    let left_colon = cell.first() == Some(&b':');
    let right_colon = cell.last() == Some(&b':');
    let dashes = &cell[left_colon as usize..cell.len() - right_colon as usize];
    if dashes.len() < 3 || !dashes.iter().all(|&b| b == b'-') {
        return None;
    }
    Some(match (left_colon, right_colon) {
        (true, true) => Table::CENTER,
        (true, false) => Table::LEFT,
        (false, true) => Table::RIGHT,
        (false, false) => Table::empty(),
    })
}

fn parse_delimiter_row(line: &[u8], expected_cells: usize) -> Option<Vec<Table>> {
    let cells = split_row(line);
    if cells.len() != expected_cells {
        return None;
    }
    cells.into_iter().map(parse_alignment).collect()
}

pub fn try_table<R: Render + ?Sized>(state: &mut State, renderer: &mut R, lines: &[&[u8]], i: usize, output: &mut Buffer) -> Option<usize> {
    if is_blank(lines[i]) || i + 1 >= lines.len() {
        return None;
    }
    let header_cells = split_row(lines[i]);
    let aligns = parse_delimiter_row(lines[i + 1], header_cells.len())?;

    let mut header_row = Buffer::new(128);
    for (cell, align) in header_cells.iter().zip(aligns.iter()) {
        let mut content = Buffer::new(32);
        inline::parse_inline(state, renderer, cell, &mut content);
        renderer.table_cell(&mut header_row, &content, *align | Table::HEADER);
    }
    let mut header_buf = Buffer::new(128);
    renderer.table_row(&mut header_buf, &header_row);

    let mut j = i + 2;
    let mut body = Buffer::new(256);
    while j < lines.len() && !is_blank(lines[j]) && lines[j].contains(&b'|') {
        let cells = split_row(lines[j]);
        let mut row = Buffer::new(128);
        for (idx, align) in aligns.iter().enumerate() {
            let cell = cells.get(idx).copied().unwrap_or(&[][..]);
            let mut content = Buffer::new(32);
            inline::parse_inline(state, renderer, cell, &mut content);
            renderer.table_cell(&mut row, &content, *align);
        }
        let mut row_buf = Buffer::new(128);
        renderer.table_row(&mut row_buf, &row);
        body.pipe(&row_buf);
        j += 1;
    }

    renderer.table(output, &header_buf, &body);
    Some(j)
}

/// Builds a table's rendered output from cell text directly, without going
/// through the block scanner. For renderers that synthesize a table from an
/// external data source rather than from parsed Markdown. Every row must
/// have the same cell count as `columns` or this returns
/// `Error::InconsistentColumns`; the parser itself never hits this path
/// since `try_table` pads short rows instead of rejecting them.
pub struct TableBuilder {
    columns: usize,
}

impl TableBuilder {
    pub fn new(columns: usize) -> TableBuilder {
        TableBuilder { columns }
    }

    pub fn build<R: Render + ?Sized>(
        &self,
        renderer: &mut R,
        header: &[(&str, Table)],
        rows: &[Vec<(&str, Table)>],
    ) -> crate::error::Result<Buffer> {
        if header.len() != self.columns {
            return Err(crate::error::Error::InconsistentColumns {
                expected: self.columns,
                found: header.len(),
            });
        }

        let mut header_cells = Buffer::new(128);
        for (text, align) in header {
            let content = Buffer::from(*text);
            renderer.table_cell(&mut header_cells, &content, *align | Table::HEADER);
        }
        let mut header_buf = Buffer::new(128);
        renderer.table_row(&mut header_buf, &header_cells);

        let mut body = Buffer::new(256);
        for row in rows {
            if row.len() != self.columns {
                return Err(crate::error::Error::InconsistentColumns {
                    expected: self.columns,
                    found: row.len(),
                });
            }
            let mut row_cells = Buffer::new(128);
            for (text, align) in row {
                let content = Buffer::from(*text);
                renderer.table_cell(&mut row_cells, &content, *align);
            }
            let mut row_buf = Buffer::new(128);
            renderer.table_row(&mut row_buf, &row_cells);
            body.pipe(&row_buf);
        }

        let mut out = Buffer::new(256);
        renderer.table(&mut out, &header_buf, &body);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::Extension;
    use crate::renderer::html::{Flags, Html};

    #[test]
    fn recognizes_simple_table() {
        let mut state = State::new(Extension::TABLES, 16);
        let mut html = Html::new(Flags::empty(), 0);
        let lines: Vec<&[u8]> = vec![b"a | b", b"--- | ---:", b"1 | 2"];
        let mut output = Buffer::new(128);
        let next = try_table(&mut state, &mut html, &lines, 0, &mut output).unwrap();
        assert_eq!(next, 3);
        let rendered = output.as_str().unwrap();
        assert!(rendered.contains("<table>"));
        assert!(rendered.contains("align=\"right\""));
    }

    #[test]
    fn rejects_delimiter_row_with_too_few_dashes() {
        let mut state = State::new(Extension::TABLES, 16);
        let mut html = Html::new(Flags::empty(), 0);
        let lines: Vec<&[u8]> = vec![b"a|b", b"-|-", b"1|2"];
        let mut output = Buffer::new(32);
        assert!(try_table(&mut state, &mut html, &lines, 0, &mut output).is_none());
    }

    #[test]
    fn rejects_mismatched_delimiter_row() {
        let mut state = State::new(Extension::TABLES, 16);
        let mut html = Html::new(Flags::empty(), 0);
        let lines: Vec<&[u8]> = vec![b"a | b", b"not a delimiter row"];
        let mut output = Buffer::new(32);
        assert!(try_table(&mut state, &mut html, &lines, 0, &mut output).is_none());
    }

    #[test]
    fn table_builder_renders_matching_rows() {
        let mut html = Html::new(Flags::empty(), 0);
        let builder = TableBuilder::new(2);
        let out = builder
            .build(
                &mut html,
                &[("a", Table::empty()), ("b", Table::empty())],
                &[vec![("1", Table::empty()), ("2", Table::empty())]],
            )
            .unwrap();
        let rendered = out.as_str().unwrap();
        assert!(rendered.contains("<th>a</th>"));
        assert!(rendered.contains("<td>1</td>"));
    }

    #[test]
    fn table_builder_rejects_short_row() {
        let mut html = Html::new(Flags::empty(), 0);
        let builder = TableBuilder::new(2);
        let err = builder
            .build(&mut html, &[("a", Table::empty()), ("b", Table::empty())], &[vec![("1", Table::empty())]])
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::InconsistentColumns { expected: 2, found: 1 }
        ));
    }
}
