use std::io::{self, Read, Write};

use crossterm::{
    cursor::MoveUp,
    queue,
    terminal::{self, Clear, ClearType},
};

use crate::error::{Error, Result};
use crate::input::{Key, read_key};
use crate::vcs::Commit;

/// Rows shown at once when no page size is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

const HEADER: &str = "Select a commit to replay from:";
const MARKER: &str = "▸";

/// Scrolling single-selection list over a fixed set of commits.
///
/// The cursor is always inside the visible window
/// `[offset, offset + page_size)`. Scrolling is minimal: moving past an edge
/// shifts the window by exactly enough to keep the cursor on its first or
/// last row.
#[derive(Debug, Clone)]
pub struct Picker {
    commits: Vec<Commit>,
    cursor: usize,
    offset: usize,
    page_size: usize,
    columns: Option<usize>,
}

impl Picker {
    /// A `page_size` of zero is treated as one.
    pub fn new(commits: Vec<Commit>, page_size: usize) -> Result<Self> {
        if commits.is_empty() {
            return Err(Error::EmptyCommits);
        }
        Ok(Picker {
            commits,
            cursor: 0,
            offset: 0,
            page_size: page_size.max(1),
            columns: None,
        })
    }

    /// Shorten rendered lines to fit a terminal `columns` wide, so every
    /// line occupies exactly one screen row.
    pub fn with_width(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 >= self.commits.len() {
            return;
        }
        self.cursor += 1;
        if self.cursor >= self.offset + self.page_size {
            self.offset = self.cursor + 1 - self.page_size;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        if self.cursor < self.offset {
            self.offset = self.cursor;
        }
    }

    pub fn selected(&self) -> &Commit {
        &self.commits[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Indices currently inside the viewport.
    pub fn visible(&self) -> std::ops::Range<usize> {
        let end = (self.offset + self.page_size).min(self.commits.len());
        self.offset..end
    }

    /// Draw the header and the visible rows, returning the number of lines
    /// written.
    pub fn render<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        write!(w, "{}\r\n\r\n", self.fit(HEADER.to_string()))?;
        let visible = self.visible();
        let rows = visible.len();
        for i in visible {
            let c = &self.commits[i];
            let marker = if i == self.cursor { MARKER } else { " " };
            let row = format!("  {} {}  {}", marker, c.hash, c.message);
            write!(w, "{}\r\n", self.fit(row))?;
        }
        Ok(rows + 2)
    }

    fn fit(&self, line: String) -> String {
        match self.columns {
            // The last column is left empty; writing into it wraps on some
            // terminals.
            Some(columns) if columns > 4 => truncate(line, columns - 1),
            _ => line,
        }
    }
}

fn truncate(line: String, max: usize) -> String {
    if line.chars().count() <= max {
        line
    } else {
        let truncated: String = line.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

/// Let the user choose a start commit.
///
/// Returns `Ok(None)` when the user quits with `q` or Ctrl+C. Read errors,
/// including end of input, propagate.
pub fn pick_start<R, W>(
    commits: Vec<Commit>,
    input: &mut R,
    output: &mut W,
    page_size: usize,
) -> Result<Option<Commit>>
where
    R: Read + ?Sized,
    W: Write,
{
    let mut picker = Picker::new(commits, page_size)?;
    if let Ok((columns, _)) = terminal::size() {
        picker = picker.with_width(usize::from(columns));
    }
    let mut drawn = picker.render(output)?;
    output.flush()?;

    loop {
        match read_key(input)? {
            Key::Char(b'j') | Key::Down => picker.move_down(),
            Key::Char(b'k') | Key::Up => picker.move_up(),
            Key::Enter => return Ok(Some(picker.selected().clone())),
            Key::Char(b'q') | Key::Interrupt => return Ok(None),
            _ => continue,
        }
        drawn = redraw(&picker, output, drawn)?;
    }
}

fn redraw<W: Write>(picker: &Picker, output: &mut W, drawn: usize) -> io::Result<usize> {
    let up = u16::try_from(drawn).unwrap_or(u16::MAX);
    queue!(output, MoveUp(up), Clear(ClearType::FromCursorDown))?;
    let lines = picker.render(output)?;
    output.flush()?;
    Ok(lines)
}
