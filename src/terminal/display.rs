//! Screen layout: fixed header lines, then one line per key, scrolling when full

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, ScrollUp};
use std::io::{self, Write};
use tracing::debug;

use crate::common::constants::terminal::HEADER_LINES;

/// First row available for key lines
pub const FIRST_KEY_ROW: u16 = HEADER_LINES.len() as u16;

#[derive(Debug)]
pub struct KeyDisplay {
    cols: u16,
    rows: u16,
    next_row: u16,
}

impl KeyDisplay {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            next_row: FIRST_KEY_ROW,
        }
    }

    /// Row the next key line will be written to, before any scrolling
    #[cfg(test)]
    pub fn next_row(&self) -> u16 {
        self.next_row
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.next_row = self.next_row.min(rows.max(FIRST_KEY_ROW));
    }

    /// Clear the screen and draw the headers
    pub fn redraw(&mut self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, Clear(ClearType::All))?;
        self.next_row = FIRST_KEY_ROW;
        self.draw_headers(out)?;
        out.flush()
    }

    /// Write one key line, scrolling first when the screen is full
    pub fn show(&mut self, out: &mut impl Write, line: &str) -> io::Result<()> {
        if self.rows <= FIRST_KEY_ROW || self.cols == 0 {
            return Err(io::Error::other("terminal too small for key lines"));
        }

        if self.next_row >= self.rows
            && let Err(e) = self.scroll(out)
        {
            debug!(error = %e, "Scroll failed, redrawing screen");
            self.redraw(out)?;
        }

        queue!(
            out,
            MoveTo(0, self.next_row),
            Clear(ClearType::CurrentLine),
            Print(self.fit(line))
        )?;
        out.flush()?;
        self.next_row += 1;
        Ok(())
    }

    fn scroll(&mut self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, ScrollUp(1))?;
        // The headers scrolled with everything else
        self.draw_headers(out)?;
        self.next_row = self.rows - 1;
        Ok(())
    }

    fn draw_headers(&self, out: &mut impl Write) -> io::Result<()> {
        for (row, header) in HEADER_LINES.iter().enumerate() {
            if row as u16 >= self.rows {
                break;
            }
            queue!(
                out,
                MoveTo(0, row as u16),
                Clear(ClearType::CurrentLine),
                Print(self.fit(header))
            )?;
        }
        Ok(())
    }

    fn fit(&self, line: &str) -> String {
        line.chars().take(usize::from(self.cols)).collect()
    }
}
