//! Terminal output device and session guard
//!
//! All terminal I/O lives here. The game only hands over a finished frame and
//! its status lines.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    event::{self, Event, KeyEventKind},
    execute,
    style::Print,
    terminal::{self, ClearType},
};

use crate::renderer::Frame;

/// Somewhere a frame can be shown
pub trait OutputDevice {
    fn present(&mut self, frame: &Frame, status: &[String]) -> io::Result<()>;
}

/// Draws frames at the top-left of a terminal, overwriting the previous one
#[derive(Debug)]
pub struct TerminalOutput<W: Write> {
    out: W,
    /// First row below the last presented status line
    next_row: u16,
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(out: W) -> Self {
        Self { out, next_row: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print a line under the last presented frame
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        let row = self.next_row;
        self.line(row, text)?;
        self.next_row = row.saturating_add(1);
        self.out.flush()
    }

    fn line(&mut self, row: u16, text: &str) -> io::Result<()> {
        // Raw mode: no implicit carriage return, so position every line
        self.out.queue(cursor::MoveTo(0, row))?;
        self.out.queue(Print(text))?;
        self.out.queue(terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }
}

impl<W: Write> OutputDevice for TerminalOutput<W> {
    fn present(&mut self, frame: &Frame, status: &[String]) -> io::Result<()> {
        let mut row: u16 = 0;
        for text in frame.rows() {
            self.line(row, &text)?;
            row = row.saturating_add(1);
        }
        // Blank spacer between playfield and status
        self.line(row, "")?;
        row = row.saturating_add(1);
        for text in status {
            self.line(row, text)?;
            row = row.saturating_add(1);
        }
        self.next_row = row;
        self.out.queue(cursor::MoveTo(0, row))?;
        self.out.queue(terminal::Clear(ClearType::FromCursorDown))?;
        self.out.flush()
    }
}

/// Discards every frame (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl OutputDevice for NullOutput {
    fn present(&mut self, _frame: &Frame, _status: &[String]) -> io::Result<()> {
        Ok(())
    }
}

/// Raw mode + alternate screen for the lifetime of the value
///
/// Dropping the guard restores the terminal, on early returns and unwinding
/// panics alike.
#[derive(Debug)]
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let session = Self { _private: () };
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        log::debug!("Terminal session started");
        Ok(session)
    }
}

/// Block until any key is pressed
pub fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        log::debug!("Terminal session restored");
    }
}
