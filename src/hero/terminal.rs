use super::view::Frame;
use crate::theme::Palette;
use crossterm::{
    QueueableCommand, cursor,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

/// Puts the terminal in raw mode on an alternate screen and restores it on drop.
pub(crate) struct TerminalGuard<W: Write> {
    writer: W,
    raw_mode: bool,
    restored: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub(crate) fn enter(writer: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Self::take_over(writer, true)
    }

    /// Switch `writer` to the alternate screen. The guard exists before anything is written,
    /// so a failed write still restores the screen and leaves raw mode.
    fn take_over(writer: W, raw_mode: bool) -> io::Result<Self> {
        let mut guard = Self { writer, raw_mode, restored: false };
        guard.writer.queue(terminal::EnterAlternateScreen)?;
        guard.writer.queue(cursor::Hide)?;
        guard.writer.flush()?;
        Ok(guard)
    }

    pub(crate) fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub(crate) fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        let screen = self.leave_screen();
        if self.raw_mode {
            terminal::disable_raw_mode()?;
        }
        screen
    }

    fn leave_screen(&mut self) -> io::Result<()> {
        self.writer.queue(SetAttribute(Attribute::Reset))?;
        self.writer.queue(cursor::Show)?;
        self.writer.queue(terminal::LeaveAlternateScreen)?;
        self.writer.flush()
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::error!("failed to restore terminal: {e}");
        }
    }
}

/// Draw a frame from the top left of the screen, filling unused space with the background.
pub(crate) fn draw<W: Write>(writer: &mut W, frame: &Frame, palette: &Palette, height: u16) -> io::Result<()> {
    writer.queue(SetBackgroundColor(palette.background))?;
    writer.queue(terminal::Clear(ClearType::All))?;
    for (row, line) in frame.lines.iter().take(height as usize).enumerate() {
        writer.queue(cursor::MoveTo(0, row as u16))?;
        for span in &line.spans {
            writer.queue(SetAttribute(if span.bold { Attribute::Bold } else { Attribute::NormalIntensity }))?;
            writer.queue(SetForegroundColor(span.fg.unwrap_or(palette.foreground)))?;
            writer.queue(SetBackgroundColor(span.bg.unwrap_or(palette.background)))?;
            writer.queue(Print(&span.text))?;
        }
        writer.queue(SetBackgroundColor(palette.background))?;
        writer.queue(terminal::Clear(ClearType::UntilNewLine))?;
    }
    writer.queue(SetAttribute(Attribute::Reset))?;
    writer.flush()
}

/// Rewrite the current line in place; used with `--plain` on an interactive terminal.
pub(crate) fn draw_plain<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    writer.queue(cursor::MoveToColumn(0))?;
    writer.queue(terminal::Clear(ClearType::CurrentLine))?;
    writer.queue(Print(line))?;
    writer.flush()
}

/// Write one newline terminated line with no escape codes; used when stdout is a pipe or file.
pub(crate) fn write_line<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    writeln!(writer, "{line}")?;
    writer.flush()
}

/// Reset colors in case the terminal's default differs from the palette.
pub(crate) fn reset_colors<W: Write>(writer: &mut W) -> io::Result<()> {
    writer.queue(SetForegroundColor(Color::Reset))?;
    writer.queue(SetBackgroundColor(Color::Reset))?;
    writer.flush()
}
