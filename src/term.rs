use crate::{TermInt, Coords};
use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout(), active: false })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    /// Undoes `setup`. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Drains every key press that is already waiting, without blocking.
    pub fn read_key_events_queue(&self) -> io::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Draws a frame whose outer corners are `top_left` and
    /// `top_left + size - 1`.
    pub fn draw_borders(&mut self, top_left: Coords, size: Coords) -> io::Result<()> {
        let (width, height) = size;
        let (x0, y0) = top_left;
        let end_x = x0 + width - 1;
        let end_y = y0 + height - 1;

        for x in x0..=end_x {
            let ch = if x == x0 || x == end_x {"+"} else {"-"};
            self.print_at((x, y0), ch, None)?;
            self.print_at((x, end_y), ch, None)?;
        }

        for y in y0 + 1..end_y {
            self.print_at((x0, y), "|", None)?;
            self.print_at((end_x, y), "|", None)?;
        }

        Ok(())
    }

    /// Shows a box with the given lines centered on the screen.
    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (
            center.0.saturating_sub(msg_width / 2),
            center.1.saturating_sub(msg_height / 2),
        );

        let blank = " ".repeat(msg_width as usize);
        self.print_at(top_left, &blank, None)?;
        self.print_at((top_left.0, top_left.1 + msg_height - 1), &blank, None)?;

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            self.print_at((top_left.0, y), &padded_line, None)?;
        }

        Ok(())
    }

    pub fn print_at(&mut self, pos: Coords, text: &str, color: Option<Color>) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1))?;

        match color {
            Some(color) => queue!(
                self.stdout,
                style::SetForegroundColor(color),
                style::Print(text),
                style::ResetColor
            ),
            None => queue!(self.stdout, style::Print(text)),
        }
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        // Nothing useful can be done with a failure this late.
        let _ = self.restore();
    }
}
