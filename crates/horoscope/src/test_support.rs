//! A scripted terminal for driving sessions in tests.
//!
//! Keys come from a fixed script; drawing goes to a ratatui `TestBackend`.
//! Every time a key is requested the current screen is saved as a frame, so
//! tests can assert on exactly what the user saw before each key press.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use ratatui::backend::TestBackend;
use ratatui::buffer::Cell;
use ratatui::style::{Color, Style};
use ratatui::Frame;

use crate::terminal::{Key, Terminal};

pub struct ScriptedTerminal {
    inner: ratatui::Terminal<TestBackend>,
    keys: VecDeque<Key>,
    /// Screen snapshots taken whenever a key was requested.
    pub frames: Vec<Vec<String>>,
    /// Timeouts passed to `wait_key`.
    pub pauses: Vec<Duration>,
}

impl ScriptedTerminal {
    pub fn new(width: u16, height: u16, keys: impl IntoIterator<Item = Key>) -> Self {
        let inner = ratatui::Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("test backend: {e}"));
        Self {
            inner,
            keys: keys.into_iter().collect(),
            frames: Vec::new(),
            pauses: Vec::new(),
        }
    }

    fn rows(&self) -> Vec<&[Cell]> {
        let buffer = self.inner.backend().buffer();
        let width = usize::from(buffer.area.width).max(1);
        buffer.content.chunks(width).collect()
    }

    /// The current screen, one string per row with trailing spaces trimmed.
    pub fn screen(&self) -> Vec<String> {
        self.rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(Cell::symbol)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    /// Runs of on-screen text drawn in `style`, trimmed, one per row.
    pub fn text_in_style(&self, style: Style) -> Vec<String> {
        let matches = |cell: &Cell| {
            cell.fg == style.fg.unwrap_or(Color::Reset)
                && cell.bg == style.bg.unwrap_or(Color::Reset)
                && cell.modifier.contains(style.add_modifier)
        };
        self.rows()
            .into_iter()
            .filter_map(|row| {
                let text: String = row
                    .iter()
                    .skip_while(|c| !matches(*c))
                    .take_while(|c| matches(*c))
                    .map(Cell::symbol)
                    .collect();
                let text = text.trim().to_string();
                (!text.is_empty()).then_some(text)
            })
            .collect()
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }

    fn snapshot(&mut self) {
        let screen = self.screen();
        self.frames.push(screen);
    }
}

impl Terminal for ScriptedTerminal {
    fn size(&self) -> io::Result<(u16, u16)> {
        let area = self.inner.backend().buffer().area;
        Ok((area.width, area.height))
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()> {
        self.inner.draw(|frame| render(frame))?;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.snapshot();
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted")
        })
    }

    /// Timed waits elapse immediately and never consume scripted keys.
    fn wait_key(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        self.snapshot();
        self.pauses.push(timeout);
        Ok(None)
    }
}
