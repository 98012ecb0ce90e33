use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::Frame;

/// A single keypress, reduced to what the session cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Escape,
    Char(char),
    /// The terminal was resized; whatever is on screen should be redrawn.
    Resize,
    Other,
}

/// The screen and keyboard of one session.
pub trait Terminal {
    /// `(columns, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Replace the whole screen with what `render` draws.
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()>;

    /// Block until a key is pressed.
    fn read_key(&mut self) -> io::Result<Key>;

    /// Wait up to `timeout` for a key press.
    fn wait_key(&mut self, timeout: Duration) -> io::Result<Option<Key>>;
}

pub fn map_key(event: KeyEvent) -> Key {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('d') => Key::Escape,
            _ => Key::Other,
        };
    }

    match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

/// The real terminal: ratatui over crossterm, in raw mode on the alternate
/// screen. Restored on drop.
pub struct CrosstermTerminal {
    inner: ratatui::Terminal<CrosstermBackend<Stdout>>,
}

impl CrosstermTerminal {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        let inner = ratatui::Terminal::new(CrosstermBackend::new(out))?;
        Ok(Self { inner })
    }

    fn next_key(&mut self) -> io::Result<Option<Key>> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(map_key(key))),
            Event::Resize(..) => Ok(Some(Key::Resize)),
            _ => Ok(None),
        }
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.inner.backend_mut(),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

impl Terminal for CrosstermTerminal {
    fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.inner.size()?;
        Ok((size.width, size.height))
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()> {
        self.inner.draw(|frame| render(frame))?;
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Some(key) = self.next_key()? {
                return Ok(key);
            }
        }
    }

    fn wait_key(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        if event::poll(timeout)? {
            self.next_key()
        } else {
            Ok(None)
        }
    }
}
