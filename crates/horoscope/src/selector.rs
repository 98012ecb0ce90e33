use horoscope_cache::HoroscopeCache;
use horoscope_models::Sign;
use ratatui::layout::Rect;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;
use tracing::info;

use crate::error::AppError;
use crate::style::{Palette, Role};
use crate::terminal::{Key, Terminal};

pub const LIGHTBAR_WIDTH: u16 = 15;
pub const LIGHTBAR_HEIGHT: u16 = 14;

/// Plain ASCII box drawing.
const ASCII_BORDER: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

/// What a keypress did to the lightbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightbarEvent {
    Moved,
    Selected(Sign),
    Cancelled,
    Redraw,
    Ignored,
}

/// A bordered single-choice list of the twelve signs.
#[derive(Debug, Clone, Default)]
pub struct Lightbar {
    state: ListState,
}

impl Lightbar {
    /// Start with `initial` highlighted, or the first sign.
    pub fn new(initial: Option<Sign>) -> Self {
        Self {
            state: ListState::default().with_selected(Some(initial.map(|s| s.index()).unwrap_or(0))),
        }
    }

    fn index(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }

    pub fn highlighted(&self) -> Sign {
        Sign::ALL[self.index().min(Sign::ALL.len() - 1)]
    }

    pub fn handle(&mut self, key: Key) -> LightbarEvent {
        let last = Sign::ALL.len() - 1;
        let before = self.index();
        let after = match key {
            Key::Up | Key::Char('k') => before.saturating_sub(1),
            Key::Down | Key::Char('j') => (before + 1).min(last),
            Key::Home => 0,
            Key::End => last,
            Key::Enter => return LightbarEvent::Selected(self.highlighted()),
            Key::Escape | Key::Char('q') => return LightbarEvent::Cancelled,
            Key::Resize => return LightbarEvent::Redraw,
            Key::Char(c) if c.is_alphabetic() => next_with_letter(before, c).unwrap_or(before),
            _ => return LightbarEvent::Ignored,
        };
        if after == before {
            LightbarEvent::Ignored
        } else {
            self.state.select(Some(after));
            LightbarEvent::Moved
        }
    }

    /// Top-left corner of the box, centered on a `width`x`height` terminal.
    pub fn origin(width: u16, height: u16) -> (u16, u16) {
        (
            (width / 2).saturating_sub(7),
            (height / 2).saturating_sub(7),
        )
    }

    /// The box, centered in `area` and clipped to it.
    pub fn area(area: Rect) -> Rect {
        let (x, y) = Self::origin(area.width, area.height);
        Rect::new(area.x + x, area.y + y, LIGHTBAR_WIDTH, LIGHTBAR_HEIGHT).intersection(area)
    }

    pub fn render(&mut self, frame: &mut Frame, palette: &Palette) {
        let lowlight = palette.style(Role::LightbarLowlight);
        let items: Vec<ListItem> = Sign::ALL
            .iter()
            .map(|sign| ListItem::new(sign.as_str()).style(lowlight))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(ASCII_BORDER)
                    .border_style(palette.style(Role::LightbarBorder)),
            )
            .highlight_style(palette.style(Role::LightbarHighlight));
        let area = Self::area(frame.area());
        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

/// Index of the next sign after `from` whose name starts with `letter`.
fn next_with_letter(from: usize, letter: char) -> Option<usize> {
    let letter = letter.to_ascii_lowercase();
    let count = Sign::ALL.len();
    (1..=count)
        .map(|step| (from + step) % count)
        .find(|&i| Sign::ALL[i].as_str().to_ascii_lowercase().starts_with(letter))
}

/// Return `stored`, the sign already saved for `handle`, or let the user
/// pick one.
///
/// With `force` the stored sign is ignored (but pre-highlighted). A pick is
/// persisted for `handle`; cancelling returns `None` and stores nothing.
pub fn choose_sign(
    term: &mut dyn Terminal,
    cache: &HoroscopeCache,
    handle: &str,
    stored: Option<Sign>,
    force: bool,
    palette: &Palette,
) -> Result<Option<Sign>, AppError> {
    if !force {
        if let Some(sign) = stored {
            return Ok(Some(sign));
        }
    }

    let mut lightbar = Lightbar::new(stored);
    term.draw(&mut |frame| lightbar.render(frame, palette))?;

    loop {
        match lightbar.handle(term.read_key()?) {
            LightbarEvent::Selected(sign) => {
                cache.set_user_sign(handle, sign)?;
                info!(handle, %sign, "Stored sign selection");
                return Ok(Some(sign));
            }
            LightbarEvent::Cancelled => return Ok(None),
            LightbarEvent::Moved | LightbarEvent::Redraw => {
                term.draw(&mut |frame| lightbar.render(frame, palette))?
            }
            LightbarEvent::Ignored => {}
        }
    }
}
