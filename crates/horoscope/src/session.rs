use std::time::Duration;

use chrono::NaiveDate;
use horoscope_cache::{CacheError, HoroscopeCache};
use horoscope_loader::{load_horoscope, FeedSource};
use horoscope_models::{DisplayConfig, Sign};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::pager::{page_height_for, run_pager, Pager};
use crate::selector::choose_sign;
use crate::style::{Palette, Role};
use crate::terminal::{Key, Terminal};
use crate::text::{compose, wrap_width};

/// Where the session is. Changing sign loops back to `Selecting` instead of
/// starting a new session, so repeated changes never grow the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Selecting { force: bool },
    Displaying(Sign),
    Done,
}

/// One user's visit: pick a sign, read the horoscope, optionally pick again.
pub struct Session<'a> {
    term: &'a mut dyn Terminal,
    cache: &'a HoroscopeCache,
    source: &'a dyn FeedSource,
    display: &'a DisplayConfig,
    palette: &'a Palette,
    handle: String,
    today: NaiveDate,
    /// Shown above an error while a refresh is in flight.
    notice: Option<Line<'static>>,
}

impl<'a> Session<'a> {
    pub fn new(
        term: &'a mut dyn Terminal,
        cache: &'a HoroscopeCache,
        source: &'a dyn FeedSource,
        display: &'a DisplayConfig,
        palette: &'a Palette,
        handle: impl Into<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            term,
            cache,
            source,
            display,
            palette,
            handle: handle.into(),
            today,
            notice: None,
        }
    }

    /// Run until the user leaves. Only terminal failures are returned as
    /// errors; feed and storage problems are shown on screen and end the
    /// session normally.
    pub async fn run(mut self, force_pick: bool) -> Result<(), AppError> {
        let mut state = State::Selecting { force: force_pick };
        loop {
            debug!(?state, "Session state");
            state = match state {
                State::Selecting { force } => self.select(force)?,
                State::Displaying(sign) => self.show(sign).await?,
                State::Done => return Ok(()),
            };
        }
    }

    fn select(&mut self, force: bool) -> Result<State, AppError> {
        let stored = match self.cache.user_sign(&self.handle) {
            Ok(stored) => stored,
            Err(e) => return self.storage_failure(e),
        };

        match choose_sign(
            &mut *self.term,
            self.cache,
            &self.handle,
            stored,
            force,
            self.palette,
        ) {
            Ok(Some(sign)) => Ok(State::Displaying(sign)),
            // Backing out of a re-pick returns to the sign already chosen.
            Ok(None) if force => Ok(stored.map(State::Displaying).unwrap_or(State::Done)),
            Ok(None) => Ok(State::Done),
            Err(AppError::Cache(e)) => self.storage_failure(e),
            Err(e) => Err(e),
        }
    }

    async fn show(&mut self, sign: Sign) -> Result<State, AppError> {
        let fresh = match self.cache.freshness() {
            Ok(stamp) => stamp.is_fresh(self.today),
            Err(e) => return self.storage_failure(e),
        };
        self.notice = None;
        if !fresh {
            let notice = Line::from(Span::styled(
                "Retrieving horoscope... ",
                self.palette.style(Role::PromptLowlight),
            ));
            let screen = vec![Line::default(), notice.clone()];
            self.term
                .draw(&mut |frame| frame.render_widget(Paragraph::new(screen.clone()), frame.area()))?;
            self.notice = Some(notice);
        }

        let record = match load_horoscope(self.cache, self.source, sign, self.today).await {
            Ok(record) => record,
            Err(e) => {
                warn!(%sign, error = %e, "Could not load horoscope");
                self.error_message(e.user_message())?;
                return Ok(State::Done);
            }
        };

        let (width, _) = self.term.size()?;
        let lines = compose(
            sign,
            &record,
            wrap_width(width, self.display.max_wrap_width),
            self.palette,
        );
        let mut pager = Pager::new(lines, page_height_for(&*self.term)?);
        run_pager(&mut *self.term, &mut pager, self.palette)?;

        if self.end_prompt(&mut pager)? == Key::Char('!') {
            Ok(State::Selecting { force: true })
        } else {
            Ok(State::Done)
        }
    }

    fn prompt_line(&self, width: u16) -> Line<'static> {
        let low = self.palette.style(Role::PromptLowlight);
        let high = self.palette.style(Role::PromptHighlight);
        let indent = " ".repeat(usize::from((width / 2).saturating_sub(40)));
        Line::from(vec![
            Span::raw(indent),
            Span::styled("Press ", low),
            Span::styled("!", high),
            Span::styled(" to change your sign or ", low),
            Span::styled("any other key", high),
            Span::styled(" to continue", low),
        ])
    }

    /// Keep the last page on screen with the change-sign prompt under it
    /// until a real key arrives. Resizes reflow and redraw.
    fn end_prompt(&mut self, pager: &mut Pager) -> Result<Key, AppError> {
        loop {
            let (width, _) = self.term.size()?;
            let prompt = self.prompt_line(width);
            self.term.draw(&mut |frame| pager.render(frame, &prompt))?;

            match self.term.read_key()? {
                Key::Resize => pager.set_page_height(page_height_for(&*self.term)?),
                key => return Ok(key),
            }
        }
    }

    fn storage_failure(&mut self, error: CacheError) -> Result<State, AppError> {
        warn!(error = %error, "Horoscope cache unavailable");
        self.error_message("Horoscope cache unavailable.")?;
        Ok(State::Done)
    }

    /// Show `message` in the error color, then pause briefly (a key ends the pause).
    fn error_message(&mut self, message: &str) -> Result<(), AppError> {
        let screen = vec![
            Line::default(),
            self.notice.take().unwrap_or_default(),
            Line::from(Span::styled(message.to_string(), self.palette.style(Role::Error))),
        ];
        self.term
            .draw(&mut |frame| frame.render_widget(Paragraph::new(screen.clone()), frame.area()))?;
        self.term
            .wait_key(Duration::from_millis(self.display.error_pause_ms))?;
        Ok(())
    }
}
