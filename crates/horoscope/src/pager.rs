use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::error::AppError;
use crate::style::{Palette, Role};
use crate::terminal::{Key, Terminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStep {
    Stay,
    Exhausted,
}

/// Page-at-a-time view over a fixed list of pre-wrapped lines. The last
/// screen row is left for a status or prompt line.
#[derive(Debug, Clone)]
pub struct Pager {
    lines: Vec<Line<'static>>,
    offset: usize,
    page_height: usize,
}

impl Pager {
    pub fn new(lines: Vec<Line<'static>>, page_height: usize) -> Self {
        Self {
            lines,
            offset: 0,
            page_height: page_height.max(1),
        }
    }

    pub fn set_page_height(&mut self, page_height: usize) {
        self.page_height = page_height.max(1);
        self.offset = self.offset.min(self.max_offset());
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.page_height)
    }

    pub fn visible(&self) -> &[Line<'static>] {
        let end = (self.offset + self.page_height).min(self.lines.len());
        &self.lines[self.offset..end]
    }

    pub fn page_count(&self) -> usize {
        self.lines.len().div_ceil(self.page_height).max(1)
    }

    /// 1-based page of the first visible line.
    pub fn page_number(&self) -> usize {
        (self.offset / self.page_height + 1).min(self.page_count())
    }

    fn on_last_page(&self) -> bool {
        self.offset + self.page_height >= self.lines.len()
    }

    pub fn handle(&mut self, key: Key) -> PagerStep {
        match key {
            Key::Char(' ') | Key::Char('n') | Key::PageDown | Key::Enter => {
                if self.on_last_page() {
                    return PagerStep::Exhausted;
                }
                self.offset = (self.offset + self.page_height).min(self.max_offset());
            }
            Key::Char('p') | Key::Char('b') | Key::PageUp => {
                self.offset = self.offset.saturating_sub(self.page_height);
            }
            Key::Down | Key::Char('j') => {
                self.offset = (self.offset + 1).min(self.max_offset());
            }
            Key::Up | Key::Char('k') => self.offset = self.offset.saturating_sub(1),
            Key::Home => self.offset = 0,
            Key::End => self.offset = self.max_offset(),
            Key::Char('q') | Key::Escape => return PagerStep::Exhausted,
            _ => {}
        }
        PagerStep::Stay
    }

    pub fn status_line(&self, palette: &Palette) -> Line<'static> {
        let low = palette.style(Role::PromptLowlight);
        let high = palette.style(Role::PromptHighlight);
        let mut spans = vec![Span::styled(
            format!("-- page {}/{} -- ", self.page_number(), self.page_count()),
            low,
        )];
        for (key, rest) in [("n", "ext "), ("p", "rev "), ("q", "uit")] {
            spans.push(Span::styled("[", low));
            spans.push(Span::styled(key, high));
            spans.push(Span::styled(format!("]{rest}"), low));
        }
        Line::from(spans)
    }

    /// Draw the current page with `footer` on the last row.
    pub fn render(&self, frame: &mut Frame, footer: &Line<'static>) {
        let [body, bottom] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
        let scroll = u16::try_from(self.offset).unwrap_or(u16::MAX);
        frame.render_widget(Paragraph::new(self.lines.clone()).scroll((scroll, 0)), body);
        frame.render_widget(footer.clone(), bottom);
    }
}

/// Rows available for text: everything but the footer row.
pub fn page_height_for(term: &dyn Terminal) -> std::io::Result<usize> {
    let (_, rows) = term.size()?;
    Ok(usize::from(rows.saturating_sub(1)).max(1))
}

/// Show `pager` a page at a time until the reader pages past the end or quits.
pub fn run_pager(
    term: &mut dyn Terminal,
    pager: &mut Pager,
    palette: &Palette,
) -> Result<(), AppError> {
    loop {
        let status = pager.status_line(palette);
        term.draw(&mut |frame| pager.render(frame, &status))?;

        match term.read_key()? {
            Key::Resize => pager.set_page_height(page_height_for(term)?),
            key => {
                if pager.handle(key) == PagerStep::Exhausted {
                    return Ok(());
                }
            }
        }
    }
}
