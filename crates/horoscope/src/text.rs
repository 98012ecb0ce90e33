//! Horoscope text cleanup, wrapping and composition into styled lines.

use horoscope_models::{HoroscopeRecord, Sign};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::style::{Palette, Role};

const LINE_BREAK_MARKER: &str = "<br>";
const MISENCODED_APOSTROPHE: &str = "\u{9d}\u{9d}\u{9d}";

/// Replace `<br>` with CR/LF and the mis-encoded apostrophe sequence with `'`.
/// Everything else is left byte-for-byte unchanged.
pub fn clean_horoscope(text: &str) -> String {
    text.replace(LINE_BREAK_MARKER, "\r\n")
        .replace(MISENCODED_APOSTROPHE, "'")
}

/// Wrap width for a terminal `term_width` columns wide.
pub fn wrap_width(term_width: u16, max_wrap_width: u16) -> usize {
    usize::from(max_wrap_width.min(term_width.saturating_sub(1))).max(1)
}

/// A line under construction. Adjacent text in the same style shares a span.
#[derive(Default)]
struct LineBuilder {
    spans: Vec<Span<'static>>,
    used: usize,
}

impl LineBuilder {
    fn push(&mut self, style: Style, text: &str) {
        self.used += text.chars().count();
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.content.to_mut().push_str(text),
            _ => self.spans.push(Span::styled(text.to_string(), style)),
        }
    }

    fn finish(&mut self) -> Line<'static> {
        self.used = 0;
        Line::from(std::mem::take(&mut self.spans))
    }
}

/// Greedy word wrap of styled words. Words wider than `width` are split.
/// The space before a word takes that word's style.
fn wrap_words(words: &[(&str, Style)], width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = LineBuilder::default();

    for &(word, style) in words {
        let len = word.chars().count();
        if current.used > 0 && current.used + 1 + len <= width {
            current.push(style, " ");
            current.push(style, word);
            continue;
        }
        if current.used > 0 {
            lines.push(current.finish());
        }
        if len <= width {
            current.push(style, word);
            continue;
        }

        let chars: Vec<char> = word.chars().collect();
        for chunk in chars.chunks(width) {
            let piece: String = chunk.iter().collect();
            current.push(style, &piece);
            if chunk.len() == width {
                lines.push(current.finish());
            }
        }
    }

    if current.used > 0 {
        lines.push(current.finish());
    }
    lines
}

/// Render one labeled section: the label in the text-highlight style, the
/// cleaned body in the text-lowlight style, wrapped to `width`. Line breaks in
/// the body start a new paragraph and an empty paragraph becomes a blank line.
/// A trailing break adds nothing.
pub fn wrap_section(label: &str, body: &str, width: usize, palette: &Palette) -> Vec<Line<'static>> {
    let highlight = palette.style(Role::TextHighlight);
    let lowlight = palette.style(Role::TextLowlight);
    let cleaned = clean_horoscope(body);

    let mut paragraphs: Vec<&str> = cleaned.lines().collect();
    if paragraphs.is_empty() {
        paragraphs.push("");
    }

    let mut lines = Vec::new();
    for (i, paragraph) in paragraphs.into_iter().enumerate() {
        let mut words: Vec<(&str, Style)> = Vec::new();
        if i == 0 {
            words.extend(label.split_whitespace().map(|w| (w, highlight)));
        }
        words.extend(paragraph.split_whitespace().map(|w| (w, lowlight)));

        if words.is_empty() {
            lines.push(Line::default());
        } else {
            lines.extend(wrap_words(&words, width));
        }
    }
    lines
}

/// Compose the full display for `sign`: header, underline, then the six
/// sections separated by blank lines.
pub fn compose(
    sign: Sign,
    record: &HoroscopeRecord,
    width: usize,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let name = capitalize(sign.as_str());
    let underline = "-".repeat(name.chars().count());
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(name, palette.style(Role::HeaderHighlight))),
        Line::from(Span::styled(underline, palette.style(Role::HeaderLowlight))),
        Line::default(),
    ];

    for (i, (section, body)) in record.sections().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(wrap_section(section.label(), body, width, palette));
    }
    lines
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use horoscope_models::ColorConfig;

    use super::*;

    fn palette() -> Palette {
        Palette::from_config(&ColorConfig::default()).unwrap()
    }

    fn plain(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn record(daily: &str, weekly: &str) -> HoroscopeRecord {
        HoroscopeRecord {
            daily: daily.to_string(),
            weekly: weekly.to_string(),
            monthly: "Calm.".to_string(),
            love: "Sweet.".to_string(),
            career: "Busy.".to_string(),
            health: "Rested.".to_string(),
        }
    }

    #[test]
    fn clean_replaces_markers_only() {
        let raw = "You\u{9d}\u{9d}\u{9d}re bold.<br>Rest, \u{9d} not \u{9d}\u{9d}.<br>";
        assert_eq!(
            clean_horoscope(raw),
            "You're bold.\r\nRest, \u{9d} not \u{9d}\u{9d}.\r\n"
        );
    }

    #[test]
    fn clean_leaves_plain_text_untouched() {
        let raw = "Caf\u{e9} <b>bold</b> 100% \"quoted\" \t tabs";
        assert_eq!(clean_horoscope(raw), raw);
    }

    #[test]
    fn wrap_width_caps_at_terminal_minus_one() {
        assert_eq!(wrap_width(120, 79), 79);
        assert_eq!(wrap_width(80, 79), 79);
        assert_eq!(wrap_width(40, 79), 39);
        assert_eq!(wrap_width(0, 79), 1);
    }

    #[test]
    fn section_wraps_within_width() {
        let body = "The stars align in your favor today, so take the chance you have been waiting for.";
        let lines = wrap_section("Today:", body, 20, &palette());
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width() <= 20));
        assert_eq!(plain(&lines).join(" "), format!("Today: {body}"));
    }

    #[test]
    fn label_is_highlighted() {
        let palette = palette();
        let lines = wrap_section("This week:", "Be patient.", 79, &palette);
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].spans,
            vec![
                Span::styled("This week:", palette.style(Role::TextHighlight)),
                Span::styled(" Be patient.", palette.style(Role::TextLowlight)),
            ]
        );
    }

    #[test]
    fn line_breaks_start_paragraphs() {
        let lines = wrap_section("Love:", "First.<br><br>Second.", 79, &palette());
        assert_eq!(plain(&lines), vec!["Love: First.", "", "Second."]);
    }

    #[test]
    fn trailing_break_adds_no_blank_line() {
        let lines = wrap_section("Love:", "First.<br>", 79, &palette());
        assert_eq!(plain(&lines), vec!["Love: First."]);
    }

    #[test]
    fn empty_body_keeps_label() {
        let lines = wrap_section("Health:", "", 79, &palette());
        assert_eq!(plain(&lines), vec!["Health:"]);
    }

    #[test]
    fn long_word_is_split() {
        let lines = wrap_section("Career:", "abcdefghijklmnop", 6, &palette());
        assert_eq!(plain(&lines), vec!["Career", ":", "abcdef", "ghijkl", "mnop"]);
        assert!(lines.iter().all(|l| l.width() <= 6));
    }

    #[test]
    fn compose_header_and_sections() {
        let palette = palette();
        let lines = compose(Sign::Leo, &record("Sunny.", "Windy."), 79, &palette);
        assert_eq!(
            plain(&lines),
            vec![
                "",
                "Leo",
                "---",
                "",
                "Today: Sunny.",
                "",
                "This week: Windy.",
                "",
                "This month: Calm.",
                "",
                "Love: Sweet.",
                "",
                "Career: Busy.",
                "",
                "Health: Rested.",
            ]
        );
        assert_eq!(lines[1].spans[0].style, palette.style(Role::HeaderHighlight));
        assert_eq!(lines[2].spans[0].style, palette.style(Role::HeaderLowlight));
    }

    #[test]
    fn sections_ending_in_a_break_keep_single_separator() {
        let lines = compose(Sign::Leo, &record("Sunny.<br>", "Windy.<br>"), 79, &palette());
        assert_eq!(
            &plain(&lines)[4..9],
            &["Today: Sunny.", "", "This week: Windy.", "", "This month: Calm."]
        );
    }

    #[test]
    fn same_style_text_shares_a_span() {
        let palette = palette();
        let lines = wrap_section("Love:", "one two three", 79, &palette);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[1].content, " one two three");
    }
}
