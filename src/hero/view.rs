use super::color::{dim, gradient_color};
use crate::{theme::Palette, typewriter::Cursor};
use crossterm::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_WINDOW_WIDTH: usize = 72;
const MIN_WINDOW_WIDTH: usize = 16;
const WINDOW_TITLE: &str = "Terminal";
const ELLIPSIS: char = '…';
const WINDOW_BUTTONS: [Color; 3] = [
    Color::Rgb { r: 255, g: 95, b: 86 },
    Color::Rgb { r: 255, g: 189, b: 46 },
    Color::Rgb { r: 39, g: 201, b: 63 },
];

/// A piece of text drawn with a single style.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Span {
    pub text: String,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Span {
    fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), fg: None, bg: None, bold: false }
    }

    fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    pub(crate) fn width(&self) -> usize {
        self.spans.iter().map(|span| span.text.width()).sum()
    }

    #[cfg(test)]
    pub(crate) fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Shift the line right so it sits in the middle of `width` columns.
    fn centered(mut self, width: usize) -> Self {
        let margin = width.saturating_sub(self.width()) / 2;
        if margin > 0 {
            self.spans.insert(0, Span::new(" ".repeat(margin)));
        }
        self
    }
}

/// Everything drawn on one screen refresh.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Frame {
    pub lines: Vec<Line>,
}

impl Frame {
    fn blank(&mut self) {
        self.lines.push(Line::default());
    }
}

/// What changes between two frames.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrameState<'a> {
    pub text: &'a str,
    pub cursor_lit: bool,
    pub palette: &'a Palette,
    pub hint: &'a str,
}

/// The static layout of the hero: title, subtitle and the terminal window.
#[derive(Clone, Debug)]
pub(crate) struct HeroView {
    title_lines: Vec<String>,
    subtitle: String,
    prompt: String,
    cursor: Cursor,
}

impl HeroView {
    pub(crate) fn new(title_lines: Vec<String>, subtitle: String, prompt: String, cursor: Cursor) -> Self {
        Self { title_lines, subtitle, prompt, cursor }
    }

    pub(crate) fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The prompt line as plain text, used when there is no screen to lay out.
    pub(crate) fn prompt_line(&self, text: &str) -> String {
        format!("{} {}", self.prompt, self.cursor.decorate(text))
    }

    pub(crate) fn frame(&self, state: FrameState, width: u16) -> Frame {
        let width = width as usize;
        let palette = state.palette;
        let mut frame = Frame::default();

        frame.blank();
        let title_width = self.title_lines.iter().map(|line| line.width()).max().unwrap_or(0);
        for title in &self.title_lines {
            let mut line = Line::default();
            for (index, ch) in fit_head(title, width).chars().enumerate() {
                let color = gradient_color(index, title_width, palette.title_hues, palette.title_lightness);
                line.push(Span::new(ch).fg(color).bold());
            }
            frame.lines.push(line.centered(width));
        }
        frame.blank();
        for text in wrap(&self.subtitle, width.saturating_sub(4).max(1)) {
            frame.lines.push(Line { spans: vec![Span::new(text).fg(palette.muted)] }.centered(width));
        }
        frame.blank();

        for line in self.window(state, width) {
            frame.lines.push(line.centered(width));
        }
        frame.blank();
        frame.lines.push(Line { spans: vec![Span::new(fit_head(state.hint, width)).fg(palette.muted)] }.centered(width));
        frame
    }

    /// The boxed terminal window. `inner` is the number of columns between the borders.
    fn window(&self, state: FrameState, width: usize) -> Vec<Line> {
        let palette = state.palette;
        let inner = width.saturating_sub(4).clamp(MIN_WINDOW_WIDTH, MAX_WINDOW_WIDTH);
        let border = |text: String| Span::new(text).fg(palette.border);
        let body = |text: String| Span::new(text).bg(palette.window);

        let mut lines = Vec::new();
        lines.push(Line { spans: vec![border(format!("╭{}╮", "─".repeat(inner)))] });

        let mut header = Line::default();
        header.push(border("│".into()));
        header.push(body(" ".into()));
        for color in WINDOW_BUTTONS {
            header.push(body("●".into()).fg(color));
            header.push(body(" ".into()));
        }
        let used = 1 + 3 * 2;
        let free = inner.saturating_sub(used);
        let title_start = inner.saturating_sub(WINDOW_TITLE.len()) / 2;
        let before = title_start.saturating_sub(used);
        let after = free.saturating_sub(before + WINDOW_TITLE.len());
        if free >= WINDOW_TITLE.len() {
            header.push(body(" ".repeat(before)));
            header.push(body(WINDOW_TITLE.into()).fg(palette.muted));
            header.push(body(" ".repeat(after)));
        } else {
            header.push(body(" ".repeat(free)));
        }
        header.push(border("│".into()));
        lines.push(header);

        lines.push(Line { spans: vec![border(format!("├{}┤", "─".repeat(inner)))] });

        let mut prompt_line = Line::default();
        prompt_line.push(border("│".into()));
        prompt_line.push(body(" ".into()));
        let prompt = fit_head(&self.prompt, inner.saturating_sub(2));
        prompt_line.push(body(prompt.clone()).fg(palette.prompt).bold());
        prompt_line.push(body(" ".into()));
        let cursor_width = self.cursor.glyph().width().unwrap_or(1);
        let available = inner.saturating_sub(3 + prompt.width() + cursor_width);
        let text = fit_tail(state.text, available);
        let cursor_color = if state.cursor_lit { palette.cursor } else { dim(palette.cursor, palette.window) };
        prompt_line.push(body(text.clone()).fg(palette.command));
        prompt_line.push(body(self.cursor.glyph().to_string()).fg(cursor_color));
        let padding = inner.saturating_sub(2 + prompt.width() + text.width() + cursor_width);
        prompt_line.push(body(" ".repeat(padding)));
        prompt_line.push(border("│".into()));
        lines.push(prompt_line);

        lines.push(Line { spans: vec![border(format!("╰{}╯", "─".repeat(inner)))] });
        lines
    }
}

/// Keep the end of `text` so it fits in `max` columns, marking the cut with an ellipsis.
fn fit_tail(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut kept = Vec::new();
    let mut used = 1;
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        kept.push(ch);
    }
    std::iter::once(ELLIPSIS).chain(kept.into_iter().rev()).collect()
}

/// Keep the start of `text` so it fits in `max` columns.
fn fit_head(text: &str, max: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= max
        })
        .collect()
}

/// Greedy word wrap to `max` columns. Words longer than a line are cut.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word = fit_head(word, max);
        if !current.is_empty() && current.width() + 1 + word.width() > max {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use rstest::rstest;

    fn view() -> HeroView {
        HeroView::new(
            vec!["gh-templates".into()],
            "The fastest way to create professional GitHub templates".into(),
            "$".into(),
            Cursor::default(),
        )
    }

    fn render(text: &str, width: u16) -> Frame {
        let palette = Theme::Dark.palette();
        view().frame(FrameState { text, cursor_lit: true, palette: &palette, hint: "q quit" }, width)
    }

    fn prompt_row(frame: &Frame) -> String {
        frame.lines.iter().map(Line::text).find(|line| line.contains("│ $")).expect("prompt line")
    }

    #[test]
    fn prompt_line_shows_text_and_cursor() {
        let frame = render("gh-templates issue list", 100);
        assert!(prompt_row(&frame).contains("│ $ gh-templates issue list▌"));
    }

    #[test]
    fn cursor_present_with_empty_text() {
        let frame = render("", 100);
        assert!(prompt_row(&frame).contains("$ ▌"));
    }

    #[rstest]
    #[case(20)]
    #[case(40)]
    #[case(80)]
    #[case(200)]
    fn window_rows_share_one_width(#[case] width: u16) {
        let frame = render("gh-templates license list --osi-approved", width);
        let widths: Vec<_> = frame
            .lines
            .iter()
            .map(Line::text)
            .filter(|line| line.contains('│') || line.contains('╭') || line.contains('╰') || line.contains('├'))
            .map(|line| line.trim_start().width())
            .collect();
        assert_eq!(widths.len(), 5);
        assert!(widths.windows(2).all(|pair| pair[0] == pair[1]), "{widths:?}");
    }

    #[test]
    fn long_text_keeps_its_tail_visible() {
        let frame = render("gh-templates license list --osi-approved", 30);
        let row = prompt_row(&frame);
        assert!(row.contains("…"), "{row}");
        assert!(row.contains("approved▌"), "{row}");
    }

    #[test]
    fn dimmed_cursor_when_unlit() {
        let palette = Theme::Dark.palette();
        let lit = view().frame(FrameState { text: "", cursor_lit: true, palette: &palette, hint: "" }, 80);
        let unlit = view().frame(FrameState { text: "", cursor_lit: false, palette: &palette, hint: "" }, 80);
        assert_ne!(lit, unlit);
        assert_eq!(
            lit.lines.iter().map(Line::text).collect::<Vec<_>>(),
            unlit.lines.iter().map(Line::text).collect::<Vec<_>>()
        );
    }

    #[test]
    fn plain_prompt_line() {
        assert_eq!(view().prompt_line("gh-templates pr list"), "$ gh-templates pr list▌");
    }

    #[rstest]
    #[case("abcdef", 10, "abcdef")]
    #[case("abcdef", 4, "…def")]
    #[case("abcdef", 1, "…")]
    #[case("abcdef", 0, "")]
    fn tail_fitting(#[case] text: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(fit_tail(text, max), expected);
    }

    #[test]
    fn wraps_words() {
        assert_eq!(wrap("one two three four", 9), vec!["one two", "three", "four"]);
    }
}
