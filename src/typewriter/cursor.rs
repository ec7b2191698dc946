use std::time::Duration;

/// The blinking cursor drawn after the typed text.
///
/// The glyph always occupies its cell; blinking only changes how it is drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Cursor {
    glyph: char,
    blink_interval: Duration,
}

impl Cursor {
    pub(crate) fn new(glyph: char, blink_interval: Duration) -> Self {
        Self { glyph, blink_interval: blink_interval.max(Duration::from_millis(1)) }
    }

    pub(crate) fn glyph(&self) -> char {
        self.glyph
    }

    /// Whether the cursor is in its lit half of the blink cycle after `elapsed`.
    pub(crate) fn is_lit(&self, elapsed: Duration) -> bool {
        (elapsed.as_millis() / self.blink_interval.as_millis()) % 2 == 0
    }

    /// The text followed by the cursor glyph.
    pub(crate) fn decorate(&self, text: &str) -> String {
        let mut line = String::with_capacity(text.len() + self.glyph.len_utf8());
        line.push_str(text);
        line.push(self.glyph);
        line
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new('▌', Duration::from_millis(530))
    }
}
