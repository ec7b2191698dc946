use figlet_rs::FIGfont;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Generator for ASCII art banners using the FIGlet standard font.
pub(crate) struct BannerGenerator {
    font: FIGfont,
}

impl BannerGenerator {
    /// Create a generator using the font embedded in figlet-rs.
    pub(crate) fn standard() -> Result<Self, BannerError> {
        // figlet-rs has been seen to panic on font parsing in debug builds
        let loaded = catch_unwind(FIGfont::standard);
        match loaded {
            Ok(Ok(font)) => Ok(Self { font }),
            Ok(Err(e)) => Err(BannerError::FontLoadFailed(e)),
            Err(_) => Err(BannerError::FontLoadFailed("panic during font loading".into())),
        }
    }

    /// Render `text` as banner lines, with trailing blank lines removed.
    pub(crate) fn generate(&self, text: &str) -> Result<Vec<String>, BannerError> {
        let res = catch_unwind(AssertUnwindSafe(|| self.font.convert(text)));
        let figure = match res {
            Ok(Some(figure)) => figure.to_string(),
            Ok(None) | Err(_) => return Err(BannerError::ConversionFailed(text.to_string())),
        };
        let mut lines: Vec<String> = figure.lines().map(|line| line.trim_end().to_string()).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        if lines.is_empty() {
            return Err(BannerError::ConversionFailed(text.to_string()));
        }
        Ok(lines)
    }
}

/// Errors that can occur when generating banners
#[derive(thiserror::Error, Debug)]
pub(crate) enum BannerError {
    #[error("failed to load font: {0}")]
    FontLoadFailed(String),

    #[error("failed to convert text '{0}' to ASCII art")]
    ConversionFailed(String),
}

/// The title as banner lines, or the plain title when the banner can't be generated.
pub(crate) fn title_lines(title: &str, banner: bool) -> Vec<String> {
    if !banner {
        return vec![title.to_string()];
    }
    match BannerGenerator::standard().and_then(|generator| generator.generate(title)) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!("falling back to plain title: {e}");
            vec![title.to_string()]
        }
    }
}
