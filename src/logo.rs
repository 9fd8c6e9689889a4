use crate::cache::{AssetCache, Fetch};
use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Widget},
};

/// The pop-up shown before a game starts: the logo followed by some
/// instructions
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Banner {
    logo: Vec<String>,
    instructions: Vec<String>,
}

impl Banner {
    /// Build the banner from the logo & instructions assets.  Assets that
    /// can't be obtained are replaced with built-in text.
    pub(crate) fn load<F: Fetch>(cache: &AssetCache, fetcher: &F) -> Banner {
        Banner {
            logo: fetch_lines(cache, fetcher, "./logo.txt").unwrap_or_else(|| lines(FALLBACK_LOGO)),
            instructions: fetch_lines(cache, fetcher, "./index.txt")
                .unwrap_or_else(|| lines(FALLBACK_INSTRUCTIONS)),
        }
    }

    /// The size of the area that the banner should be drawn in
    pub(crate) fn size(&self) -> Size {
        let text_width = self
            .logo
            .iter()
            .chain(&self.instructions)
            .map(|ln| ln.chars().count())
            .max()
            .unwrap_or_default();
        let text_height = self.logo.len() + 1 + self.instructions.len();
        Size {
            width: u16::try_from(text_width + 4).unwrap_or(u16::MAX),
            height: u16::try_from(text_height + 2).unwrap_or(u16::MAX),
        }
    }
}

impl Default for Banner {
    fn default() -> Banner {
        Banner {
            logo: lines(FALLBACK_LOGO),
            instructions: lines(FALLBACK_INSTRUCTIONS),
        }
    }
}

static FALLBACK_LOGO: &str = "NEON SNAKE";

static FALLBACK_INSTRUCTIONS: &str = "Press Enter to start";

fn lines(s: &str) -> Vec<String> {
    s.lines().map(String::from).collect()
}

fn fetch_lines<F: Fetch>(cache: &AssetCache, fetcher: &F, url: &str) -> Option<Vec<String>> {
    let body = match cache.respond(url, fetcher) {
        Ok(r) => r.body,
        Err(e) => {
            tracing::warn!(url, error = %e, "Could not load asset");
            return None;
        }
    };
    match String::from_utf8(body) {
        Ok(s) => Some(lines(&s)),
        Err(e) => {
            tracing::warn!(url, error = %e, "Asset is not valid UTF-8");
            None
        }
    }
}

impl Widget for &Banner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .border_style(consts::BORDER_STYLE)
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let text = self
            .logo
            .iter()
            .map(|ln| Line::styled(ln.as_str(), consts::SNAKE_HEAD_STYLE))
            .chain(std::iter::once(Line::default()))
            .chain(self.instructions.iter().map(|ln| Line::raw(ln.as_str())))
            .collect::<Text<'_>>()
            .centered();
        text.render(inner, buf);
    }
}
