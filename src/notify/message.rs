//! Chat message rendering.
//!
//! Text is passed through verbatim: markup characters in titles, author
//! names or bodies are not escaped.

use serde::Serialize;

use crate::review::ReviewEntry;
use crate::{NotifierError, Result};

/// Block kind used for every message.
const SECTION_BLOCK: &str = "section";

/// Text kind used for every message.
const MARKDOWN_TEXT: &str = "mrkdwn";

/// Largest rendered glyph string, in bytes.
pub const MAX_GLYPH_BYTES: usize = 1024;

/// Outbound webhook body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockMessage {
    pub blocks: Vec<Block>,
}

/// One layout block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: TextObject,
}

/// Text object inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl BlockMessage {
    /// A message holding a single markdown section.
    pub fn markdown_section(text: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block {
                kind: SECTION_BLOCK.to_string(),
                text: TextObject {
                    kind: MARKDOWN_TEXT.to_string(),
                    text: text.into(),
                },
            }],
        }
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| NotifierError::Format(format!("failed to encode message: {e}")))
    }
}

/// Parse a rating label as a decimal integer.
pub fn parse_rating(label: &str) -> Result<i64> {
    label
        .parse::<i64>()
        .map_err(|e| NotifierError::Format(format!("rating {label:?} is not an integer: {e}")))
}

/// Repeat `glyph` once per rating point. Non-positive ratings render empty.
///
/// Fails when the rendered string would exceed [`MAX_GLYPH_BYTES`].
pub fn render_rating(rating: i64, glyph: &str) -> Result<String> {
    let count = usize::try_from(rating).unwrap_or(0);
    match count.checked_mul(glyph.len()) {
        Some(len) if len <= MAX_GLYPH_BYTES => Ok(glyph.repeat(count)),
        _ => Err(NotifierError::Format(format!(
            "rating {rating} renders past {MAX_GLYPH_BYTES} bytes"
        ))),
    }
}

/// Compose the message text for an entry.
///
/// Layout: `*{title}*\n{glyphs} by {author}\n{content}`.
pub fn compose_text(entry: &ReviewEntry, glyph: &str) -> Result<String> {
    let rating = parse_rating(entry.rating_label())?;
    Ok(format!(
        "*{}*\n{} by {}\n{}",
        entry.title(),
        render_rating(rating, glyph)?,
        entry.author_name(),
        entry.content()
    ))
}

/// Build the webhook message for an entry.
pub fn build_message(entry: &ReviewEntry, glyph: &str) -> Result<BlockMessage> {
    compose_text(entry, glyph).map(BlockMessage::markdown_section)
}
