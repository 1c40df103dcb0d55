//! ZPL parser.
//!
//! Reads raw label markup and produces one [`LabelDocument`] per
//! `^XA ... ^XZ` block. Text outside label blocks is ignored, so input
//! without any block parses to an empty list rather than an error.

pub mod builder;
pub mod hex;
pub mod lexer;

use label_common::{LabelDocument, MarkupParser, ParseError, ParseResult};
use tracing::debug;

use builder::LabelBuilder;
use lexer::tokenize;

/// Stateless [`MarkupParser`] for ZPL II.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZplParser;

impl ZplParser {
    pub fn new() -> Self {
        Self
    }
}

impl MarkupParser for ZplParser {
    fn parse(&self, markup: &[u8]) -> ParseResult<Vec<LabelDocument>> {
        parse_zpl(markup)
    }
}

/// Parse ZPL bytes into label documents.
pub fn parse_zpl(markup: &[u8]) -> ParseResult<Vec<LabelDocument>> {
    let text = String::from_utf8_lossy(markup);
    let mut labels = Vec::new();
    let mut current: Option<LabelBuilder> = None;

    for command in tokenize(&text) {
        if command.is("XA") {
            if current.is_some() {
                return Err(ParseError::NestedLabelStart {
                    offset: command.offset,
                });
            }
            current = Some(LabelBuilder::new(command.offset));
            continue;
        }

        if command.is("XZ") {
            let builder = current.take().ok_or(ParseError::UnexpectedLabelEnd {
                offset: command.offset,
            })?;
            labels.push(builder.finish()?);
            continue;
        }

        if let Some(builder) = current.as_mut() {
            builder.apply(&command)?;
        }
    }

    if let Some(builder) = current {
        return Err(ParseError::UnterminatedLabel {
            offset: builder.start_offset(),
        });
    }

    debug!(labels = labels.len(), bytes = markup.len(), "Parsed ZPL");
    Ok(labels)
}
