//! Inline paragraph markup.
//!
//! Supported: `<b>…</b>`, `<br/>` (`<br>` and `<br />` too) and the entities
//! `&amp; &lt; &gt; &quot; &apos; &nbsp;` plus numeric `&#N;` / `&#xH;`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkupError {
    #[error("unsupported tag <{0}>")]
    UnsupportedTag(String),

    #[error("unterminated tag at byte {0}")]
    UnterminatedTag(usize),

    #[error("closing tag </{0}> has no matching opening tag")]
    UnbalancedClose(String),

    #[error("unclosed <{0}> tag")]
    Unclosed(String),

    #[error("unknown entity &{0}")]
    UnknownEntity(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text { text: String, bold: bool },
    LineBreak,
}

pub fn parse(markup: &str) -> Result<Vec<Token>, MarkupError> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut bold_depth = 0usize;
    let mut rest = markup;

    while let Some(idx) = rest.find(['<', '&']) {
        text.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        let offset = markup.len() - tail.len();

        if tail.starts_with('<') {
            let end = tail
                .find('>')
                .ok_or(MarkupError::UnterminatedTag(offset))?;
            let tag: String = tail[1..end]
                .split_whitespace()
                .collect::<String>()
                .to_ascii_lowercase();

            match tag.as_str() {
                "b" => {
                    flush(&mut tokens, &mut text, bold_depth > 0);
                    bold_depth += 1;
                }
                "/b" => {
                    if bold_depth == 0 {
                        return Err(MarkupError::UnbalancedClose("b".to_string()));
                    }
                    flush(&mut tokens, &mut text, true);
                    bold_depth -= 1;
                }
                "br" | "br/" => {
                    flush(&mut tokens, &mut text, bold_depth > 0);
                    tokens.push(Token::LineBreak);
                }
                _ => return Err(MarkupError::UnsupportedTag(tag)),
            }
            rest = &tail[end + 1..];
        } else {
            let end = tail
                .find(';')
                .ok_or_else(|| MarkupError::UnknownEntity(tail.chars().skip(1).take(12).collect()))?;
            text.push(decode_entity(&tail[1..end])?);
            rest = &tail[end + 1..];
        }
    }

    text.push_str(rest);
    if bold_depth > 0 {
        return Err(MarkupError::Unclosed("b".to_string()));
    }
    flush(&mut tokens, &mut text, false);

    Ok(tokens)
}

fn flush(tokens: &mut Vec<Token>, text: &mut String, bold: bool) {
    if !text.is_empty() {
        tokens.push(Token::Text {
            text: std::mem::take(text),
            bold,
        });
    }
}

fn decode_entity(name: &str) -> Result<char, MarkupError> {
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{A0}'),
        _ => name.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }),
    };

    decoded.ok_or_else(|| MarkupError::UnknownEntity(format!("{name};")))
}

/// Escapes caller text so it renders literally inside markup.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes text and turns its line separators into `<br/>`.
pub fn escape_multiline(text: &str) -> String {
    escape(&text.replace("\r\n", "\n")).replace('\n', "<br/>")
}
