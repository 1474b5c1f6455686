//! Shorthand body tokenizer.
//!
//! A body is a whitespace-separated list of tokens. Each token is split on
//! the colons that sit outside parentheses, brackets and quotes: the last
//! segment is the value, the one before it the property, and anything
//! earlier is a variant prefix (a breakpoint name or a pseudo-class).
//!
//! ```text
//! md:hover:background-color:rgba(1,__190,__254,__0.1)
//! └┬┘└─┬─┘ └──────┬───────┘ └───────────┬──────────┘
//!  │   │          property              value
//!  │   pseudo-class prefix
//!  breakpoint prefix
//! ```

use atomcss_core::context::BreakpointTable;
use atomcss_core::{Error, Location, ParseErrorKind, Result};

use super::declaration::{PseudoClass, RawDeclaration, Variant};
use super::escape::unescape;

/// Parse a shorthand body into declarations, in source order.
///
/// Fails on the first malformed token; the error points at that token's
/// byte offset within `body`.
pub fn parse_shorthand(
    body: &str,
    breakpoints: &BreakpointTable,
    location: &Location,
) -> Result<Vec<RawDeclaration>> {
    tokens(body)
        .into_iter()
        .map(|(offset, token)| {
            parse_token(token, breakpoints)
                .map(|declaration| RawDeclaration {
                    offset,
                    ..declaration
                })
                .map_err(|kind| Error::parse(kind, token, location.with_offset(offset)))
        })
        .collect()
}

/// Whitespace-separated tokens with their byte offsets.
fn tokens(body: &str) -> Vec<(usize, &str)> {
    let mut start = None;
    let mut out = Vec::new();
    for (i, c) in body.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push((s, &body[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((s, &body[s..]));
    }
    out
}

/// Split a token on colons at nesting depth zero.
fn split_segments(token: &str) -> std::result::Result<Vec<&str>, ParseErrorKind> {
    let mut segments = Vec::new();
    let mut closers: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in token.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => closers.push(')'),
            '[' => closers.push(']'),
            ')' | ']' => {
                if closers.pop() != Some(c) {
                    return Err(ParseErrorKind::UnbalancedBracket);
                }
            }
            ':' if closers.is_empty() => {
                segments.push(&token[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if quote.is_some() {
        return Err(ParseErrorKind::UnterminatedQuote);
    }
    if !closers.is_empty() {
        return Err(ParseErrorKind::UnbalancedBracket);
    }

    segments.push(&token[start..]);
    Ok(segments)
}

fn parse_token(
    token: &str,
    breakpoints: &BreakpointTable,
) -> std::result::Result<RawDeclaration, ParseErrorKind> {
    let segments = split_segments(token)?;
    if segments.len() < 2 {
        return Err(ParseErrorKind::MissingColon);
    }

    let (prefixes, declaration) = segments.split_at(segments.len() - 2);
    let (property, value) = (declaration[0], declaration[1]);

    let mut variant = Variant::base();
    for &prefix in prefixes {
        if breakpoints.contains(prefix) {
            if variant.breakpoint.is_some() {
                return Err(ParseErrorKind::ConflictingBreakpoints);
            }
            variant.breakpoint = Some(prefix.to_owned());
        } else if let Some(pseudo) = PseudoClass::from_prefix(prefix) {
            variant.pseudo_classes.push(pseudo);
        } else {
            return Err(ParseErrorKind::UnknownPrefix);
        }
    }

    if property.is_empty() {
        return Err(ParseErrorKind::EmptyProperty);
    }
    if value.is_empty() {
        return Err(ParseErrorKind::EmptyValue);
    }

    Ok(RawDeclaration {
        variant,
        property: property.to_owned(),
        value: unescape(value)?,
        offset: 0,
    })
}
