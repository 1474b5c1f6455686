//! The `__` space escape.
//!
//! Shorthand bodies separate tokens with whitespace, so a value that needs a
//! space spells it as two underscores: `padding:12px__24px`. A single
//! underscore is an ordinary character. Runs of three or more underscores
//! are rejected because they have no unambiguous reading, and so is an
//! escape at either end of a value, which would leave a dangling space.

use atomcss_core::ParseErrorKind;

/// The placeholder standing for one literal space.
pub const SPACE_ESCAPE: &str = "__";

/// Replace every `__` in `value` with a space.
pub fn unescape(value: &str) -> Result<String, ParseErrorKind> {
    if !value.contains(SPACE_ESCAPE) {
        return Ok(value.to_owned());
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            out.push(c);
            continue;
        }

        let mut run = 1;
        while chars.next_if_eq(&'_').is_some() {
            run += 1;
        }

        match run {
            1 => out.push('_'),
            2 => out.push(' '),
            _ => return Err(ParseErrorKind::UnterminatedEscape),
        }
    }

    if out.starts_with(' ') || out.ends_with(' ') {
        return Err(ParseErrorKind::UnterminatedEscape);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_become_spaces() {
        assert_eq!(unescape("12px__24px").unwrap(), "12px 24px");
        assert_eq!(
            unescape("calc(100%__*__1/2__-__12px)").unwrap(),
            "calc(100% * 1/2 - 12px)"
        );
        assert_eq!(
            unescape("background-color__0.3s,__color__0.3s").unwrap(),
            "background-color 0.3s, color 0.3s"
        );
    }

    #[test]
    fn single_underscore_is_literal() {
        assert_eq!(unescape("my_font").unwrap(), "my_font");
        assert_eq!(unescape("a_b__c").unwrap(), "a_b c");
    }

    #[test]
    fn ambiguous_runs_are_rejected() {
        assert_eq!(unescape("a___b"), Err(ParseErrorKind::UnterminatedEscape));
        assert_eq!(unescape("a____b"), Err(ParseErrorKind::UnterminatedEscape));
    }

    #[test]
    fn dangling_escapes_are_rejected() {
        assert_eq!(unescape("12px__"), Err(ParseErrorKind::UnterminatedEscape));
        assert_eq!(unescape("__12px"), Err(ParseErrorKind::UnterminatedEscape));
    }
}
