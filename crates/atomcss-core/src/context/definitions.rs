//! Normalized definitions.

use crate::config::RawBody;

/// Shorthand declarations scoped to one breakpoint by the structured form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedShorthand {
    pub breakpoint: String,
    pub shorthand: String,
}

/// A definition body in its single internal shape.
///
/// Both the bare-string and the structured configuration forms normalize to
/// this, so nothing downstream branches on the config union again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroBody {
    /// Shorthand declarations, possibly with their own variant prefixes.
    pub shorthand: String,
    /// Extra shorthand bodies, each bound to a breakpoint.
    pub scoped: Vec<ScopedShorthand>,
}

impl MacroBody {
    /// A body consisting of a single shorthand string.
    pub fn shorthand(shorthand: impl Into<String>) -> Self {
        Self {
            shorthand: shorthand.into(),
            scoped: Vec::new(),
        }
    }

    /// Split a raw body into its normalized body and chain names.
    pub(crate) fn from_raw(raw: &RawBody) -> (Self, Vec<String>) {
        match raw {
            RawBody::Shorthand(shorthand) => (Self::shorthand(shorthand.clone()), Vec::new()),
            RawBody::Structured(structured) => {
                let body = Self {
                    shorthand: structured.selectors.clone(),
                    scoped: structured
                        .breakpoints
                        .iter()
                        .map(|(breakpoint, shorthand)| ScopedShorthand {
                            breakpoint: breakpoint.to_owned(),
                            shorthand: shorthand.clone(),
                        })
                        .collect(),
                };
                let chain = structured
                    .selectors_chain
                    .as_ref()
                    .map(|chain| chain.names())
                    .unwrap_or_default();
                (body, chain)
            }
        }
    }
}

/// A named style macro, emitted as a class selector when requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDefinition {
    pub name: String,
    pub body: MacroBody,
    /// Components merged in before this one, in order.
    pub chain: Vec<String>,
}

/// A rule bound to a literal selector, always emitted.
///
/// The selector is an opaque string and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainSelectorDefinition {
    pub selector: String,
    pub body: MacroBody,
}
