//! Resolved output rules.

use crate::parser::Variant;
use crate::resolve::CascadeLayer;

/// Where a resolved rule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleOrigin {
    /// An always-emitted plain selector.
    PlainSelector,
    /// A component requested by class name.
    Component,
}

/// A definition resolved into concrete, layered declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRule {
    /// Component name or plain selector text, as written in the config.
    pub name: String,
    /// Selector the rule is emitted under.
    pub selector: String,
    pub origin: RuleOrigin,
    /// Cascade layers, base first and breakpoints ascending.
    pub layers: Vec<CascadeLayer>,
}

impl ResolvedRule {
    /// Selector text for one of this rule's variants.
    ///
    /// Pseudo-class suffixes are appended to every part of a comma-separated
    /// selector list. This is the only place a selector string is looked
    /// into; otherwise it is passed through verbatim.
    pub fn selector_for(&self, variant: &Variant) -> String {
        let suffix = variant.selector_suffix();
        if suffix.is_empty() {
            return self.selector.clone();
        }
        split_selector_list(&self.selector)
            .into_iter()
            .map(|part| format!("{}{}", part.trim(), suffix))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Build the class selector for a component name.
pub fn class_selector(name: &str) -> String {
    let mut selector = String::with_capacity(name.len() + 1);
    selector.push('.');
    // Writing into a String cannot fail.
    let _ = cssparser::serialize_identifier(name, &mut selector);
    selector
}

/// Split a selector list on commas outside brackets, parentheses and quotes.
fn split_selector_list(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in selector.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&selector[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&selector[start..]);
    parts
}
