//! Declaration and variant types.

use std::fmt;

/// A pseudo-class usable as a variant prefix, e.g. `hover:color:red`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoClass {
    Hover,
    Focus,
    FocusVisible,
    FocusWithin,
    Active,
    Visited,
    Disabled,
    Checked,
    FirstChild,
    LastChild,
    /// `:nth-child(odd)`
    Odd,
    /// `:nth-child(even)`
    Even,
}

impl PseudoClass {
    /// Recognize a variant prefix.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let pseudo = match prefix {
            "hover" => Self::Hover,
            "focus" => Self::Focus,
            "focus-visible" => Self::FocusVisible,
            "focus-within" => Self::FocusWithin,
            "active" => Self::Active,
            "visited" => Self::Visited,
            "disabled" => Self::Disabled,
            "checked" => Self::Checked,
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "odd" => Self::Odd,
            "even" => Self::Even,
            _ => return None,
        };
        Some(pseudo)
    }

    /// The selector suffix this pseudo-class appends.
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Hover => ":hover",
            Self::Focus => ":focus",
            Self::FocusVisible => ":focus-visible",
            Self::FocusWithin => ":focus-within",
            Self::Active => ":active",
            Self::Visited => ":visited",
            Self::Disabled => ":disabled",
            Self::Checked => ":checked",
            Self::FirstChild => ":first-child",
            Self::LastChild => ":last-child",
            Self::Odd => ":nth-child(odd)",
            Self::Even => ":nth-child(even)",
        }
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// The conditions a declaration applies under.
///
/// The default variant is the base layer: no breakpoint, no pseudo-class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Variant {
    pub breakpoint: Option<String>,
    pub pseudo_classes: Vec<PseudoClass>,
}

impl Variant {
    /// The unscoped base variant.
    pub fn base() -> Self {
        Self::default()
    }

    /// A variant scoped to a breakpoint only.
    pub fn at(breakpoint: impl Into<String>) -> Self {
        Self {
            breakpoint: Some(breakpoint.into()),
            pseudo_classes: Vec::new(),
        }
    }

    /// Add a pseudo-class condition.
    pub fn with_pseudo(mut self, pseudo: PseudoClass) -> Self {
        self.pseudo_classes.push(pseudo);
        self
    }

    /// The selector suffix for this variant's pseudo-classes.
    pub fn selector_suffix(&self) -> String {
        self.pseudo_classes.iter().map(PseudoClass::as_css).collect()
    }
}

/// A declaration as written: value unescaped, variables not yet substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDeclaration {
    pub variant: Variant,
    pub property: String,
    pub value: String,
    /// Byte offset of the token within its shorthand body.
    pub offset: usize,
}

/// A resolved `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)
    }
}
