//! Serde schema of the configuration document.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// A mapping section kept in document order.
///
/// Duplicate keys are preserved rather than collapsed, so the normalizer can
/// report them instead of silently keeping the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct Entries<T>(pub Vec<(String, T)>);

impl<T> Entries<T> {
    /// Iterate over `(key, value)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for Entries<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

struct EntriesVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
    type Value = Entries<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of names to definitions")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, T>()? {
            entries.push((key, value));
        }
        Ok(Entries(entries))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Entries<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// The configuration document as written.
///
/// Required sections are optional here so that a missing section surfaces as
/// a configuration error with a location, not a bare decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub variables: Option<Entries<String>>,
    pub plain_selectors: Option<Entries<RawBody>>,
    pub components: Option<Entries<RawBody>>,
    #[serde(default)]
    pub breakpoints: Option<Entries<BreakpointWidth>>,
    /// Elements whose contents the markup scanner should skip.
    #[serde(default)]
    pub ignored_elements: Vec<String>,
}

/// A definition body: either a bare shorthand string or a structured object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawBody {
    Shorthand(String),
    Structured(StructuredBody),
}

/// Object form of a definition body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StructuredBody {
    /// Shorthand declarations.
    #[serde(default)]
    pub selectors: String,
    /// Components merged in before this body.
    #[serde(default)]
    pub selectors_chain: Option<ChainSpec>,
    /// Shorthand declarations scoped to a named breakpoint.
    #[serde(default)]
    pub breakpoints: Entries<String>,
}

/// A selectors chain: one name, several whitespace-separated names, or a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChainSpec {
    One(String),
    Many(Vec<String>),
}

impl ChainSpec {
    /// The chained component names in order.
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::One(names) => names.split_whitespace().map(str::to_owned).collect(),
            Self::Many(names) => names
                .iter()
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }
}

/// A breakpoint threshold: a pixel count or a `"768px"` string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BreakpointWidth {
    Pixels(u32),
    Text(String),
}

impl BreakpointWidth {
    /// The threshold in pixels, if well formed.
    pub fn to_pixels(&self) -> Option<u32> {
        match self {
            Self::Pixels(px) => Some(*px),
            Self::Text(text) => {
                let text = text.trim();
                text.strip_suffix("px").unwrap_or(text).trim().parse().ok()
            }
        }
    }
}
