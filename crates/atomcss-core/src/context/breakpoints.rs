//! Responsive breakpoints.

/// A named minimum viewport width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Breakpoint {
    pub name: String,
    pub min_width: u32,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, min_width: u32) -> Self {
        Self {
            name: name.into(),
            min_width,
        }
    }

    /// The media condition scoping this breakpoint's declarations.
    pub fn media_query(&self) -> String {
        format!("(min-width: {}px)", self.min_width)
    }
}

/// Breakpoints ordered from narrowest to widest.
///
/// Rules for a wider breakpoint are emitted after those for a narrower one,
/// so each `min-width` block layers on top of everything below it
/// (mobile-first cascade). Equal widths keep their definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointTable {
    breakpoints: Vec<Breakpoint>,
}

impl BreakpointTable {
    /// Build a table from breakpoints with unique names.
    ///
    /// The caller is responsible for name uniqueness; the normalizer rejects
    /// duplicates before getting here.
    pub fn new(mut breakpoints: Vec<Breakpoint>) -> Self {
        breakpoints.sort_by_key(|bp| bp.min_width);
        Self { breakpoints }
    }

    /// An empty table: everything lands in the base layer.
    pub fn empty() -> Self {
        Self {
            breakpoints: Vec::new(),
        }
    }

    /// Look up a breakpoint by name.
    pub fn get(&self, name: &str) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|bp| bp.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Position of a breakpoint in ascending width order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.breakpoints.iter().position(|bp| bp.name == name)
    }

    /// Iterate from narrowest to widest.
    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.breakpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }
}

impl Default for BreakpointTable {
    /// `sm` 640px, `md` 768px and `lg` 1024px, on top of the base layer.
    fn default() -> Self {
        Self::new(vec![
            Breakpoint::new("sm", 640),
            Breakpoint::new("md", 768),
            Breakpoint::new("lg", 1024),
        ])
    }
}
