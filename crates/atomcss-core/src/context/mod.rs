//! The immutable compile context built from a configuration.

mod breakpoints;
mod definitions;
mod graph;
mod variables;

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::{Config, Entries, RawBody};
use crate::logging::targets;
use crate::{Error, Location, Result, Section};

pub use breakpoints::{Breakpoint, BreakpointTable};
pub use definitions::{MacroBody, MacroDefinition, PlainSelectorDefinition, ScopedShorthand};
pub use graph::{ChainEdge, MacroGraph, MacroId};
pub use variables::{VariableTable, is_variable_char, is_variable_name};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Everything one compilation pass needs, normalized once from a
/// [`Config`].
///
/// A context never changes after construction. When the configuration
/// changes, build a new context; its [`version`](Self::version) differs from
/// every earlier one, which is what resolution caches key on.
#[derive(Debug, Clone)]
pub struct CompileContext {
    version: u64,
    variables: VariableTable,
    breakpoints: BreakpointTable,
    plain_selectors: Vec<PlainSelectorDefinition>,
    components: MacroGraph,
    ignored_elements: Vec<String>,
}

impl CompileContext {
    /// Validate and normalize a configuration.
    ///
    /// Fails with a configuration error on missing sections, duplicate names,
    /// malformed variable names or malformed breakpoint widths. Problems in
    /// shorthand bodies are not detected here; they surface when the
    /// definition is resolved.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn from_config(config: Config) -> Result<Self> {
        let Config {
            variables,
            plain_selectors,
            components,
            breakpoints,
            ignored_elements,
        } = config;

        let variables = require(variables, Section::Variables)?;
        let plain_selectors = require(plain_selectors, Section::PlainSelectors)?;
        let components = require(components, Section::Components)?;

        let variables = normalize_variables(&variables)?;
        let breakpoints = match breakpoints {
            Some(entries) => normalize_breakpoints(&entries)?,
            None => BreakpointTable::default(),
        };
        let plain_selectors = normalize_plain_selectors(&plain_selectors)?;
        let components = normalize_components(&components)?;

        let context = Self {
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
            variables,
            breakpoints,
            plain_selectors,
            components,
            ignored_elements,
        };

        tracing::debug!(
            target: targets::CONTEXT,
            version = context.version,
            variables = context.variables.len(),
            breakpoints = context.breakpoints.len(),
            plain_selectors = context.plain_selectors.len(),
            components = context.components.len(),
            "built compile context"
        );
        Ok(context)
    }

    /// Read a configuration file and build a context from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(Config::from_path(path)?)
    }

    /// Identifier unique to this context within the process.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn breakpoints(&self) -> &BreakpointTable {
        &self.breakpoints
    }

    /// Plain selectors in definition order.
    pub fn plain_selectors(&self) -> &[PlainSelectorDefinition] {
        &self.plain_selectors
    }

    pub fn components(&self) -> &MacroGraph {
        &self.components
    }

    /// Elements whose contents the markup scanner should skip.
    pub fn ignored_elements(&self) -> &[String] {
        &self.ignored_elements
    }
}

fn require<T>(section: Option<T>, name: Section) -> Result<T> {
    section.ok_or_else(|| Error::config("missing required section", Location::section(name)))
}

/// Reject keys that appear more than once within one section.
fn check_unique<T>(entries: &Entries<T>, section: Section) -> Result<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for (key, _) in entries.iter() {
        if !seen.insert(key) {
            return Err(Error::config(
                "duplicate definition",
                Location::new(section, key),
            ));
        }
    }
    Ok(())
}

fn normalize_variables(entries: &Entries<String>) -> Result<VariableTable> {
    check_unique(entries, Section::Variables)?;
    let mut table = VariableTable::new();
    for (name, value) in entries.iter() {
        if !is_variable_name(name) {
            return Err(Error::config(
                "variable names may only contain letters, digits, `_` and `-`",
                Location::new(Section::Variables, name),
            ));
        }
        table.insert(name, value.clone());
    }
    Ok(table)
}

fn normalize_breakpoints(entries: &Entries<crate::config::BreakpointWidth>) -> Result<BreakpointTable> {
    check_unique(entries, Section::Breakpoints)?;
    let mut breakpoints = Vec::with_capacity(entries.len());
    for (name, width) in entries.iter() {
        if !is_variable_name(name) {
            return Err(Error::config(
                "breakpoint names may only contain letters, digits, `_` and `-`",
                Location::new(Section::Breakpoints, name),
            ));
        }
        let min_width = width.to_pixels().ok_or_else(|| {
            Error::config(
                "breakpoint width must be a pixel count such as `768px`",
                Location::new(Section::Breakpoints, name),
            )
        })?;
        breakpoints.push(Breakpoint::new(name, min_width));
    }
    Ok(BreakpointTable::new(breakpoints))
}

/// Selectors are compared after trimming, since that is how they are emitted.
fn normalize_plain_selectors(entries: &Entries<RawBody>) -> Result<Vec<PlainSelectorDefinition>> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut definitions = Vec::with_capacity(entries.len());
    for (selector, raw) in entries.iter() {
        let location = Location::new(Section::PlainSelectors, selector);
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(Error::config("empty selector", location));
        }
        if !seen.insert(trimmed) {
            return Err(Error::config(
                "duplicate definition",
                Location::new(Section::PlainSelectors, trimmed),
            ));
        }
        let (body, chain) = MacroBody::from_raw(raw);
        if !chain.is_empty() {
            return Err(Error::config(
                "plain selectors cannot declare a selectors chain",
                location,
            ));
        }
        definitions.push(PlainSelectorDefinition {
            selector: trimmed.to_owned(),
            body,
        });
    }
    Ok(definitions)
}

fn normalize_components(entries: &Entries<RawBody>) -> Result<MacroGraph> {
    check_unique(entries, Section::Components)?;
    let mut definitions = Vec::with_capacity(entries.len());
    for (name, raw) in entries.iter() {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(Error::config(
                "component names must be non-empty and contain no whitespace",
                Location::new(Section::Components, name),
            ));
        }
        let (body, chain) = MacroBody::from_raw(raw);
        definitions.push(MacroDefinition {
            name: name.to_owned(),
            body,
            chain,
        });
    }
    Ok(MacroGraph::new(definitions))
}
