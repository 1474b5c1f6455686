//! Expanding definitions into resolved rules.

use atomcss_core::context::{MacroBody, PlainSelectorDefinition, VariableTable};
use atomcss_core::logging::targets;
use atomcss_core::{CompileContext, Error, Location, ParseErrorKind, Result, Section};

use super::layers::LayeredDeclarations;
use super::variables::VariableResolver;
use crate::emit::{ResolvedRule, RuleOrigin, class_selector};
use crate::parser::{Declaration, parse_shorthand};

/// Resolves components and plain selectors against a compile context.
///
/// An expander only reads the context. All state it needs while walking a
/// selectors chain lives on the stack of the call doing the walk, so one
/// expander can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct MacroExpander<'a> {
    context: &'a CompileContext,
    variables: VariableResolver<'a>,
}

impl<'a> MacroExpander<'a> {
    pub fn new(context: &'a CompileContext) -> Self {
        Self {
            context,
            variables: VariableResolver::new(context.variables()),
        }
    }

    /// Resolve variables against `overrides` first, then the context table.
    pub fn with_overrides(mut self, overrides: &'a VariableTable) -> Self {
        self.variables = self.variables.with_overrides(overrides);
        self
    }

    /// Resolve a component by name.
    ///
    /// Chained components are merged first, in chain order, then the
    /// component's own declarations; merging happens per cascade layer.
    pub fn expand_component(&self, name: &str) -> Result<ResolvedRule> {
        let location = Location::new(Section::Components, name);
        let graph = self.context.components();
        let root = graph
            .id_of(name)
            .ok_or_else(|| Error::config("unknown component", location.clone()))?;

        let mut merged = LayeredDeclarations::new();
        for id in graph.linearize(root)? {
            let Some(definition) = graph.get(id) else {
                continue;
            };
            let member_location = Location::new(Section::Components, definition.name.as_str());
            merged.merge(self.expand_body(&definition.body, &member_location)?);
        }

        tracing::trace!(target: targets::RESOLVE, component = name, "expanded component");

        Ok(ResolvedRule {
            name: name.to_owned(),
            selector: class_selector(name),
            origin: RuleOrigin::Component,
            layers: merged.finish(self.context.breakpoints(), &location)?,
        })
    }

    /// Resolve a plain selector. Its selector text is used verbatim.
    pub fn expand_plain_selector(&self, definition: &PlainSelectorDefinition) -> Result<ResolvedRule> {
        let location = Location::new(Section::PlainSelectors, definition.selector.as_str());
        let layers = self
            .expand_body(&definition.body, &location)?
            .finish(self.context.breakpoints(), &location)?;

        tracing::trace!(target: targets::RESOLVE, selector = %definition.selector, "expanded plain selector");

        Ok(ResolvedRule {
            name: definition.selector.clone(),
            selector: definition.selector.clone(),
            origin: RuleOrigin::PlainSelector,
            layers,
        })
    }

    /// Parse one body and substitute its variables, bucketed by variant.
    fn expand_body(&self, body: &MacroBody, location: &Location) -> Result<LayeredDeclarations> {
        let breakpoints = self.context.breakpoints();
        let mut layers = LayeredDeclarations::new();

        for raw in parse_shorthand(&body.shorthand, breakpoints, location)? {
            let value = self
                .variables
                .resolve(&raw.value, &location.with_offset(raw.offset))?;
            layers.push(&raw.variant, Declaration::new(raw.property, value));
        }

        for scoped in &body.scoped {
            let section = location.with_breakpoint(&scoped.breakpoint);
            for raw in parse_shorthand(&scoped.shorthand, breakpoints, &section)? {
                let token_location = section.with_offset(raw.offset);
                if raw
                    .variant
                    .breakpoint
                    .as_ref()
                    .is_some_and(|breakpoint| breakpoint != &scoped.breakpoint)
                {
                    return Err(Error::parse(
                        ParseErrorKind::ConflictingBreakpoints,
                        format!("{}:{}", raw.property, raw.value),
                        token_location,
                    ));
                }
                let value = self.variables.resolve(&raw.value, &token_location)?;
                let mut variant = raw.variant;
                // Checked against the breakpoint table when the layers are finished.
                variant.breakpoint = Some(scoped.breakpoint.clone());
                layers.push(&variant, Declaration::new(raw.property, value));
            }
        }

        Ok(layers)
    }
}
