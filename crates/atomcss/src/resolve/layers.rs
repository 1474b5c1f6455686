//! Partitioning declarations into cascade layers.

use std::collections::HashSet;

use atomcss_core::context::BreakpointTable;
use atomcss_core::{Error, Location, Result};

use crate::parser::{Declaration, Variant};

/// Declarations that apply under one variant, in cascade order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeLayer {
    pub variant: Variant,
    pub declarations: Vec<Declaration>,
}

/// Declarations bucketed by variant while a definition is being expanded.
///
/// Buckets keep first-seen order and the declarations in each bucket keep
/// source order. Merging appends bucket by bucket, so the boundaries between
/// breakpoints survive selector chaining.
#[derive(Debug, Clone, Default)]
pub struct LayeredDeclarations {
    layers: Vec<CascadeLayer>,
}

impl LayeredDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    fn layer_mut(&mut self, variant: &Variant) -> &mut CascadeLayer {
        match self.layers.iter().position(|layer| &layer.variant == variant) {
            Some(index) => &mut self.layers[index],
            None => {
                self.layers.push(CascadeLayer {
                    variant: variant.clone(),
                    declarations: Vec::new(),
                });
                let last = self.layers.len() - 1;
                &mut self.layers[last]
            }
        }
    }

    /// Append a declaration to its variant's bucket.
    pub fn push(&mut self, variant: &Variant, declaration: Declaration) {
        self.layer_mut(variant).declarations.push(declaration);
    }

    /// Append every bucket of `other` after the matching bucket here.
    pub fn merge(&mut self, other: LayeredDeclarations) {
        for layer in other.layers {
            self.layer_mut(&layer.variant)
                .declarations
                .extend(layer.declarations);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.declarations.is_empty())
    }

    /// Order the buckets for emission.
    ///
    /// The base breakpoint comes first, then each breakpoint from narrowest
    /// to widest. Within one breakpoint the bucket without pseudo-classes
    /// leads and pseudo-class buckets follow in first-seen order. Each
    /// bucket is de-duplicated so a property keeps only its last value.
    ///
    /// Fails if a bucket names a breakpoint missing from `breakpoints`.
    pub fn finish(self, breakpoints: &BreakpointTable, location: &Location) -> Result<Vec<CascadeLayer>> {
        let mut keyed = Vec::with_capacity(self.layers.len());
        for layer in self.layers {
            if layer.declarations.is_empty() {
                continue;
            }
            let rank = match &layer.variant.breakpoint {
                None => 0,
                Some(name) => {
                    let position = breakpoints
                        .position(name)
                        .ok_or_else(|| Error::unknown_breakpoint(name.clone(), location.clone()))?;
                    position + 1
                }
            };
            let has_pseudo = !layer.variant.pseudo_classes.is_empty();
            keyed.push(((rank, has_pseudo), layer));
        }

        keyed.sort_by_key(|(key, _)| *key);

        Ok(keyed
            .into_iter()
            .map(|(_, layer)| CascadeLayer {
                variant: layer.variant,
                declarations: dedupe_declarations(layer.declarations),
            })
            .collect())
    }
}

/// Keep only the last declaration of each property, at its own position.
///
/// Identical repeats collapse to one; for a property set twice with
/// different values the later value wins, as it would in the cascade.
pub fn dedupe_declarations(declarations: Vec<Declaration>) -> Vec<Declaration> {
    let mut seen = HashSet::with_capacity(declarations.len());
    let mut kept: Vec<Declaration> = declarations
        .into_iter()
        .rev()
        .filter(|declaration| seen.insert(declaration.property.clone()))
        .collect();
    kept.reverse();
    kept
}
