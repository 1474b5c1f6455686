//! Component definitions as an explicit chain graph.

use std::collections::{HashMap, HashSet};

use slotmap::{SecondaryMap, SlotMap, new_key_type};

use super::MacroDefinition;
use crate::{Error, Location, Result, Section};

new_key_type! {
    /// Handle to a component in a [`MacroGraph`].
    pub struct MacroId;
}

/// An outgoing selectors-chain reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEdge {
    /// The chained component exists.
    Resolved(MacroId),
    /// The chain names a component that is not defined.
    Missing(String),
}

/// Arena of component definitions plus their chain adjacency lists.
///
/// Edges are resolved once when the graph is built; walking a chain never
/// looks names up again.
#[derive(Debug, Clone, Default)]
pub struct MacroGraph {
    definitions: SlotMap<MacroId, MacroDefinition>,
    order: Vec<MacroId>,
    by_name: HashMap<String, MacroId>,
    edges: SecondaryMap<MacroId, Vec<ChainEdge>>,
}

impl MacroGraph {
    /// Build the graph from definitions with unique names.
    pub fn new(definitions: Vec<MacroDefinition>) -> Self {
        let mut graph = Self::default();

        for definition in definitions {
            let name = definition.name.clone();
            let id = graph.definitions.insert(definition);
            graph.order.push(id);
            graph.by_name.insert(name, id);
        }

        for &id in &graph.order {
            let edges = graph.definitions[id]
                .chain
                .iter()
                .map(|name| match graph.by_name.get(name) {
                    Some(&target) => ChainEdge::Resolved(target),
                    None => ChainEdge::Missing(name.clone()),
                })
                .collect();
            graph.edges.insert(id, edges);
        }

        graph
    }

    /// Look up a component by name.
    pub fn id_of(&self, name: &str) -> Option<MacroId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: MacroId) -> Option<&MacroDefinition> {
        self.definitions.get(id)
    }

    /// Look up a component definition by name.
    pub fn by_name(&self, name: &str) -> Option<&MacroDefinition> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// Outgoing chain edges of a component, in chain order.
    pub fn edges(&self, id: MacroId) -> &[ChainEdge] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over components in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (MacroId, &MacroDefinition)> {
        self.order.iter().map(|&id| (id, &self.definitions[id]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn name(&self, id: MacroId) -> &str {
        self.definitions
            .get(id)
            .map(|def| def.name.as_str())
            .unwrap_or_default()
    }

    /// Order in which a component's bodies are merged.
    ///
    /// Depth-first over the chain: every chained component comes before the
    /// component chaining it, in the order the chain lists them, and the root
    /// comes last. A component reached twice through different chains is
    /// merged once, at its first position.
    ///
    /// The walk is iterative and keeps its visiting set local to this call,
    /// so concurrent walks over the same graph are independent.
    pub fn linearize(&self, root: MacroId) -> Result<Vec<MacroId>> {
        let root_location = Location::new(Section::Components, self.name(root));
        let mut order = Vec::new();
        let mut done: HashSet<MacroId> = HashSet::new();
        // Current DFS path with the index of the next edge to follow.
        let mut path: Vec<(MacroId, usize)> = vec![(root, 0)];

        while let Some(frame) = path.last_mut() {
            let current = frame.0;
            let edges = self.edges(current);
            if frame.1 == edges.len() {
                path.pop();
                done.insert(current);
                order.push(current);
                continue;
            }

            let edge = &edges[frame.1];
            frame.1 += 1;

            let next = match edge {
                ChainEdge::Resolved(next) => *next,
                ChainEdge::Missing(name) => {
                    return Err(Error::unknown_macro_reference(
                        name.clone(),
                        self.name(current),
                        root_location,
                    ));
                }
            };

            if done.contains(&next) {
                continue;
            }

            if let Some(start) = path.iter().position(|&(id, _)| id == next) {
                let mut cycle: Vec<String> = path[start..]
                    .iter()
                    .map(|&(id, _)| self.name(id).to_owned())
                    .collect();
                cycle.push(self.name(next).to_owned());
                return Err(Error::macro_cycle(cycle, root_location));
            }

            path.push((next, 0));
        }

        Ok(order)
    }
}
