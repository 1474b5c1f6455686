//! Definition resolution: variables, breakpoints and selector chains.

mod cache;
mod expander;
mod layers;
mod variables;

pub use cache::{ResolutionCache, ResolutionCacheKey};
pub use expander::MacroExpander;
pub use layers::{CascadeLayer, LayeredDeclarations, dedupe_declarations};
pub use variables::{MAX_VARIABLE_DEPTH, VariableResolver};
