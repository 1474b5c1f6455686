//! Stylesheet output.

mod emitter;
mod rule;

pub use emitter::{EmitOptions, Emitter};
pub use rule::{ResolvedRule, RuleOrigin, class_selector};
