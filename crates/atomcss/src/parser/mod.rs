//! Shorthand declaration parsing.

mod declaration;
mod escape;
mod shorthand;

pub use declaration::{Declaration, PseudoClass, RawDeclaration, Variant};
pub use escape::{SPACE_ESCAPE, unescape};
pub use shorthand::parse_shorthand;
