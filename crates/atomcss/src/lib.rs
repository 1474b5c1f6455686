//! Atomic-CSS compiler.
//!
//! This crate turns a configuration of design tokens, plain selectors and
//! component macros into a stylesheet containing only what a project uses:
//!
//! - **Parser**: shorthand bodies such as `md:hover:padding:8px__16px`
//! - **Resolve**: `$variable` substitution, selector chains and cascade layers
//! - **Emit**: deterministic, mobile-first CSS with optional grouping and minification
//! - **Compiler**: the cached, parallel build driver
//!
//! # Example
//!
//! ```
//! use atomcss::prelude::*;
//!
//! let config = Config::from_json_str(r##"{
//!     "variables": { "blue1": "#01befe" },
//!     "plainSelectors": { "hr": "border:0" },
//!     "components": {
//!         "btn": "color:$blue1 md:padding:12px__24px",
//!         "unused": "display:none"
//!     }
//! }"##)?;
//!
//! let compiler = Compiler::from_config(config)?;
//! let build = compiler.build(&["btn"]);
//!
//! assert!(build.is_clean());
//! assert!(build.css.contains("@media (min-width: 768px)"));
//! assert!(!build.css.contains(".unused"));
//! # Ok::<(), atomcss::Error>(())
//! ```

pub mod compiler;
pub mod emit;
pub mod parser;
pub mod resolve;

pub use atomcss_core::{
    CompileContext, Config, Error, ErrorKind, Location, ParseErrorKind, Result, Section,
};
pub use compiler::{Build, BuildOptions, ClassSet, Compiler, SelectorSource};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::compiler::{Build, BuildOptions, ClassSet, Compiler, SelectorSource};
    pub use crate::emit::{EmitOptions, Emitter, ResolvedRule, RuleOrigin};
    pub use crate::parser::{Declaration, PseudoClass, Variant};
    pub use crate::resolve::CascadeLayer;
    pub use atomcss_core::context::{Breakpoint, BreakpointTable, VariableTable};
    pub use atomcss_core::{CompileContext, Config, Error, ErrorKind, Location, Result, Section};
}
