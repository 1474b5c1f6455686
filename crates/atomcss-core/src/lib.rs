//! Configuration model for the atomcss engine.
//!
//! This crate turns a declarative configuration into an immutable
//! [`CompileContext`]:
//!
//! - **Config**: serde schema for JSON and TOML configuration documents
//! - **Variables**: the `$name` design-token table
//! - **Breakpoints**: named `min-width` thresholds, narrowest first
//! - **Components**: style macros stored as an explicit chain graph
//! - **Errors**: one error type with a kind and a config location
//!
//! # Example
//!
//! ```
//! use atomcss_core::{CompileContext, Config};
//!
//! let config = Config::from_json_str(r##"{
//!     "variables": { "blue1": "#01befe" },
//!     "plainSelectors": { "a": "color:$blue1" },
//!     "components": { "btn": "color:#fff md:padding:12px__24px" }
//! }"##)?;
//!
//! let context = CompileContext::from_config(config)?;
//! assert!(context.components().by_name("btn").is_some());
//! # Ok::<(), atomcss_core::Error>(())
//! ```

pub mod config;
pub mod context;
pub mod logging;

mod error;

pub use config::Config;
pub use context::CompileContext;
pub use error::{Error, ErrorKind, Location, ParseErrorKind, Result, Section};
