//! Configuration document and its loaders.
//!
//! A configuration has three required mappings and two optional ones:
//!
//! ```json
//! {
//!   "variables": { "blue1": "#01befe" },
//!   "plainSelectors": { "::selection": "color:#fff background:$blue1" },
//!   "components": {
//!     "btn": "color:#fff padding:12px__24px md:padding:16px__32px",
//!     "btn--ghost": { "selectors": "background:none", "selectorsChain": "btn" }
//!   },
//!   "breakpoints": { "sm": "640px", "md": "768px", "lg": "1024px" },
//!   "ignoredElements": ["code-editor"]
//! }
//! ```
//!
//! The same structure can be written in TOML.

mod raw;

use std::path::Path;

use crate::logging::targets;
use crate::{Error, Result};

pub use raw::{BreakpointWidth, ChainSpec, Config, Entries, RawBody, StructuredBody};

impl Config {
    /// Decode a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::deserialize("<inline json>", e))
    }

    /// Decode a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::deserialize("<inline toml>", e))
    }

    /// Read a configuration file, choosing the format by extension.
    ///
    /// `.toml` files are decoded as TOML, everything else as JSON.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let origin = path.display().to_string();

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config: Self = if is_toml {
            toml::from_str(&content).map_err(|e| Error::deserialize(&origin, e))?
        } else {
            serde_json::from_str(&content).map_err(|e| Error::deserialize(&origin, e))?
        };

        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            variables = config.variables.as_ref().map_or(0, Entries::len),
            plain_selectors = config.plain_selectors.as_ref().map_or(0, Entries::len),
            components = config.components.as_ref().map_or(0, Entries::len),
            "loaded configuration"
        );
        Ok(config)
    }
}
