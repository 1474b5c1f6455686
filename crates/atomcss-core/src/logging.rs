//! Logging facilities.
//!
//! atomcss uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in the host program:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("atomcss=debug,atomcss_core=debug")
//!     .init();
//! ```
//!
//! Every diagnostic collected during a build is also logged at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Configuration loading and normalization.
    pub const CONFIG: &str = "atomcss_core::config";
    /// Compile context construction.
    pub const CONTEXT: &str = "atomcss_core::context";
    /// Build driver.
    pub const BUILD: &str = "atomcss::build";
    /// Per-definition resolution.
    pub const RESOLVE: &str = "atomcss::resolve";
    /// CSS emission.
    pub const EMIT: &str = "atomcss::emit";
}
