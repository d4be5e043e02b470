//! Logging facilities for Horizon Toolstrip.
//!
//! Horizon Toolstrip uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_toolstrip=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```

/// Span names used throughout Horizon Toolstrip for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "horizon_toolstrip::signal";
    /// Render-frame processing span.
    pub const FRAME: &str = "horizon_toolstrip::frame";
    /// Layout reconciliation pass span.
    pub const RECONCILE: &str = "horizon_toolstrip::reconcile";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_toolstrip_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_toolstrip_core::signal";
    /// Frame scheduler target.
    pub const FRAME: &str = "horizon_toolstrip_core::frame";
    /// Toolbar item collections and surfaces.
    pub const TOOLBAR: &str = "horizon_toolstrip::toolbar";
    /// Layout reconciliation target.
    pub const RECONCILE: &str = "horizon_toolstrip::reconcile";
    /// Mount target resolution.
    pub const MOUNT: &str = "horizon_toolstrip::mount";
    /// Feature plugins.
    pub const PLUGIN: &str = "horizon_toolstrip::plugin";
}
