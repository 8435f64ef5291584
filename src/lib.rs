//! volume-compare: engine for side-by-side comparison of two 3-D volumes.
//!
//! The crate maps slices between volumes on different grids, keeps a
//! user-editable manual transform next to the server-computed alignment,
//! composes the two slice images into curtain/blend/split/single views and
//! projects the volumes' bounding boxes for a spatial overview.
//!
//! `ViewerEngine` is pure state plus render-frame construction.
//! `ViewerSession` drives it against a host-supplied `ViewerBackend`.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod session;
pub mod telemetry;

pub use api::{ViewerEngine, ViewerEngineConfig};
pub use error::{ViewerError, ViewerResult};
pub use session::{ViewerBackend, ViewerSession};
