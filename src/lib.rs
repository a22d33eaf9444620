//! Regular season vs playoffs stats dashboard.
//!
//! The library holds everything but the egui front-end: loading, the
//! dataset cache, the filter pipeline, aggregates, exports and the session
//! state the UI drives.

pub mod config;
pub mod data;
pub mod state;
