//! `metricdiff-recon` — Expected-vs-actual metric reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded metrics, returns the unmatched
//! residue of both sides. No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod keyer;
pub mod matcher;
pub mod model;

pub use config::{DiffConfig, UnknownNamePolicy};
pub use engine::{diff_metrics, run};
pub use error::DiffError;
pub use keyer::Keyer;
pub use model::{Diff, DiffReport, DiffSummary, Metric, Side};
