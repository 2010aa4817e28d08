//! Security tooling bundled with generated projects.
//!
//! - [`integrate`] mirrors the shared security template into a rendered project
//! - [`scan`] reads security-scanner JSON output and counts critical findings

pub mod integrate;
pub mod scan;

pub use integrate::{SecurityIntegrator, SecurityStatus, SecuritySummary};
pub use scan::{Finding, ScanResults, Tool};
