//! Internal test modules - whitebox tests with crate access
//!
//! End-to-end scenarios over the bundled sample set, exercising several
//! modules together.

mod sample_scenarios;
mod stats_snapshots;
