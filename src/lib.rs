//! Record Viewer (recview)
//!
//! Query-and-view engine for browsing business records: filter, sort,
//! paginate, summarize and export an in-memory record collection.
//!
//! Pure Core / Impure Shell:
//! - `model`, `query`, `pipeline` and the `export` encoders are pure
//!   functions over immutable records
//! - `state` holds the interactive selections and re-runs the pipeline
//! - `source`, `export::sink`, `config` and `logging` touch the outside world

pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod query;
pub mod source;
pub mod state;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod tests;
