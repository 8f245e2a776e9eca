//! ao2pyv Core Library
//!
//! Converts archive.org video searches into pyvideo.org API submissions.
//! Every stage of the conversion is a named strategy picked from a
//! [`Registry`]:
//! - Inputs fetch raw records (archive.org search, local JSON file)
//! - Transforms reshape one record at a time (identity, pyvideo mapping)
//! - Outputs write the transformed list (JSON file, console)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Input    │────▶│  Transform  │────▶│   Output    │
//! │  (fetch)    │     │ (per record)│     │   (emit)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use ao2pyv_core::{Config, Pipeline, RunRequest, Selection, State, Strategies};
//!
//! let strategies = Strategies::builtin(&Config::default())?;
//! let selection = Selection::default();
//! let pipeline = Pipeline::resolve(&strategies, &selection)?;
//! pipeline.run(&RunRequest {
//!     category: "pycon".into(),
//!     source: "collection:pycon".into(),
//!     destination: "-".into(),
//!     state: State::Draft,
//! })?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod inputs;
pub mod outputs;
pub mod pipeline;
pub mod record;
pub mod registry;
pub mod transforms;

pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunRequest, RunSummary, Selection, Strategies};
pub use record::{Record, State};
pub use registry::Registry;
