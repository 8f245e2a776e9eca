//! Transform strategies
//!
//! Transforms reshape one raw record at a time. The run's category and
//! state are passed alongside every record.
//!
//! # Built-in Transforms
//!
//! - `none` - Pass records through untouched
//! - `ao2pyv` - Map archive.org documents to pyvideo.org video submissions
//!
//! See <http://richard.readthedocs.org/en/latest/admin/api.html#videos> for
//! the pyvideo.org video format.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::{Record, State};

/// Trait for per-record transform strategies
pub trait Transform {
    /// Transform a single record
    fn apply(&self, record: &Record, category: &str, state: State) -> Result<Record>;

    /// One-line description shown in the CLI help
    fn describe(&self) -> &'static str;
}

/// Returns every record unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Transform for Identity {
    fn apply(&self, record: &Record, _category: &str, _state: State) -> Result<Record> {
        Ok(record.clone())
    }

    fn describe(&self) -> &'static str {
        "leave results untouched"
    }
}

/// Maps an archive.org search document to a pyvideo.org submission
#[derive(Debug, Clone)]
pub struct PyVideo {
    details_url: String,
}

impl PyVideo {
    /// Create the mapping; `details_url` prefixes item identifiers
    pub fn new(details_url: impl Into<String>) -> Self {
        Self {
            details_url: details_url.into(),
        }
    }
}

impl Transform for PyVideo {
    fn apply(&self, record: &Record, category: &str, state: State) -> Result<Record> {
        let title = required(record, "title")?;
        let language = first_language(record)?;
        let creator = required(record, "creator")?;
        let subject = required(record, "subject")?;
        let description = required(record, "description")?;
        let identifier = required(record, "identifier")?
            .as_str()
            .ok_or_else(|| Error::data_format("identifier", "expected a string"))?;

        let mut video = Record::new();
        video.insert("category".into(), Value::from(category));
        video.insert("title".into(), title.clone());
        video.insert("language".into(), language.clone());
        video.insert("state".into(), Value::from(state.code()));
        video.insert("speakers".into(), creator.clone());
        video.insert("tags".into(), subject.clone());
        video.insert("summary".into(), description.clone());
        video.insert("description".into(), description.clone());
        video.insert(
            "source_url".into(),
            Value::from(format!("{}{}", self.details_url, identifier)),
        );
        Ok(video)
    }

    fn describe(&self) -> &'static str {
        "convert archive.org results to pyvideo.org videos"
    }
}

fn required<'a>(record: &'a Record, field: &str) -> Result<&'a Value> {
    record
        .get(field)
        .ok_or_else(|| Error::data_format(field, "missing required field"))
}

fn first_language(record: &Record) -> Result<&Value> {
    required(record, "language")?
        .as_array()
        .ok_or_else(|| Error::data_format("language", "expected an array"))?
        .first()
        .ok_or_else(|| Error::data_format("language", "array is empty"))
}
