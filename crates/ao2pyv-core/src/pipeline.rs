//! Pipeline orchestration
//!
//! A run fetches records once, transforms each of them in order, and hands
//! the complete result to the output once. Nothing is written unless every
//! record transforms successfully.

use crate::config::Config;
use crate::error::Result;
use crate::inputs::{ArchiveSearch, Input, JsonFileInput};
use crate::outputs::{ConsoleOutput, JsonFileOutput, Output};
use crate::record::{Record, State};
use crate::registry::Registry;
use crate::transforms::{Identity, PyVideo, Transform};

/// The three strategy registries, built once at startup
#[derive(Debug)]
pub struct Strategies {
    /// Input strategies
    pub inputs: Registry<dyn Input>,
    /// Transform strategies
    pub transforms: Registry<dyn Transform>,
    /// Output strategies
    pub outputs: Registry<dyn Output>,
}

impl Strategies {
    /// Empty registries, for callers assembling their own strategy sets
    pub fn empty() -> Self {
        Self {
            inputs: Registry::new("input"),
            transforms: Registry::new("transform"),
            outputs: Registry::new("output"),
        }
    }

    /// Registries holding every built-in strategy
    pub fn builtin(config: &Config) -> Result<Self> {
        let mut strategies = Self::empty();

        strategies.inputs.register(
            "archive.org",
            Box::new(ArchiveSearch::new(&config.archive.search_url)?),
            true,
        )?;
        strategies
            .inputs
            .register("json_file", Box::new(JsonFileInput), false)?;

        strategies
            .transforms
            .register("none", Box::new(Identity), false)?;
        strategies.transforms.register(
            "ao2pyv",
            Box::new(PyVideo::new(&config.archive.details_url)),
            true,
        )?;

        strategies
            .outputs
            .register("json_file", Box::new(JsonFileOutput), false)?;
        strategies
            .outputs
            .register("print", Box::new(ConsoleOutput), true)?;

        Ok(strategies)
    }
}

/// Strategy names chosen for a run; `None` selects the registry default
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Input strategy name
    pub input: Option<String>,
    /// Transform strategy name
    pub transform: Option<String>,
    /// Output strategy name
    pub output: Option<String>,
}

/// Arguments of a single run
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Category stamped on every record
    pub category: String,
    /// Passed to the input strategy
    pub source: String,
    /// Passed to the output strategy
    pub destination: String,
    /// State stamped on every record
    pub state: State,
}

/// Counts reported after a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Records produced by the input
    pub fetched: usize,
    /// Records handed to the output
    pub written: usize,
}

/// One strategy per stage, resolved against a [`Strategies`] set
pub struct Pipeline<'a> {
    input: (&'a str, &'a dyn Input),
    transform: (&'a str, &'a dyn Transform),
    output: (&'a str, &'a dyn Output),
}

impl<'a> Pipeline<'a> {
    /// Resolve every stage before anything runs
    pub fn resolve(strategies: &'a Strategies, selection: &'a Selection) -> Result<Self> {
        let pipeline = Self {
            input: strategies.inputs.resolve(selection.input.as_deref())?,
            transform: strategies
                .transforms
                .resolve(selection.transform.as_deref())?,
            output: strategies.outputs.resolve(selection.output.as_deref())?,
        };
        tracing::debug!(
            input = pipeline.input.0,
            transform = pipeline.transform.0,
            output = pipeline.output.0,
            "resolved strategies"
        );
        Ok(pipeline)
    }

    /// Names of the resolved input, transform and output strategies
    pub fn names(&self) -> (&'a str, &'a str, &'a str) {
        (self.input.0, self.transform.0, self.output.0)
    }

    /// Fetch, transform every record, then emit
    pub fn run(&self, request: &RunRequest) -> Result<RunSummary> {
        let raw = self.input.1.fetch(&request.source)?;
        tracing::info!(
            input = self.input.0,
            source = %request.source,
            count = raw.len(),
            "fetched records"
        );

        let transformed = raw
            .iter()
            .map(|record| self.transform.1.apply(record, &request.category, request.state))
            .collect::<Result<Vec<Record>>>()?;

        self.output.1.emit(&request.destination, &transformed)?;
        tracing::info!(
            output = self.output.0,
            destination = %request.destination,
            count = transformed.len(),
            "wrote records"
        );

        Ok(RunSummary {
            fetched: raw.len(),
            written: transformed.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FixedInput(Vec<Record>);

    impl Input for FixedInput {
        fn fetch(&self, _source: &str) -> Result<Vec<Record>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> &'static str {
            "fixed records"
        }
    }

    /// Counts how often the output was called and keeps what it saw
    #[derive(Clone, Default)]
    struct Capture(Rc<RefCell<Vec<Vec<Record>>>>);

    impl Output for Capture {
        fn emit(&self, _destination: &str, records: &[Record]) -> Result<()> {
            self.0.borrow_mut().push(records.to_vec());
            Ok(())
        }

        fn describe(&self) -> &'static str {
            "capture"
        }
    }

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn doc(identifier: &str) -> Record {
        record(json!({
            "title": format!("Talk {identifier}"),
            "language": ["en"],
            "creator": "Speaker",
            "subject": ["python"],
            "description": "About things",
            "identifier": identifier
        }))
    }

    fn strategies(records: Vec<Record>, capture: &Capture) -> Strategies {
        let mut strategies = Strategies::empty();
        strategies
            .inputs
            .register("fixed", Box::new(FixedInput(records)), true)
            .unwrap();
        strategies
            .transforms
            .register("none", Box::new(Identity), false)
            .unwrap();
        strategies
            .transforms
            .register("ao2pyv", Box::new(PyVideo::new("https://x/")), true)
            .unwrap();
        strategies
            .outputs
            .register("capture", Box::new(capture.clone()), true)
            .unwrap();
        strategies
    }

    fn request(state: State) -> RunRequest {
        RunRequest {
            category: "pycon".to_string(),
            source: "ignored".to_string(),
            destination: "ignored".to_string(),
            state,
        }
    }

    #[test]
    fn test_builtin_registries() {
        let strategies = Strategies::builtin(&Config::default()).unwrap();
        assert_eq!(strategies.inputs.names(), vec!["archive.org", "json_file"]);
        assert_eq!(strategies.inputs.default_name().unwrap(), "archive.org");
        assert_eq!(strategies.transforms.names(), vec!["ao2pyv", "none"]);
        assert_eq!(strategies.transforms.default_name().unwrap(), "ao2pyv");
        assert_eq!(strategies.outputs.names(), vec!["json_file", "print"]);
        assert_eq!(strategies.outputs.default_name().unwrap(), "print");
    }

    #[test]
    fn test_resolve_defaults() {
        let strategies = Strategies::builtin(&Config::default()).unwrap();
        let selection = Selection::default();
        let pipeline = Pipeline::resolve(&strategies, &selection).unwrap();
        assert_eq!(pipeline.names(), ("archive.org", "ao2pyv", "print"));
    }

    #[test]
    fn test_resolve_unknown_name() {
        let strategies = Strategies::builtin(&Config::default()).unwrap();
        let selection = Selection {
            output: Some("carrier_pigeon".to_string()),
            ..Default::default()
        };
        let err = Pipeline::resolve(&strategies, &selection).err().unwrap();
        assert!(matches!(
            err,
            Error::UnknownStrategy { ref registry, ref name }
                if registry == "output" && name == "carrier_pigeon"
        ));
    }

    #[test]
    fn test_run_preserves_order() {
        let capture = Capture::default();
        let strategies = strategies(vec![doc("a"), doc("b"), doc("c")], &capture);
        let selection = Selection::default();
        let pipeline = Pipeline::resolve(&strategies, &selection).unwrap();

        let summary = pipeline.run(&request(State::Live)).unwrap();
        assert_eq!(
            summary,
            RunSummary {
                fetched: 3,
                written: 3
            }
        );

        let calls = capture.0.borrow();
        assert_eq!(calls.len(), 1);
        let urls: Vec<&Value> = calls[0].iter().map(|r| &r["source_url"]).collect();
        assert_eq!(urls, vec!["https://x/a", "https://x/b", "https://x/c"]);
        assert!(calls[0].iter().all(|r| r["state"] == 1));
    }

    #[test]
    fn test_run_identity() {
        let capture = Capture::default();
        let records = vec![record(json!({"anything": true}))];
        let strategies = strategies(records.clone(), &capture);
        let selection = Selection {
            transform: Some("none".to_string()),
            ..Default::default()
        };
        let pipeline = Pipeline::resolve(&strategies, &selection).unwrap();
        pipeline.run(&request(State::Draft)).unwrap();

        assert_eq!(capture.0.borrow()[0], records);
    }

    #[test]
    fn test_failed_transform_produces_no_output() {
        let capture = Capture::default();
        let mut bad = doc("b");
        bad.insert("language".into(), json!([]));
        let strategies = strategies(vec![doc("a"), bad, doc("c")], &capture);
        let selection = Selection::default();
        let pipeline = Pipeline::resolve(&strategies, &selection).unwrap();

        let err = pipeline.run(&request(State::Draft)).unwrap_err();
        assert!(err.is_data_format());
        assert!(capture.0.borrow().is_empty());
    }

    #[test]
    fn test_empty_input_still_emits() {
        let capture = Capture::default();
        let strategies = strategies(vec![], &capture);
        let selection = Selection::default();
        let pipeline = Pipeline::resolve(&strategies, &selection).unwrap();

        let summary = pipeline.run(&request(State::Draft)).unwrap();
        assert_eq!(summary.written, 0);
        assert_eq!(capture.0.borrow().len(), 1);
        assert!(capture.0.borrow()[0].is_empty());
    }
}
