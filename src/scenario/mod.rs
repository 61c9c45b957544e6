//! Scripted sequences of filesystem operations loaded from YAML.
//!
//! ```yaml
//! operations:
//!   - mkdirp: /etc/nginx
//!   - writeFile: { path: /etc/nginx/nginx.conf, content: directives }
//!   - readdir: /etc/nginx
//! ```

mod operation;
mod outcome;

use std::borrow::Cow;
use std::path::Path;

use compio::fs;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::filesystem::{FileSystemError, MemoryFs};

pub use operation::Operation;
pub use outcome::Outcome;

const OPERATIONS_KEY: &str = "operations";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    operations: Vec<Operation>,
}

impl Scenario {
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        debug!("Reading scenario file: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        debug!("Successfully read scenario file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Applies every operation in order, collecting one result per operation.
    ///
    /// A failing operation does not stop the run.
    pub fn run(&self, fs: &mut MemoryFs) -> Vec<Result<Outcome, FileSystemError>> {
        self.operations
            .iter()
            .map(|operation| operation.apply(fs))
            .collect()
    }
}

impl TryFrom<&str> for Scenario {
    type Error = ScenarioError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedScenarioSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let Some(entries) = top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(
            OPERATIONS_KEY,
        )))) else {
            debug!("Scenario has no '{}' section", OPERATIONS_KEY);
            return Ok(Self::default());
        };

        let operations = entries
            .as_sequence()
            .context(OperationsNotSequenceSnafu)?
            .iter()
            .enumerate()
            .map(|(index, entry)| Operation::from_yaml(index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Parsed {} scenario operations", operations.len());

        Ok(Scenario { operations })
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ScenarioError {
    #[snafu(display("Failed to read the scenario file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Scenario file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the scenario file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted scenario file"))]
    MalformedScenario,
    #[snafu(display("Top level of a scenario should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Operations section should be a list"))]
    OperationsNotSequence,
    #[snafu(display("Operation #{} should be a map", index))]
    EntryNotMap { index: usize },
    #[snafu(display("Operation #{} should name exactly one operation", index))]
    AmbiguousEntry { index: usize },
    #[snafu(display("Operation #{} is unknown: '{}'", index, name))]
    UnknownOperation { index: usize, name: String },
    #[snafu(display(
        "Operation #{} ({}) has a missing or invalid '{}'",
        index,
        operation,
        field
    ))]
    InvalidArgument {
        index: usize,
        operation: String,
        field: &'static str,
    },
}
