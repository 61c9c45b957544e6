use std::borrow::Cow;

use derive_more::Display;
use hashlink::LinkedHashMap;
use saphyr::{Scalar, Yaml};
use snafu::{OptionExt, ensure};
use tracing::debug;

use crate::filesystem::{FileSystemError, MemoryFs};
use crate::scenario::Outcome;
use crate::scenario::{
    AmbiguousEntrySnafu, EntryNotMapSnafu, InvalidArgumentSnafu, ScenarioError,
    UnknownOperationSnafu,
};

/// One step of a scenario, named the way it is spelled in the YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Operation {
    #[display("mkdir {_0}")]
    Mkdir(String),
    #[display("mkdirp {_0}")]
    Mkdirp(String),
    #[display("touch {_0}")]
    Touch(String),
    #[display("writeFile {path}")]
    WriteFile { path: String, content: String },
    #[display("readFile {_0}")]
    ReadFile(String),
    #[display("readdir {_0}")]
    Readdir(String),
    #[display("stat {_0}")]
    Stat(String),
    #[display("unlink {_0}")]
    Unlink(String),
    #[display("rmdir {_0}")]
    Rmdir(String),
    #[display("copy {src} {dest}")]
    Copy { src: String, dest: String },
    #[display("rename {src} {dest}")]
    Rename { src: String, dest: String },
}

fn key(name: &str) -> Yaml<'_> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

impl Operation {
    /// Parses a single-key mapping such as `mkdirp: /etc/nginx` or
    /// `copy: { src: /a, dest: /b }`.
    pub fn from_yaml(index: usize, entry: &Yaml) -> Result<Self, ScenarioError> {
        let mapping = entry.as_mapping().context(EntryNotMapSnafu { index })?;
        ensure!(mapping.len() == 1, AmbiguousEntrySnafu { index });
        let (name, value) = mapping
            .iter()
            .next()
            .context(AmbiguousEntrySnafu { index })?;
        let name = name.as_str().context(EntryNotMapSnafu { index })?;
        debug!("Parsing scenario entry {} as '{}'", index, name);

        let path = || path_argument(index, name, value);
        let operation = match name {
            "mkdir" => Operation::Mkdir(path()?),
            "mkdirp" => Operation::Mkdirp(path()?),
            "touch" => Operation::Touch(path()?),
            "readFile" => Operation::ReadFile(path()?),
            "readdir" => Operation::Readdir(path()?),
            "stat" => Operation::Stat(path()?),
            "unlink" => Operation::Unlink(path()?),
            "rmdir" => Operation::Rmdir(path()?),
            "writeFile" => {
                let arguments = arguments(index, name, value)?;
                Operation::WriteFile {
                    path: field(index, name, arguments, "path")?,
                    content: field(index, name, arguments, "content")?,
                }
            }
            "copy" => {
                let arguments = arguments(index, name, value)?;
                Operation::Copy {
                    src: field(index, name, arguments, "src")?,
                    dest: field(index, name, arguments, "dest")?,
                }
            }
            "rename" => {
                let arguments = arguments(index, name, value)?;
                Operation::Rename {
                    src: field(index, name, arguments, "src")?,
                    dest: field(index, name, arguments, "dest")?,
                }
            }
            other => return UnknownOperationSnafu { index, name: other }.fail(),
        };
        Ok(operation)
    }

    pub fn apply(&self, fs: &mut MemoryFs) -> Result<Outcome, FileSystemError> {
        match self {
            Operation::Mkdir(path) => fs.mkdir(path).map(|_| Outcome::Created(path.clone())),
            Operation::Mkdirp(path) => fs.mkdirp(path).map(|_| Outcome::Created(path.clone())),
            Operation::Touch(path) => fs.touch(path).map(|_| Outcome::Created(path.clone())),
            Operation::WriteFile { path, content } => fs
                .write_file(path, content.as_str())
                .map(|_| Outcome::Written(path.clone())),
            Operation::ReadFile(path) => fs
                .read_file(path)
                .map(|content| Outcome::Content(content.to_string())),
            Operation::Readdir(path) => fs.readdir(path).map(Outcome::Entries),
            Operation::Stat(path) => fs.stat(path).map(Outcome::Stat),
            Operation::Unlink(path) => fs.unlink(path).map(|_| Outcome::Removed(path.clone())),
            Operation::Rmdir(path) => fs.rmdir(path).map(|_| Outcome::Removed(path.clone())),
            Operation::Copy { src, dest } => {
                let id = fs.copy(src, dest)?;
                let created = fs.tree().path_of(id).unwrap_or_else(|| dest.clone());
                Ok(Outcome::Created(created))
            }
            Operation::Rename { src, dest } => fs.rename(src, dest).map(|_| Outcome::Moved {
                from: src.clone(),
                to: dest.clone(),
            }),
        }
    }
}

fn path_argument(index: usize, operation: &str, value: &Yaml) -> Result<String, ScenarioError> {
    value.as_str().map(str::to_string).context(InvalidArgumentSnafu {
        index,
        operation,
        field: "path",
    })
}

fn arguments<'a, 'input>(
    index: usize,
    operation: &str,
    value: &'a Yaml<'input>,
) -> Result<&'a LinkedHashMap<Yaml<'input>, Yaml<'input>>, ScenarioError> {
    value.as_mapping().context(InvalidArgumentSnafu {
        index,
        operation,
        field: "arguments",
    })
}

fn field(
    index: usize,
    operation: &str,
    arguments: &LinkedHashMap<Yaml, Yaml>,
    name: &'static str,
) -> Result<String, ScenarioError> {
    arguments
        .get(&key(name))
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .context(InvalidArgumentSnafu {
            index,
            operation,
            field: name,
        })
}
