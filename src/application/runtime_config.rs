use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub scenario: PathBuf,
    pub fail_fast: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            scenario: cli.scenario,
            fail_fast: cli.fail_fast,
        }
    }
}
