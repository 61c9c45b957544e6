pub mod data;
mod output;
mod runtime_config;

use memfs::MemoryFs;
use memfs::scenario::{Scenario, ScenarioError};
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

pub use runtime_config::RuntimeConfig;

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let scenario = Scenario::from_path(&app_config.scenario)
            .await
            .context(ScenarioSnafu)?;
        info!("Loaded scenario with {} operations", scenario.len());

        output::configure_colors();
        let mut fs = MemoryFs::new();
        let mut failures = 0usize;
        for operation in scenario.operations() {
            match operation.apply(&mut fs) {
                Ok(outcome) => {
                    debug!("'{}' succeeded", operation);
                    output::print_success(operation, &outcome);
                }
                Err(error) => {
                    warn!("'{}' failed: {}", operation, error);
                    output::print_failure(operation, &error);
                    failures += 1;
                    if app_config.fail_fast {
                        return Err(error).context(OperationSnafu {
                            operation: operation.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            "Replayed {} operations, {} failed, {} nodes in the tree",
            scenario.len(),
            failures,
            fs.tree().node_count()
        );
        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the scenario"))]
    ScenarioError { source: ScenarioError },
    #[snafu(display("Operation '{}' failed", operation))]
    OperationError {
        operation: String,
        source: memfs::FileSystemError,
    },
}
