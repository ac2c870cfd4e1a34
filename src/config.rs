use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs::File, num::NonZeroU32, path::Path, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read experiment config")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse experiment config")]
    Parse(#[from] serde_yaml::Error),
    #[error("No project in the scheduler config and no ambient project fallback")]
    MissingProject,
    #[error("n_runs must be a positive integer")]
    ZeroRunCount,
}

/// free-form per-model parameter mapping, interpreted by each model family
pub type ModelConfig = BTreeMap<String, serde_yaml::Value>;

/// Top level experiment configuration document.
///
/// `scheduler` holds the resource request for the batch submission,
/// `models` the ordered set of coupled submodels (order fixes fan-out order).
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct ExperimentConfig {
    pub scheduler: PbsRequest,
    #[serde(default)]
    pub models: Vec<ModelSection>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    pub name: String,
    // Name of the selected model family, see models::load for the selection proccess
    pub model: String,
    pub work: PathBuf,
    pub restart: PathBuf,
    #[serde(default)]
    pub parameter: ModelConfig,
}

/// Declarative resource request for one batch submission.
/// Every field except the queue is optional in the document; the project
/// must be resolvable from here or from the ambient environment.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct PbsRequest {
    #[serde(default = "default_queue")]
    pub queue: String,
    pub project: Option<String>,
    pub walltime: Option<String>,
    pub ncpus: Option<NonZeroU32>,
    pub mem: Option<String>,
    pub jobname: Option<String>,
    pub priority: Option<i32>,
    pub qsub_flags: Option<String>,
}

impl Default for PbsRequest {
    fn default() -> Self {
        Self {
            queue: default_queue(),
            project: None,
            walltime: None,
            ncpus: None,
            mem: None,
            jobname: None,
            priority: None,
            qsub_flags: None,
        }
    }
}

impl ExperimentConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;

        Ok(serde_yaml::from_reader(file)?)
    }
}

fn default_queue() -> String {
    String::from("normal")
}
