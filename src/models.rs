pub mod cice;
pub mod matm;
pub mod mom;

use crate::{
    config::{ModelConfig, ModelSection},
    coupler::Oasis,
    model::{ModelBase, Submodel},
};
use std::path::Path;
use tracing::warn;

/// Build the submodel for a config section.
///
/// The registry lives here with the experiment driver, not inside the hub:
/// the orchestrator only ever sees the capability trait. An unknown family
/// still participates in the experiment, it just has no coupling rule.
pub fn load(section: &ModelSection) -> Box<dyn Submodel> {
    let base = ModelBase::from_section(section);

    match section.model.as_str() {
        "oasis" => Box::new(Oasis::new(base)),
        "cice" => Box::new(cice::Cice::new(base)),
        "matm" => Box::new(matm::Matm::new(base)),
        "mom" => Box::new(mom::Mom::new(base)),
        other => {
            warn!(
                name = section.name,
                model = other,
                "Unknown model family, no coupling rule will apply"
            );
            Box::new(Generic::new(base, other))
        }
    }
}

/// a submodel of a family this crate has no coupling rule for; every
/// lifecycle phase is a no-op
#[derive(Debug)]
pub struct Generic {
    base: ModelBase,
    model_type: String,
}

impl Generic {
    pub fn new(base: ModelBase, model_type: &str) -> Self {
        Self {
            base,
            model_type: model_type.to_string(),
        }
    }
}

impl Submodel for Generic {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn model_type(&self) -> &str {
        &self.model_type
    }

    fn work_path(&self) -> &Path {
        &self.base.work_path
    }

    fn restart_path(&self) -> &Path {
        &self.base.restart_path
    }

    fn config(&self) -> &ModelConfig {
        &self.base.config
    }
}
