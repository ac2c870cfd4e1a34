use crate::{
    config::ModelConfig,
    model::{patch_namelist, CouplerError, ModelBase, Submodel},
};
use std::path::Path;

/// the atmosphere submodel
#[derive(Debug)]
pub struct Matm {
    base: ModelBase,
}

impl Matm {
    pub fn new(base: ModelBase) -> Self {
        Self { base }
    }
}

impl Submodel for Matm {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn model_type(&self) -> &str {
        "matm"
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

    fn apply_coupling_interval(&self, t_step: u32) -> Result<(), CouplerError> {
        let input_atm = self.base.work_path.join("input_atm.nml");
        patch_namelist(&input_atm, "coupling", "dt_atm", t_step)
    }
}
