use crate::{
    config::ModelConfig,
    model::{patch_namelist, CouplerError, ModelBase, Submodel},
};
use std::path::Path;

/// the ocean submodel
#[derive(Debug)]
pub struct Mom {
    base: ModelBase,
}

impl Mom {
    pub fn new(base: ModelBase) -> Self {
        Self { base }
    }
}

impl Submodel for Mom {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn model_type(&self) -> &str {
        "mom"
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

    /// the ocean couples through both its ice interface and the solo driver,
    /// so two intervals are kept in step
    fn apply_coupling_interval(&self, t_step: u32) -> Result<(), CouplerError> {
        let input_nml = self.base.work_path.join("input.nml");

        patch_namelist(&input_nml, "auscom_ice_nml", "dt_cpl", t_step)?;
        patch_namelist(&input_nml, "ocean_solo_nml", "dt_cpld", t_step)
    }
}
