use crate::{
    config::ModelConfig,
    model::{patch_namcouple_timestep, patch_namelist, CouplerError, ModelBase, Submodel},
};
use std::path::Path;
use tracing::debug;

/// the sea-ice submodel
#[derive(Debug)]
pub struct Cice {
    base: ModelBase,
}

impl Cice {
    pub fn new(base: ModelBase) -> Self {
        Self { base }
    }

    /// the model's own timestep hook: align the coupling period of the
    /// namcouple in its work directory with its internal timestep
    pub fn set_oasis_timestep(&self, t_step: u32) -> Result<(), CouplerError> {
        debug!(name = self.base.name, t_step, "Setting sea-ice oasis timestep");

        let namcouple = self.base.work_path.join("namcouple");
        patch_namcouple_timestep(&namcouple, &t_step.to_string())
    }
}

impl Submodel for Cice {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn model_type(&self) -> &str {
        "cice"
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
        // an internal timestep in the model config also drives its own hook
        if let Some(ice_ts) = self.base.config.get("timestep").and_then(|v| v.as_u64()) {
            self.set_oasis_timestep(ice_ts as u32)?;
        }

        let input_ice = self.base.work_path.join("input_ice.nml");
        patch_namelist(&input_ice, "coupling_nml", "dt_cpl_io", t_step)
    }
}
