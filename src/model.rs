use crate::{
    config::{ModelConfig, ModelSection},
    fsops::FsError,
    namcouple::{Namcouple, NamcoupleError},
    nml::{Namelist, NmlError},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CouplerError {
    #[error("Coupling timestep must be a positive number of seconds")]
    ZeroTimestep,
    #[error("Namelist {path} is missing; the submodel's default configuration must run first")]
    MissingNamelist { path: PathBuf },
    #[error(transparent)]
    Fs(#[from] FsError),
    #[error(transparent)]
    Namelist(#[from] NmlError),
    #[error(transparent)]
    Namcouple(#[from] NamcoupleError),
}

/// One cooperating submodel of a coupled experiment.
///
/// Every lifecycle method has a no-op default; a model family only overrides
/// the phases it takes part in. The coupling hub overrides `setup`,
/// `sync_timestep` and `archive`; peer families override
/// `apply_coupling_interval` with their own native-document rule. Unknown
/// families fall through to the defaults, which is deliberate.
pub trait Submodel {
    fn name(&self) -> &str;
    fn model_type(&self) -> &str;
    fn work_path(&self) -> &Path;
    fn restart_path(&self) -> &Path;
    fn config(&self) -> &ModelConfig;

    /// whether this model's restart files take part in the restart copy phase
    fn copy_restarts(&self) -> bool {
        false
    }

    /// whether this model's input files take part in the input copy phase
    fn copy_inputs(&self) -> bool {
        false
    }

    /// does this model coordinate shared files and the coupling timestep
    fn is_coupling_hub(&self) -> bool {
        false
    }

    /// prepare the work directory; `peers` never contains the model itself
    fn setup(&self, _peers: &[&dyn Submodel]) -> Result<(), CouplerError> {
        Ok(())
    }

    /// propagate a synchronized coupling timestep across `models`
    fn sync_timestep(&self, _t_step: u32, _models: &[&dyn Submodel]) -> Result<(), CouplerError> {
        Ok(())
    }

    /// patch this model's own native document(s) with the coupling interval
    fn apply_coupling_interval(&self, _t_step: u32) -> Result<(), CouplerError> {
        Ok(())
    }

    fn archive(&self) -> Result<(), CouplerError> {
        Ok(())
    }

    fn collate(&self) -> Result<(), CouplerError> {
        Ok(())
    }
}

/// the state every model family shares: identity, paths and its free-form
/// parameter mapping
#[derive(Debug, Clone)]
pub struct ModelBase {
    pub name: String,
    pub work_path: PathBuf,
    pub restart_path: PathBuf,
    pub config: ModelConfig,
}

impl ModelBase {
    pub fn from_section(section: &ModelSection) -> Self {
        Self {
            name: section.name.clone(),
            work_path: section.work.clone(),
            restart_path: section.restart.clone(),
            config: section.parameter.clone(),
        }
    }
}

/// read-modify-write of a single `group / key` entry in a native namelist
///
/// The document must already exist: it is created by the owning submodel's
/// default configuration step, and its absence here is a broken dependency,
/// never something to skip.
pub fn patch_namelist(
    path: &Path,
    group: &str,
    key: &str,
    value: u32,
) -> Result<(), CouplerError> {
    if !path.exists() {
        return Err(CouplerError::MissingNamelist {
            path: path.to_path_buf(),
        });
    }

    let mut namelist = Namelist::read(path)?;
    namelist.set(group, key, value);
    namelist.write(path)?;

    Ok(())
}

/// read-modify-write of the coupling timestep in a namcouple document
pub fn patch_namcouple_timestep(path: &Path, t_step: &str) -> Result<(), CouplerError> {
    if !path.exists() {
        return Err(CouplerError::MissingNamelist {
            path: path.to_path_buf(),
        });
    }

    let mut namcouple = Namcouple::read(path)?;
    namcouple.set_coupling_timestep(t_step)?;
    namcouple.write()?;

    Ok(())
}
