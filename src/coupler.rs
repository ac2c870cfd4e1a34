use crate::{
    fsops::{self, FsError},
    model::{patch_namcouple_timestep, CouplerError, ModelBase, Submodel},
};
use std::{ffi::OsString, fs, path::Path};
use tracing::{debug, info};

/// the hub's own configuration documents, fanned out explicitly and
/// excluded from the generic work-directory enumeration
pub const CONFIG_FILES: [&str; 1] = ["namcouple"];

/// exchange-restart files handed between submodels across a run cycle
pub const EXCHANGE_FILES: [&str; 4] = ["a2i.nc", "i2a.nc", "i2o.nc", "o2i.nc"];

/// The coupling hub of an experiment.
///
/// Owns the shared coupling documents and exchange fields: `setup` fans its
/// work directory out to every peer as symlinks, `sync_timestep` propagates
/// one coupling timestep into the hub document and every submodel's native
/// configuration, `archive` saves the exchange-restart files for the next
/// cycle.
#[derive(Debug)]
pub struct Oasis {
    base: ModelBase,
}

impl Oasis {
    pub fn new(base: ModelBase) -> Self {
        Self { base }
    }

    /// everything in the hub work directory that is not a coupling config
    /// document, in stable order
    fn shared_files(&self) -> Result<Vec<OsString>, FsError> {
        let read_error = |source| FsError::ReadDir {
            path: self.base.work_path.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.base.work_path).map_err(read_error)? {
            let name = entry.map_err(read_error)?.file_name();

            if !CONFIG_FILES.iter().any(|config| name.as_os_str() == *config) {
                files.push(name);
            }
        }

        // read_dir order is arbitrary; keep the fan-out deterministic
        files.sort();

        Ok(files)
    }
}

impl Submodel for Oasis {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn model_type(&self) -> &str {
        "oasis"
    }

    fn work_path(&self) -> &Path {
        &self.base.work_path
    }

    fn restart_path(&self) -> &Path {
        &self.base.restart_path
    }

    fn config(&self) -> &crate::config::ModelConfig {
        &self.base.config
    }

    fn copy_restarts(&self) -> bool {
        true
    }

    fn copy_inputs(&self) -> bool {
        true
    }

    fn is_coupling_hub(&self) -> bool {
        true
    }

    /// fan the coupling documents and shared input files out to every peer
    ///
    /// Re-running with unchanged hub contents recreates the identical links,
    /// so the phase is idempotent.
    fn setup(&self, peers: &[&dyn Submodel]) -> Result<(), CouplerError> {
        // TODO: parse the namcouple field table instead of linking everything
        let shared = self.shared_files()?;

        for peer in peers {
            fsops::mkdir_p(peer.work_path())?;

            let names = CONFIG_FILES
                .iter()
                .map(|name| OsString::from(*name))
                .chain(shared.iter().cloned());

            for name in names {
                let target = self.base.work_path.join(&name);
                let link = peer.work_path().join(&name);
                fsops::make_symlink(&target, &link)?;
            }

            debug!(peer = peer.name(), "Linked coupling files");
        }

        Ok(())
    }

    /// set the coupling timestep in the hub document, then let every model
    /// patch its own native configuration
    fn sync_timestep(&self, t_step: u32, models: &[&dyn Submodel]) -> Result<(), CouplerError> {
        info!(t_step, "Synchronizing coupling timestep");

        let namcouple = self.base.work_path.join(CONFIG_FILES[0]);
        patch_namcouple_timestep(&namcouple, &t_step.to_string())?;

        for model in models {
            model.apply_coupling_interval(t_step)?;
        }

        Ok(())
    }

    /// move whatever exchange-restart files this cycle produced into the
    /// restart directory
    fn archive(&self) -> Result<(), CouplerError> {
        fsops::mkdir_p(&self.base.restart_path)?;

        for file in EXCHANGE_FILES {
            let src = self.base.work_path.join(file);

            if src.exists() {
                fsops::move_file(&src, &self.base.restart_path.join(file))?;
            } else {
                // not every cycle produces every exchange file
                debug!(file, "No exchange restart produced this cycle");
            }
        }

        Ok(())
    }

    // collation of hub output belongs to the separate collector
}
