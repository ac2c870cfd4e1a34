use crate::{
    config::ExperimentConfig,
    model::{CouplerError, Submodel},
    models,
};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error("The experiment has no coupling hub")]
    NoHub,
    #[error("The experiment has more than one coupling hub ({0} and {1})")]
    MultipleHubs(String, String),
}

/// The ordered collection of submodels forming one coupled experiment.
///
/// Exactly one member is the coupling hub; the order is otherwise only
/// significant for making the fan-out deterministic. All phases run
/// serially in this order and stop at the first failure.
pub struct Experiment {
    models: Vec<Box<dyn Submodel>>,
}

impl Experiment {
    pub fn new(models: Vec<Box<dyn Submodel>>) -> Result<Self, ExperimentError> {
        let mut hub: Option<&str> = None;

        for model in models.iter().filter(|model| model.is_coupling_hub()) {
            match hub {
                None => hub = Some(model.name()),
                Some(first) => {
                    return Err(ExperimentError::MultipleHubs(
                        first.to_string(),
                        model.name().to_string(),
                    ))
                }
            }
        }

        if hub.is_none() {
            return Err(ExperimentError::NoHub);
        }

        Ok(Self { models })
    }

    pub fn from_config(config: &ExperimentConfig) -> Result<Self, ExperimentError> {
        Self::new(config.models.iter().map(models::load).collect())
    }

    pub fn models(&self) -> &[Box<dyn Submodel>] {
        &self.models
    }

    fn views(&self) -> Vec<&dyn Submodel> {
        self.models.iter().map(Box::as_ref).collect()
    }

    /// run every model's setup phase; each model sees all others as peers,
    /// never itself
    pub fn setup(&self) -> Result<(), CouplerError> {
        let views = self.views();

        for (index, model) in views.iter().enumerate() {
            if model.copy_inputs() {
                debug!(name = model.name(), "Model takes part in the input copy");
            }

            let peers: Vec<&dyn Submodel> = views
                .iter()
                .enumerate()
                .filter(|(peer_index, _)| *peer_index != index)
                .map(|(_, peer)| *peer)
                .collect();

            model.setup(&peers)?;
        }

        Ok(())
    }

    /// synchronize the coupling timestep across the whole experiment
    ///
    /// Safe to run again after a restart-parameter change; it does not
    /// reverse setup.
    pub fn set_timestep(&self, t_step: u32) -> Result<(), CouplerError> {
        if t_step == 0 {
            return Err(CouplerError::ZeroTimestep);
        }

        let views = self.views();
        for model in views.iter() {
            model.sync_timestep(t_step, &views)?;
        }

        Ok(())
    }

    /// archive every model that takes part in the restart copy
    pub fn archive(&self) -> Result<(), CouplerError> {
        for model in self.models.iter() {
            if model.copy_restarts() {
                model.archive()?;
            }
        }

        Ok(())
    }

    pub fn collate(&self) -> Result<(), CouplerError> {
        for model in self.models.iter() {
            model.collate()?;
        }

        info!("Collation is handled by the external collector");
        Ok(())
    }
}
