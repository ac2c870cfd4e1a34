use crate::config::{ExperimentConfig, PbsRequest};
use std::num::NonZeroU32;

const CONFIG: &str = "\
scheduler:
  project: x77
  walltime: '10:00:00'
  ncpus: 128
  jobname: access-cm
models:
  - name: coupler
    model: oasis
    work: work/cpl
    restart: restart/cpl
  - name: ice
    model: cice
    work: work/ice
    restart: restart/ice
    parameter:
      timestep: 1800
";

#[test]
pub fn document_parses_with_defaults() {
    let config: ExperimentConfig = serde_yaml::from_str(CONFIG).unwrap();

    assert_eq!(config.scheduler.queue, "normal");
    assert_eq!(config.scheduler.project.as_deref(), Some("x77"));
    assert_eq!(config.scheduler.ncpus, NonZeroU32::new(128));
    assert!(config.scheduler.mem.is_none());
}

#[test]
pub fn model_sections_keep_document_order() {
    let config: ExperimentConfig = serde_yaml::from_str(CONFIG).unwrap();

    let names: Vec<_> = config.models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["coupler", "ice"]);

    let timestep = config.models[1].parameter.get("timestep").unwrap();
    assert_eq!(timestep.as_u64(), Some(1800));
}

#[test]
pub fn unknown_scheduler_keys_are_rejected() {
    let bad = "scheduler:\n  project: x77\n  cores: 4\n";

    assert!(serde_yaml::from_str::<ExperimentConfig>(bad).is_err());
}

#[test]
pub fn zero_ncpus_is_rejected() {
    let bad = "scheduler:\n  project: x77\n  ncpus: 0\n";

    assert!(serde_yaml::from_str::<ExperimentConfig>(bad).is_err());
}

#[test]
pub fn default_request_has_the_normal_queue() {
    assert_eq!(PbsRequest::default().queue, "normal");
}
