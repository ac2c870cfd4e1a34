use crate::{
    config::ModelSection,
    experiment::{Experiment, ExperimentError},
    model::CouplerError,
    models,
};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn section(lab: &TempDir, name: &str, model: &str) -> ModelSection {
    ModelSection {
        name: name.to_string(),
        model: model.to_string(),
        work: lab.path().join("work").join(name),
        restart: lab.path().join("restart").join(name),
        parameter: BTreeMap::new(),
    }
}

fn build(sections: &[ModelSection]) -> Result<Experiment, ExperimentError> {
    Experiment::new(sections.iter().map(models::load).collect())
}

#[test]
pub fn exactly_one_hub_is_required() {
    let lab = tempfile::tempdir().unwrap();

    let none = [section(&lab, "ice", "cice")];
    assert!(matches!(build(&none), Err(ExperimentError::NoHub)));

    let two = [
        section(&lab, "cpl1", "oasis"),
        section(&lab, "cpl2", "oasis"),
    ];
    match build(&two).err() {
        Some(ExperimentError::MultipleHubs(first, second)) => {
            assert_eq!(first, "cpl1");
            assert_eq!(second, "cpl2");
        }
        other => panic!("expected a multiple-hub error, got {other:?}"),
    }
}

#[test]
pub fn model_order_is_preserved() {
    let lab = tempfile::tempdir().unwrap();
    let sections = [
        section(&lab, "coupler", "oasis"),
        section(&lab, "ice", "cice"),
        section(&lab, "ocn", "mom"),
    ];

    let experiment = build(&sections).unwrap();
    let names: Vec<_> = experiment
        .models()
        .iter()
        .map(|model| model.name())
        .collect();

    assert_eq!(names, ["coupler", "ice", "ocn"]);
}

#[test]
pub fn zero_timestep_is_rejected() {
    let lab = tempfile::tempdir().unwrap();
    let sections = [section(&lab, "coupler", "oasis")];
    let experiment = build(&sections).unwrap();

    assert!(matches!(
        experiment.set_timestep(0),
        Err(CouplerError::ZeroTimestep)
    ));
}
