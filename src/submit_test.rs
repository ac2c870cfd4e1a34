use crate::{
    config::{ConfigError, PbsRequest},
    submit::{build_qsub, host_family},
};
use std::{collections::BTreeMap, num::NonZeroU32, path::Path};

fn request() -> PbsRequest {
    PbsRequest {
        project: Some("x77".to_string()),
        ..PbsRequest::default()
    }
}

fn no_env() -> BTreeMap<String, String> {
    BTreeMap::new()
}

fn args(request: &PbsRequest, host: &str) -> Vec<String> {
    build_qsub(request, host, None, &no_env(), Path::new("run.sh"))
        .unwrap()
        .args
}

#[test]
pub fn minimal_request() {
    let command = build_qsub(&request(), "raijin", None, &no_env(), Path::new("run.sh")).unwrap();

    assert_eq!(command.program, "qsub");
    assert_eq!(
        command.args,
        vec!["-q", "normal", "-P", "x77", "-l", "wd", "-j", "oe", "run.sh"]
    );
}

#[test]
pub fn optional_fields_omitted_when_unset() {
    let args = args(&request(), "raijin");

    for flag in ["-N", "-p", "-v"] {
        assert!(!args.contains(&flag.to_string()));
    }
    assert!(!args.iter().any(|arg| arg.starts_with("walltime=")));
    assert!(!args.iter().any(|arg| arg.starts_with("ncpus=")));
    assert!(!args.iter().any(|arg| arg.starts_with("mem=")));
}

#[test]
pub fn full_request_flag_order() {
    let mut full = request();
    full.walltime = Some("10:00:00".to_string());
    full.ncpus = NonZeroU32::new(128);
    full.mem = Some("250GB".to_string());
    full.jobname = Some("access-cm".to_string());
    full.priority = Some(500);
    full.qsub_flags = Some("-W umask=027".to_string());

    let mut env = BTreeMap::new();
    env.insert("A".to_string(), "1".to_string());
    env.insert("B".to_string(), "2".to_string());

    let command = build_qsub(&full, "raijin", None, &env, Path::new("run.sh")).unwrap();

    assert_eq!(
        command.args,
        vec![
            "-q",
            "normal",
            "-P",
            "x77",
            "-l",
            "walltime=10:00:00",
            "-l",
            "ncpus=128",
            "-l",
            "mem=250GB",
            "-N",
            "access-cm",
            "-p",
            "500",
            "-l",
            "wd",
            "-j",
            "oe",
            "-v",
            "A=1,B=2",
            "-W",
            "umask=027",
            "run.sh"
        ]
    );
}

#[test]
pub fn project_falls_back_to_ambient() {
    let mut no_project = request();
    no_project.project = None;

    let command = build_qsub(
        &no_project,
        "raijin",
        Some("w35"),
        &no_env(),
        Path::new("run.sh"),
    )
    .unwrap();

    assert!(command.args.windows(2).any(|pair| pair == ["-P", "w35"]));
}

#[test]
pub fn missing_project_is_a_config_error() {
    let mut no_project = request();
    no_project.project = None;

    let result = build_qsub(&no_project, "raijin", None, &no_env(), Path::new("run.sh"));

    assert!(matches!(result, Err(ConfigError::MissingProject)));
}

#[test]
pub fn request_project_wins_over_ambient() {
    let command = build_qsub(
        &request(),
        "raijin",
        Some("w35"),
        &no_env(),
        Path::new("run.sh"),
    )
    .unwrap();

    assert!(command.args.windows(2).any(|pair| pair == ["-P", "x77"]));
}

#[test]
pub fn vayu_host_family_selects_vmem_and_wd() {
    let mut with_mem = request();
    with_mem.mem = Some("32GB".to_string());

    let args = args(&with_mem, host_family("vayu3"));

    assert!(args.contains(&"vmem=32GB".to_string()));
    assert!(args.contains(&"-wd".to_string()));
    assert!(!args.windows(2).any(|pair| pair == ["-l", "wd"]));
}

#[test]
pub fn other_host_family_selects_mem_and_l_wd() {
    let mut with_mem = request();
    with_mem.mem = Some("32GB".to_string());

    let args = args(&with_mem, host_family("raijin7"));

    assert!(args.contains(&"mem=32GB".to_string()));
    assert!(!args.contains(&"-wd".to_string()));
    assert!(args.windows(2).any(|pair| pair == ["-l", "wd"]));
}

#[test]
pub fn host_family_strips_trailing_digits() {
    assert_eq!(host_family("vayu3"), "vayu");
    assert_eq!(host_family("raijin"), "raijin");
    assert_eq!(host_family("login42"), "login");
}

#[test]
pub fn long_jobname_truncated_to_fifteen() {
    let mut named = request();
    named.jobname = Some("a-very-long-experiment-name".to_string());

    let args = args(&named, "raijin");
    let position = args.iter().position(|arg| arg == "-N").unwrap();

    assert_eq!(args[position + 1], "a-very-long-exp");
    assert_eq!(args[position + 1].len(), 15);
}

#[test]
pub fn short_jobname_unchanged() {
    let mut named = request();
    named.jobname = Some("short".to_string());

    let args = args(&named, "raijin");
    let position = args.iter().position(|arg| arg == "-N").unwrap();

    assert_eq!(args[position + 1], "short");
}

#[test]
pub fn passthrough_flags_come_after_generated_flags() {
    let mut extra = request();
    extra.qsub_flags = Some("-W umask=027".to_string());

    let args = args(&extra, "raijin");
    let merge = args.iter().position(|arg| arg == "-j").unwrap();
    let passthrough = args.iter().position(|arg| arg == "-W").unwrap();

    assert!(passthrough > merge);
    assert_eq!(args.last().unwrap(), "run.sh");
}
