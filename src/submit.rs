use crate::config::{ConfigError, PbsRequest};
use itertools::Itertools;
use std::{collections::BTreeMap, path::Path, process::Command};
use thiserror::Error;
use tracing::{debug, info};

/// submission binary of the PBS dialect targeted here
const QSUB: &str = "qsub";

/// scheduler imposed limit on job names
const JOBNAME_LIMIT: usize = 15;

/// host family that speaks the vmem/-wd flag dialect
const VMEM_HOST: &str = "vayu";

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Failed to invoke the scheduler")]
    Spawn(#[from] std::io::Error),
    #[error("Scheduler rejected the submission: {0}")]
    Rejected(std::process::ExitStatus),
    #[error("Failed to resolve the local hostname")]
    Hostname(#[from] nix::Error),
}

/// A fully assembled scheduler invocation: program, ordered flag tokens and
/// the trailing script path. No hidden state, determined entirely by the
/// resource request and host family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbsCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl PbsCommand {
    /// submit the job, blocking until qsub returns
    ///
    /// A spawn failure or nonzero exit is surfaced as is; there is no retry.
    pub fn submit(&self) -> Result<(), SubmitError> {
        info!(program = %self.program, args = ?self.args, "Submitting job");

        let status = Command::new(&self.program).args(&self.args).status()?;

        if status.success() {
            Ok(())
        } else {
            Err(SubmitError::Rejected(status))
        }
    }
}

/// strip the trailing digits a scheduler appends to login node names,
/// leaving the host family ("vayu3" -> "vayu")
pub fn host_family(hostname: &str) -> &str {
    hostname.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// resolve the short local hostname to its host family
///
/// Boundary helper; everything below `build_qsub` takes the family as a
/// plain value so it stays testable without a live host.
pub fn local_host_family() -> Result<String, SubmitError> {
    let hostname = nix::unistd::gethostname()?;
    let hostname = hostname.to_string_lossy();
    let short = hostname.split('.').next().unwrap_or(&hostname);

    Ok(host_family(short).to_string())
}

/// Map a resource request onto a qsub command line.
///
/// Flag order is fixed. The project is the only required field: the request
/// wins, then the ambient fallback, otherwise this is a configuration error
/// and nothing is emitted.
pub fn build_qsub(
    request: &PbsRequest,
    host: &str,
    ambient_project: Option<&str>,
    job_env: &BTreeMap<String, String>,
    script: &Path,
) -> Result<PbsCommand, ConfigError> {
    let mut args = Vec::new();

    args.push("-q".to_string());
    args.push(request.queue.clone());

    // The login environment on some hosts drops $PROJECT, so the request
    // takes precedence over the ambient value.
    let project = request
        .project
        .as_deref()
        .or(ambient_project)
        .ok_or(ConfigError::MissingProject)?;
    args.push("-P".to_string());
    args.push(project.to_string());

    if let Some(walltime) = &request.walltime {
        args.push("-l".to_string());
        args.push(format!("walltime={walltime}"));
    }

    if let Some(ncpus) = request.ncpus {
        args.push("-l".to_string());
        args.push(format!("ncpus={ncpus}"));
    }

    if let Some(mem) = &request.mem {
        let mem_rname = if host == VMEM_HOST { "vmem" } else { "mem" };
        args.push("-l".to_string());
        args.push(format!("{mem_rname}={mem}"));
    }

    if let Some(jobname) = &request.jobname {
        // truncated unconditionally, the limit applies on every host family
        let jobname: String = jobname.chars().take(JOBNAME_LIMIT).collect();
        args.push("-N".to_string());
        args.push(jobname);
    }

    if let Some(priority) = request.priority {
        args.push("-p".to_string());
        args.push(priority.to_string());
    }

    if host == VMEM_HOST {
        args.push("-wd".to_string());
    } else {
        args.push("-l".to_string());
        args.push("wd".to_string());
    }

    args.push("-j".to_string());
    args.push("oe".to_string());

    if !job_env.is_empty() {
        let vstring = job_env
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .join(",");
        args.push("-v".to_string());
        args.push(vstring);
    }

    if let Some(extra) = &request.qsub_flags {
        args.extend(extra.split_whitespace().map(String::from));
    }

    args.push(script.to_string_lossy().into_owned());

    debug!(host = host, args = ?args, "Assembled submission command");

    Ok(PbsCommand {
        program: QSUB.to_string(),
        args,
    })
}
