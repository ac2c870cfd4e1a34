use clap::{Parser, Subcommand};
use cplrun::{config::ExperimentConfig, experiment::Experiment, jobenv, submit};
use std::{error::Error, path::PathBuf, process::exit};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cplrun", about = "Coupled experiment scheduling and synchronization")]
struct Cli {
    /// experiment configuration document
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the scheduler invocation for one run script and submit it
    Submit {
        script: PathBuf,
        /// first run counter of this submission, zero for a fresh experiment
        #[arg(long)]
        init_run: Option<u32>,
        /// number of runs this submission should perform
        #[arg(long)]
        n_runs: Option<u32>,
    },
    /// Fan the coupling hub's shared files out to every submodel
    Setup,
    /// Synchronize the coupling timestep across all submodels
    Timestep { seconds: u32 },
    /// Move this cycle's exchange-restart files into the restart directories
    Archive,
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = ExperimentConfig::load(&cli.config)?;

    match cli.command {
        Command::Submit {
            script,
            init_run,
            n_runs,
        } => {
            let job_env = jobenv::resolve(init_run, n_runs)?;
            let host = submit::local_host_family()?;
            let ambient = jobenv::ambient_project();

            let command = submit::build_qsub(
                &config.scheduler,
                &host,
                ambient.as_deref(),
                &job_env,
                &script,
            )?;

            command.submit()?;
        }
        Command::Setup => Experiment::from_config(&config)?.setup()?,
        Command::Timestep { seconds } => Experiment::from_config(&config)?.set_timestep(seconds)?,
        Command::Archive => Experiment::from_config(&config)?.archive()?,
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        error!("{error}");
        exit(1);
    }
}
