use crate::config::ConfigError;
use std::{collections::BTreeMap, env};
use tracing::debug;

/// environment variables injected into the submitted job
pub const MODULE_NAME_VAR: &str = "CPLRUN_MODULENAME";
pub const MODULE_PATH_VAR: &str = "CPLRUN_MODULEPATH";
pub const CURRENT_RUN_VAR: &str = "CPLRUN_CURRENT_RUN";
pub const N_RUNS_VAR: &str = "CPLRUN_N_RUNS";

/// ambient variables consulted on the submitting host
const PROJECT_VAR: &str = "PROJECT";
const LOADED_MODULES_VAR: &str = "LOADEDMODULES";
const MODULE_FILES_VAR: &str = "_LMFILES_";

/// module entries belonging to this package start with its name
const MODULE_PREFIX: &str = "cplrun";

/// the ambient project identifier, used as fallback when the resource
/// request names none
pub fn ambient_project() -> Option<String> {
    env::var(PROJECT_VAR).ok()
}

/// recover the package's module name and module file path from the module
/// system's tracking variables
///
/// Pure on its inputs so it can be tested without touching the process
/// environment; `resolve` feeds it the live values.
pub fn module_metadata(loaded_modules: &str, module_files: &str) -> Option<(String, String)> {
    let modname = loaded_modules
        .split(':')
        .find(|module| module.starts_with(MODULE_PREFIX))?;

    let modpath = module_files
        .split(':')
        .find(|path| path.contains(modname))?;
    let modpath = modpath.strip_suffix(modname).unwrap_or(modpath);

    Some((modname.to_string(), modpath.to_string()))
}

/// Resolve the environment mapping passed into the submitted job.
///
/// Module metadata is best effort: a submitting shell without the module
/// system simply injects nothing. The run counters are validated here:
/// `init_run` may be zero (a fresh experiment), `n_runs` may not.
pub fn resolve(
    init_run: Option<u32>,
    n_runs: Option<u32>,
) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut vars = BTreeMap::new();

    match (env::var(LOADED_MODULES_VAR), env::var(MODULE_FILES_VAR)) {
        (Ok(loaded), Ok(files)) => match module_metadata(&loaded, &files) {
            Some((name, path)) => {
                vars.insert(MODULE_NAME_VAR.to_string(), name);
                vars.insert(MODULE_PATH_VAR.to_string(), path);
            }
            None => debug!("No {MODULE_PREFIX} module loaded, skipping module metadata"),
        },
        _ => debug!("Module tracking variables not set, skipping module metadata"),
    }

    if let Some(init_run) = init_run {
        vars.insert(CURRENT_RUN_VAR.to_string(), init_run.to_string());
    }

    if let Some(n_runs) = n_runs {
        if n_runs == 0 {
            return Err(ConfigError::ZeroRunCount);
        }
        vars.insert(N_RUNS_VAR.to_string(), n_runs.to_string());
    }

    Ok(vars)
}
