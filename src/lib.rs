pub mod config;
pub mod coupler;
pub mod experiment;
pub mod fsops;
pub mod jobenv;
pub mod model;
pub mod models;
pub mod namcouple;
pub mod nml;
pub mod submit;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod experiment_test;
#[cfg(test)]
mod fsops_test;
#[cfg(test)]
mod submit_test;
