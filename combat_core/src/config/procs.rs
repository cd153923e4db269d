//! Proc definition loading

use super::ConfigError;
use crate::proc::ProcDefinition;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for authored proc definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcsConfig {
    pub procs: Vec<ProcDefinition>,
}

/// Load proc definitions from a TOML file. The host registers each entry
/// with the proc engine for its owner.
pub fn load_proc_configs(path: &Path) -> Result<Vec<ProcDefinition>, ConfigError> {
    let config: ProcsConfig = super::load_toml(path)?;
    Ok(config.procs)
}

/// Load proc definitions from a TOML string
pub fn parse_proc_configs(content: &str) -> Result<Vec<ProcDefinition>, ConfigError> {
    let config: ProcsConfig = super::parse_toml(content)?;
    Ok(config.procs)
}
