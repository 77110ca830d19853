use std::path::PathBuf;

use anyhow::Context;
use evac_core::FloorPlans;
use log::{info, warn};

pub const DEFAULT_PORT: u16 = 9080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Announce the authority over mDNS
    pub announce: bool,
    /// Directory of `floor_<n>.txt` plans for the authority's own display
    pub floor_plans: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let port = match lookup("EVAC_PORT") {
            Some(port) => port.trim().parse().with_context(|| format!("EVAC_PORT is not a port number: {port}"))?,
            None => DEFAULT_PORT,
        };
        let announce = match lookup("EVAC_ANNOUNCE") {
            Some(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
            None => true,
        };
        let floor_plans = lookup("EVAC_FLOOR_PLANS").filter(|dir| !dir.trim().is_empty()).map(PathBuf::from);
        Ok(Config { port, announce, floor_plans })
    }

    pub fn load_floor_plans(&self) -> anyhow::Result<FloorPlans> {
        let Some(dir) = &self.floor_plans else {
            info!("EVAC_FLOOR_PLANS not set, using the built-in floor plan");
            return Ok(FloorPlans::builtin());
        };
        let plans = FloorPlans::load_dir(dir).with_context(|| format!("loading floor plans from {}", dir.display()))?;
        if plans.is_empty() {
            warn!("no floor_<n>.txt plans in {}, routes will be empty", dir.display());
        }
        Ok(plans)
    }
}
