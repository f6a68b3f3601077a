// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::DEFAULT_DURATION;
use crate::reaper::FinalizerPolicy;
use crate::types::InclusionFilter;

/// How credentials for the Kubernetes API are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConnectionMode {
    /// Use a kubeconfig file, like kubectl does
    Kubectl,
    /// Use the service account mounted into the pod
    Incluster,
}

/// Force-delete namespaces stuck in Terminating
#[derive(Parser, Debug, Clone)]
#[command(name = "nsreaper", version)]
pub struct Config {
    /// What type of connection to use
    #[arg(long, value_enum, default_value = "kubectl", env = "NSREAPER_CONNECTION_MODE")]
    pub connection_mode: ConnectionMode,

    /// Absolute path to the kubeconfig file (inferred when omitted)
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Schedule deletion for all namespaces
    #[arg(long, env = "NSREAPER_INCLUDE_ALL")]
    pub include_all: bool,

    /// Namespaces to include in deletion list
    #[arg(long, value_delimiter = ',', env = "NSREAPER_INCLUDE")]
    pub include: Vec<String>,

    /// Namespaces to ignore from deletion list
    #[arg(long, value_delimiter = ',', env = "NSREAPER_IGNORE")]
    pub ignore: Vec<String>,

    /// Time to wait between strategies (e.g. 500ms, 30s, 2m, 1h)
    #[arg(long, value_parser = parse_duration, default_value = DEFAULT_DURATION, env = "NSREAPER_DURATION")]
    pub duration: Duration,

    /// Collapse namespaces listed more than once
    #[arg(long, env = "NSREAPER_DEDUPE_INCLUDE")]
    pub dedupe_include: bool,

    /// Fail on every finalizer removal error, even for objects already gone
    #[arg(long, env = "NSREAPER_STRICT_FINALIZERS")]
    pub strict_finalizers: bool,
}

impl Config {
    /// Parse the command line and environment, then validate
    pub fn load() -> Result<Self> {
        let config = Config::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.include_all && self.include.is_empty() {
            bail!("No namespaces specified. Use one of the following flags: --include or --include-all");
        }
        Ok(())
    }

    pub fn filter(&self) -> InclusionFilter {
        InclusionFilter {
            include_all: self.include_all,
            include: self.include.clone(),
            ignore: self.ignore.clone(),
            dedupe: self.dedupe_include,
        }
    }

    pub fn finalizer_policy(&self) -> FinalizerPolicy {
        if self.strict_finalizers {
            FinalizerPolicy::Strict
        } else {
            FinalizerPolicy::Lenient
        }
    }
}

/// Parse `500ms`, `30s`, `2m`, `1h`; a bare number means seconds
pub fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);
    if digits.is_empty() {
        bail!("invalid duration '{}': expected a number", raw);
    }
    let value: u64 = digits.parse()?;

    let duration = match unit {
        "" | "s" => Duration::from_secs(value),
        "ms" => Duration::from_millis(value),
        "m" => Duration::from_secs(scale(raw, value, 60)?),
        "h" => Duration::from_secs(scale(raw, value, 3600)?),
        other => bail!("invalid duration '{}': unknown unit '{}'", raw, other),
    };
    Ok(duration)
}

fn scale(raw: &str, value: u64, factor: u64) -> Result<u64> {
    match value.checked_mul(factor) {
        Some(secs) => Ok(secs),
        None => bail!("invalid duration '{}': too large", raw),
    }
}
