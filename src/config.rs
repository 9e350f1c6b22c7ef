use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analytics::histogram::DEFAULT_PRICE_BINS;
use crate::analytics::outliers::{validate_factor, DEFAULT_FACTOR};
use crate::ingest::CommitPolicy;
use crate::models::Pagination;

/// Runtime settings for the report binary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// CSV file imported at start
    pub import_path: PathBuf,
    /// Where the JSON report is written
    pub report_path: PathBuf,
    /// IQR multiplier for the outlier fence
    pub outlier_factor: f64,
    /// Bin count for the price histogram
    pub histogram_bins: usize,
    pub commit_policy: CommitPolicy,
    pub page_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            import_path: PathBuf::from("properties.csv"),
            report_path: PathBuf::from("analytics_report.json"),
            outlier_factor: DEFAULT_FACTOR,
            histogram_bins: DEFAULT_PRICE_BINS,
            commit_policy: CommitPolicy::PerRow,
            page_limit: Pagination::DEFAULT_LIMIT,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by any of the recognised environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            import_path: lookup("PROPERTY_IMPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.import_path),
            report_path: lookup("PROPERTY_REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.report_path),
            outlier_factor: parse_var(&lookup, "OUTLIER_FACTOR")?
                .unwrap_or(defaults.outlier_factor),
            histogram_bins: parse_var(&lookup, "HISTOGRAM_BINS")?
                .unwrap_or(defaults.histogram_bins),
            commit_policy: match parse_var::<bool>(&lookup, "IMPORT_ATOMIC")? {
                Some(true) => CommitPolicy::AllOrNothing,
                Some(false) => CommitPolicy::PerRow,
                None => defaults.commit_policy,
            },
            page_limit: parse_var(&lookup, "DEFAULT_PAGE_LIMIT")?.unwrap_or(defaults.page_limit),
        };

        validate_factor(config.outlier_factor).context("OUTLIER_FACTOR")?;
        if config.histogram_bins == 0 {
            bail!("HISTOGRAM_BINS must be at least 1");
        }
        Ok(config)
    }

    pub fn page(&self) -> Pagination {
        Pagination::new(0, self.page_limit)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {key}: '{raw}'"))
        })
        .transpose()
}
