use std::env;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::classify::dates;
use crate::pipeline::load::{PipelineOptions, DEFAULT_URL_MARKER};

/// Conventional location of the CMS export, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "data/blog_posts.csv";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// value has a default, so an empty environment is a valid configuration.
pub struct Config {
    /// Path to the article export CSV
    pub csv_path: PathBuf,
    /// Path to the SQLite override database
    pub db_path: String,
    /// URL substrings that mark an article as part of the blog section
    pub url_markers: Vec<String>,
    /// Pinned reference time (BLOGFRESH_NOW); `None` means the wall clock
    pub pinned_now: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let url_markers = match env::var("BLOGFRESH_URL_MARKERS") {
            Ok(raw) => parse_markers(&raw),
            Err(_) => vec![DEFAULT_URL_MARKER.to_string()],
        };

        Ok(Self {
            csv_path: env::var("BLOGFRESH_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CSV_PATH)),
            db_path: env::var("BLOGFRESH_DB_PATH").unwrap_or_else(|_| default_db_path()),
            url_markers,
            pinned_now: env::var("BLOGFRESH_NOW").ok().filter(|s| !s.trim().is_empty()),
        })
    }

    /// Options for the article pipeline.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            url_markers: self.url_markers.clone(),
        }
    }

    /// The instant article ages are measured against.
    ///
    /// BLOGFRESH_NOW accepts anything the date normalizer does, so reports
    /// can be reproduced for a fixed day.
    pub fn reference_now(&self) -> Result<DateTime<Utc>> {
        match &self.pinned_now {
            Some(raw) => dates::parse_date(raw).ok_or_else(|| {
                anyhow::anyhow!(
                    "BLOGFRESH_NOW is set to '{raw}', which is not a recognized date.\n\
                     Use an RFC 3339 timestamp (2025-06-01T00:00:00Z) or a date like 01/06/2025."
                )
            }),
            None => Ok(Utc::now()),
        }
    }

    /// Check that the article export exists before trying to load it.
    pub fn require_csv(&self) -> Result<()> {
        if !self.csv_path.exists() {
            anyhow::bail!(
                "Article export not found at {}\n\
                 Put the CMS export there, or set BLOGFRESH_CSV_PATH in your .env file.",
                self.csv_path.display()
            );
        }
        Ok(())
    }
}

/// Default override database: the platform data directory when known,
/// otherwise next to the working directory.
pub fn default_db_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("blogfresh").join("overrides.db"))
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| "./blogfresh.db".to_string())
}

/// Split a comma-separated marker list, dropping empty entries.
pub fn parse_markers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_now(now: Option<&str>) -> Config {
        Config {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            db_path: "./blogfresh.db".to_string(),
            url_markers: vec![DEFAULT_URL_MARKER.to_string()],
            pinned_now: now.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_markers() {
        assert_eq!(
            parse_markers(" /blog/ , ,/learn/"),
            vec!["/blog/".to_string(), "/learn/".to_string()]
        );
        assert!(parse_markers("").is_empty());
    }

    #[test]
    fn test_pinned_now_accepts_normalizer_dates() {
        let config = config_with_now(Some("01/06/2025"));
        let now = config.reference_now().unwrap();
        assert_eq!(dates::iso_date(&now), "2025-06-01");
    }

    #[test]
    fn test_invalid_pinned_now_is_an_error() {
        let config = config_with_now(Some("someday"));
        assert!(config.reference_now().is_err());
    }
}
