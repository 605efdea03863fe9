// src/config.rs
//! Runtime configuration: API key, base URL, display offset.
//!
//! Env-first with a TOML file fallback:
//! 1) `FMP_API_KEY` / `FMP_BASE_URL` / `FMP_TZ_OFFSET`
//! 2) `$FMP_CALENDAR_CONFIG` (TOML path)
//! 3) `config/calendar.toml`
//! The API key is required; everything else has defaults (UTC display,
//! production base URL).

use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;
use std::fs;
use std::path::{Path, PathBuf};

use crate::event::CalendarError;
use crate::fetch::DEFAULT_BASE_URL;

pub const ENV_API_KEY: &str = "FMP_API_KEY";
pub const ENV_BASE_URL: &str = "FMP_BASE_URL";
pub const ENV_TZ_OFFSET: &str = "FMP_TZ_OFFSET";
pub const ENV_CONFIG_PATH: &str = "FMP_CALENDAR_CONFIG";

#[derive(Debug, Clone)]
pub struct CalendarConfig {
    pub api_key: String,
    pub base_url: String,
    /// Display offset applied to event timestamps, e.g. -05:00 for ET.
    pub tz_offset: FixedOffset,
}

#[derive(Debug, Default, serde::Deserialize)]
struct FileConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    tz_offset: Option<String>,
}

/// Parse a `"+HH:MM"` / `"-HH:MM"` offset string.
pub fn parse_offset(s: &str) -> Result<FixedOffset, CalendarError> {
    let bad = || CalendarError::InvalidOffset(s.to_string());

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1i32, &s[1..]),
        Some(b'-') => (-1i32, &s[1..]),
        _ => return Err(bad()),
    };
    let (hh, mm) = rest.split_once(':').ok_or_else(bad)?;
    let hours: i32 = hh.parse().map_err(|_| bad())?;
    let minutes: i32 = mm.parse().map_err(|_| bad())?;
    if hh.len() != 2 || mm.len() != 2 || hours > 23 || minutes > 59 {
        return Err(bad());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(bad)
}

impl CalendarConfig {
    /// Load configuration from the environment, falling back to a TOML file
    /// for anything not set. Fails when no API key is found anywhere.
    pub fn load() -> Result<Self> {
        let file = load_file_fallback()?;

        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or(file.api_key)
            .ok_or_else(|| anyhow!("missing FMP API key: set {ENV_API_KEY} or api_key in config"))?;

        let base_url = std::env::var(ENV_BASE_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let tz_offset = match std::env::var(ENV_TZ_OFFSET).ok().or(file.tz_offset) {
            Some(raw) => parse_offset(raw.trim())
                .with_context(|| format!("parsing {ENV_TZ_OFFSET}={raw:?}"))?,
            None => FixedOffset::east_opt(0).unwrap(),
        };

        Ok(Self {
            api_key,
            base_url,
            tz_offset,
        })
    }
}

fn load_file_fallback() -> Result<FileConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if !pb.exists() {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        return load_file(&pb);
    }
    let default = PathBuf::from("config/calendar.toml");
    if default.exists() {
        return load_file(&default);
    }
    Ok(FileConfig::default())
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn offset_parsing_accepts_signed_hh_mm() {
        assert_eq!(
            parse_offset("-05:00").unwrap(),
            FixedOffset::west_opt(5 * 3600).unwrap()
        );
        assert_eq!(
            parse_offset("+09:30").unwrap(),
            FixedOffset::east_opt(9 * 3600 + 1800).unwrap()
        );
        for bad in ["", "05:00", "-5:00", "-05", "-05:0", "-25:00", "+00:75", "UTC"] {
            assert!(parse_offset(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[serial_test::serial]
    #[test]
    fn env_beats_file_and_key_is_required() {
        // Isolate CWD so a real config/ in the repo cannot interfere.
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();

        env::remove_var(ENV_API_KEY);
        env::remove_var(ENV_BASE_URL);
        env::remove_var(ENV_TZ_OFFSET);
        env::remove_var(ENV_CONFIG_PATH);

        // No key anywhere -> error.
        assert!(CalendarConfig::load().is_err());

        // Key from a config file pointed at by env.
        let p = tmp.path().join("calendar.toml");
        std::fs::write(&p, "api_key = \"from-file\"\ntz_offset = \"-05:00\"\n").unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        let cfg = CalendarConfig::load().unwrap();
        assert_eq!(cfg.api_key, "from-file");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.tz_offset, FixedOffset::west_opt(5 * 3600).unwrap());

        // Env key overrides the file.
        env::set_var(ENV_API_KEY, "from-env");
        let cfg = CalendarConfig::load().unwrap();
        assert_eq!(cfg.api_key, "from-env");

        env::remove_var(ENV_API_KEY);
        env::remove_var(ENV_CONFIG_PATH);
        env::set_current_dir(&old).unwrap();
    }
}
