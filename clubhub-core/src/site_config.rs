//! Site configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::countdown::DEFAULT_COUNTDOWN_REFRESH;
use crate::error::{ClubHubError, ClubHubResult};
use crate::lightbox::DEFAULT_PLACEHOLDER_IMAGE;
use crate::session::{DEFAULT_REVERT_DELAY, DEFAULT_SUBMISSION_DELAY, SessionConfig};
use crate::slideshow::{DEFAULT_AUTOPLAY_INTERVAL, SlideshowConfig};
use crate::validate::{FormContext, PhoneRule};

static DEFAULT_CATALOG_PATH: &str = "~/.config/clubhub/catalog.toml";

const DEFAULT_EVENT_REVERT_DELAY: Duration = Duration::from_secs(5);

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_PATH)
}

fn default_autoplay_interval() -> Duration {
    DEFAULT_AUTOPLAY_INTERVAL
}

fn default_submission_delay() -> Duration {
    DEFAULT_SUBMISSION_DELAY
}

fn default_success_revert_delay() -> Duration {
    DEFAULT_REVERT_DELAY
}

fn default_event_revert_delay() -> Duration {
    DEFAULT_EVENT_REVERT_DELAY
}

fn default_countdown_refresh() -> Duration {
    DEFAULT_COUNTDOWN_REFRESH
}

fn default_placeholder_image() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

/// Configuration at ~/.config/clubhub/config.toml
///
/// Durations are written the humantime way: "5s", "1500ms", "1h".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    #[serde(default = "default_autoplay_interval", with = "humantime_duration")]
    pub autoplay_interval: Duration,

    #[serde(default = "default_submission_delay", with = "humantime_duration")]
    pub submission_delay: Duration,

    #[serde(default = "default_success_revert_delay", with = "humantime_duration")]
    pub success_revert_delay: Duration,

    /// The event submission form keeps its thank-you message up longer.
    #[serde(default = "default_event_revert_delay", with = "humantime_duration")]
    pub event_revert_delay: Duration,

    #[serde(default = "default_countdown_refresh", with = "humantime_duration")]
    pub countdown_refresh: Duration,

    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,

    /// Phone rule per form context key ("contact", "join", "event", ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub phone_rules: BTreeMap<String, PhoneRule>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            catalog_path: default_catalog_path(),
            autoplay_interval: default_autoplay_interval(),
            submission_delay: default_submission_delay(),
            success_revert_delay: default_success_revert_delay(),
            event_revert_delay: default_event_revert_delay(),
            countdown_refresh: default_countdown_refresh(),
            placeholder_image: default_placeholder_image(),
            phone_rules: BTreeMap::new(),
        }
    }
}

impl SiteConfig {
    pub fn config_path() -> ClubHubResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ClubHubError::Config("Could not determine config directory".into()))?
            .join("clubhub");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, writing a commented default on first use.
    pub fn load() -> ClubHubResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ClubHubResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| ClubHubError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ClubHubError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ClubHubResult<()> {
        let contents = format!(
            "\
# clubhub configuration

# Where the event catalog lives:
# catalog_path = \"{}\"

# Slideshow auto-advance interval:
# autoplay_interval = \"5s\"

# Simulated submission delay and how long success messages stay up:
# submission_delay = \"1500ms\"
# success_revert_delay = \"3s\"
# event_revert_delay = \"5s\"

# How often countdowns refresh:
# countdown_refresh = \"1h\"

# Image shown for events without a gallery:
# placeholder_image = \"{}\"

# Phone validation per form (ten-digit or international):
# [phone_rules]
# contact = \"ten-digit\"
# event = \"international\"
",
            DEFAULT_CATALOG_PATH, DEFAULT_PLACEHOLDER_IMAGE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClubHubError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ClubHubError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Catalog path with `~` expanded.
    pub fn catalog_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.catalog_path.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn phone_rule(&self, context: FormContext) -> PhoneRule {
        self.phone_rules
            .get(context.key())
            .copied()
            .unwrap_or_else(|| context.default_phone_rule())
    }

    pub fn session_config(&self, context: FormContext) -> SessionConfig {
        let revert_delay = match context {
            FormContext::EventSubmission => self.event_revert_delay,
            _ => self.success_revert_delay,
        };
        SessionConfig {
            submission_delay: self.submission_delay,
            revert_delay,
        }
    }

    pub fn slideshow_config(&self) -> SlideshowConfig {
        SlideshowConfig {
            autoplay_interval: self.autoplay_interval,
        }
    }
}

mod humantime_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clubhub/config.toml");
        SiteConfig::create_default_config(&path).unwrap();

        let config = SiteConfig::load_from(&path).unwrap();
        assert_eq!(config.autoplay_interval, Duration::from_secs(5));
        assert_eq!(config.submission_delay, Duration::from_millis(1500));
        assert_eq!(config.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
        assert!(config.phone_rules.is_empty());
    }

    #[test]
    fn test_overrides_and_phone_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "autoplay_interval = \"8s\"\n\
             event_revert_delay = \"2s\"\n\
             [phone_rules]\n\
             contact = \"international\"\n",
        )
        .unwrap();

        let config = SiteConfig::load_from(&path).unwrap();
        assert_eq!(config.slideshow_config().autoplay_interval, Duration::from_secs(8));
        assert_eq!(config.phone_rule(FormContext::Contact), PhoneRule::International);
        assert_eq!(config.phone_rule(FormContext::Join), PhoneRule::TenDigit);
        assert_eq!(
            config.session_config(FormContext::EventSubmission).revert_delay,
            Duration::from_secs(2)
        );
        assert_eq!(
            config.session_config(FormContext::Contact).revert_delay,
            Duration::from_secs(3)
        );
    }

    #[test]
    fn test_bad_duration_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "autoplay_interval = \"soon\"\n").unwrap();

        assert!(matches!(SiteConfig::load_from(&path), Err(ClubHubError::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.countdown_refresh, Duration::from_secs(3600));
    }
}
