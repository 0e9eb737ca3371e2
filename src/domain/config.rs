use std::{io, path::Path};

use serde::{Deserialize, Serialize};

/// Configuration for markup stripping.
///
/// The defaults reproduce the established behaviour exactly; each option
/// opts in to a deliberate deviation from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Whether images are unwrapped before links.
    ///
    /// When `false` (default): links are unwrapped first, so
    /// `![alt](img.png)` becomes `!alt`.
    ///
    /// When `true`: images are unwrapped first, so `![alt](img.png)` becomes
    /// `alt`.
    pub image_before_link: bool,

    /// Whether a failed conversion makes the command-line tool exit with a
    /// non-zero status.
    ///
    /// Failures are always reported. By default the process still exits
    /// successfully.
    pub fail_on_error: bool,
}

/// An error loading or saving a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read or written.
    #[error("Failed to access config file: {0}")]
    Io(#[from] io::Error),

    /// The file is not a valid configuration.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// The serialized versions of the configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        image_before_link: bool,

        #[serde(default)]
        fail_on_error: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                image_before_link,
                fail_on_error,
            } => Self {
                image_before_link,
                fail_on_error,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            image_before_link: config.image_before_link,
            fail_on_error: config.fail_on_error,
        }
    }
}
