//! Settings for the morphtab toolchain.
//!
//! `defaults/morphtab.default.toml` is embedded into the binary so that docs and runtime
//! behavior stay in sync. A run over a corpus directory layers, lowest first:
//!
//! ```text
//! embedded defaults
//! <corpus dir>/morphtab.toml     (optional)
//! --settings <file>              (required when given)
//! command-line flags
//! ```
//!
//! [`CorpusSettings`] builds that stack; [`Settings::defaults`] skips everything but the first.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/morphtab.default.toml");

/// Name of the optional per-corpus settings file looked up in the source directory.
pub const SETTINGS_FILE_NAME: &str = "morphtab.toml";

/// Top-level settings consumed by morphtab.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub input: InputSettings,
    pub categories: CategorySettings,
    pub output: OutputSettings,
    pub run: RunSettings,
}

/// Which files are read and which lines are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    pub file_pattern: String,
    /// `None` keeps the parser's built-in markers.
    #[serde(default)]
    pub skip_markers: Option<Vec<String>>,
}

/// Location and parsing of the category file.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySettings {
    pub file_name: String,
    pub trim_values: bool,
    pub regenerate_on_malformed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub file_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunSettings {
    pub strict: bool,
}

impl Settings {
    /// The embedded defaults alone.
    pub fn defaults() -> Result<Self, ConfigError> {
        embedded().build()?.try_deserialize()
    }
}

fn embedded() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml))
}

/// Settings stack for one corpus directory.
#[derive(Debug, Clone)]
pub struct CorpusSettings {
    builder: ConfigBuilder<DefaultState>,
}

impl CorpusSettings {
    /// Defaults plus the directory's `morphtab.toml`, if it has one.
    pub fn for_dir(dir: impl AsRef<Path>) -> Self {
        let local = File::from(dir.as_ref().join(SETTINGS_FILE_NAME).as_path())
            .format(FileFormat::Toml)
            .required(false);
        Self {
            builder: embedded().add_source(local),
        }
    }

    /// Layer an explicit settings file. A missing file fails [`CorpusSettings::load`].
    pub fn settings_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Force strict mode on. `false` leaves whatever the files say.
    pub fn strict(mut self, strict: bool) -> Result<Self, ConfigError> {
        if strict {
            self.builder = self.builder.set_override("run.strict", true)?;
        }
        Ok(self)
    }

    pub fn load(self) -> Result<Settings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}
