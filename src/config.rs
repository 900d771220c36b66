//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/uitree/uitree.toml`
//! 3. Local config: file given explicitly (e.g. `--config`)
//! 4. Environment variables: `UITREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::application::ApplicationError;
use crate::domain::DEFAULT_ID_RANGE;
use crate::util::path::{expand_env_vars, glob_to_regex, PathExt};

/// Separator for path lists given as a single string.
pub const PATH_LIST_SEPARATOR: char = ';';

/// Template discovery and element settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directories searched for templates
    pub template_paths: Vec<PathBuf>,
    /// Template filename glob, e.g. `*.html`
    pub pattern: String,
    /// Default page template
    pub homepage: String,
    /// Reparse templates for every request
    pub dynamic_reload: bool,
    /// Verbose log messages
    pub verbose: bool,
    /// Exclusive upper bound for generated identity suffixes
    pub id_range: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_paths: vec![PathBuf::from("."), PathBuf::from("templates")],
            pattern: "*.html".into(),
            homepage: "index.html".into(),
            dynamic_reload: false,
            verbose: false,
            id_range: DEFAULT_ID_RANGE,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub template_paths: Option<Vec<PathBuf>>,
    pub pattern: Option<String>,
    pub homepage: Option<String>,
    pub dynamic_reload: Option<bool>,
    pub verbose: Option<bool>,
    pub id_range: Option<u32>,
}

/// Get the XDG config directory for uitree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "uitree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("uitree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            template_paths: overlay
                .template_paths
                .clone()
                .unwrap_or_else(|| self.template_paths.clone()),
            pattern: overlay
                .pattern
                .clone()
                .unwrap_or_else(|| self.pattern.clone()),
            homepage: overlay
                .homepage
                .clone()
                .unwrap_or_else(|| self.homepage.clone()),
            dynamic_reload: overlay.dynamic_reload.unwrap_or(self.dynamic_reload),
            verbose: overlay.verbose.unwrap_or(self.verbose),
            id_range: overlay.id_range.unwrap_or(self.id_range),
        }
    }

    /// Expand shell variables and tilde in template paths.
    fn expand_paths(&mut self) {
        self.template_paths = self
            .template_paths
            .iter()
            .map(|p| PathBuf::from(expand_env_vars(p.to_string_lossy().as_ref())))
            .collect();
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional explicit config file; it must exist when given
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/uitree/uitree.toml`
    /// 3. Local config file
    /// 4. Environment variables: `UITREE_*` prefix
    #[instrument(level = "debug")]
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local_path) = local {
            if !local_path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local_path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        current = Self::apply_env_overrides(current, Environment::with_prefix("UITREE"))?;
        current.expand_paths();
        current.id_range = current.id_range.max(1);

        Ok(current)
    }

    /// Apply `UITREE_*` variables as explicit overrides.
    ///
    /// `UITREE_TEMPLATE_PATHS` is a `;`-separated list.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env.prefix_separator("_").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("template_paths") {
            settings.template_paths = val
                .split(PATH_LIST_SEPARATOR)
                .filter(|p| !p.trim().is_empty())
                .map(|p| PathBuf::from(p.trim()))
                .collect();
        }
        if let Ok(val) = config.get_string("pattern") {
            settings.pattern = val;
        }
        if let Ok(val) = config.get_string("homepage") {
            settings.homepage = val;
        }
        if let Ok(val) = config.get_bool("dynamic_reload") {
            settings.dynamic_reload = val;
        }
        if let Ok(val) = config.get_bool("verbose") {
            settings.verbose = val;
        }
        if let Ok(val) = config.get_int("id_range") {
            settings.id_range = u32::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("id_range out of range: {val}"),
            })?;
        }

        Ok(settings)
    }

    /// Directories searched for templates.
    pub fn template_paths(&self) -> &[PathBuf] {
        &self.template_paths
    }

    /// Append search paths in absolute form; unusable paths are skipped.
    ///
    /// Returns the number of paths added.
    #[instrument(level = "debug", skip(self, paths))]
    pub fn add_template_paths<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut added = 0;
        for path in paths {
            let path = path.as_ref();
            match path.to_absolute() {
                Ok(abs) => {
                    self.template_paths.push(abs);
                    added += 1;
                }
                Err(e) => warn!("invalid template path {:?}: {}", path, e),
            }
        }
        added
    }

    /// Files matching `pattern` directly inside each template path.
    ///
    /// Missing directories are skipped; the result is sorted and de-duplicated.
    #[instrument(level = "debug", skip(self))]
    pub fn discover_templates(&self) -> Result<Vec<PathBuf>, ApplicationError> {
        let pattern = glob_to_regex(&self.pattern).map_err(|e| ApplicationError::Config {
            message: format!("invalid template pattern {}: {}", self.pattern, e),
        })?;

        let mut found = Vec::new();
        for dir in &self.template_paths {
            if !dir.is_dir() {
                debug!("skipping missing template path: {}", dir.display());
                continue;
            }
            for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("cannot read template path {}: {}", dir.display(), e);
                        continue;
                    }
                };
                if entry.file_type().is_file() && entry.path().file_name_matches(&pattern) {
                    found.push(entry.path().to_path_buf());
                }
            }
        }
        found.sort();
        found.dedup();
        Ok(found)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# uitree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/uitree/uitree.toml
#   Local:  file passed with --config
#   Env:    UITREE_* environment variables
#           (UITREE_TEMPLATE_PATHS takes a ';'-separated list)

# Directories searched for templates
# template_paths = [".", "templates"]

# Template filename pattern
# pattern = "*.html"

# Default page template
# homepage = "index.html"

# Reparse templates for every request
# dynamic_reload = false

# Verbose log messages
# verbose = false

# Generated ids look like "<type>#<n>" with n in [0, id_range)
# id_range = 100
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_source(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("UITREE").source(Some(map))
    }

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load(None).expect("load defaults");
        assert_eq!(settings.pattern, "*.html");
        assert_eq!(settings.homepage, "index.html");
        assert!(settings.id_range >= 1);
    }

    #[test]
    fn given_env_overrides_when_applying_then_replace_values() {
        let env = env_source(&[
            ("UITREE_TEMPLATE_PATHS", "a; b ;;c"),
            ("UITREE_DYNAMIC_RELOAD", "true"),
            ("UITREE_ID_RANGE", "7"),
            ("UITREE_HOMEPAGE", "home.html"),
        ]);

        let settings = Settings::apply_env_overrides(Settings::default(), env).unwrap();

        assert_eq!(
            settings.template_paths,
            vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")]
        );
        assert!(settings.dynamic_reload);
        assert_eq!(settings.id_range, 7);
        assert_eq!(settings.homepage, "home.html");
        assert_eq!(settings.pattern, "*.html");
    }

    #[test]
    fn given_negative_id_range_when_applying_env_then_errors() {
        let env = env_source(&[("UITREE_ID_RANGE", "-3")]);
        assert!(Settings::apply_env_overrides(Settings::default(), env).is_err());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified() {
        let overlay = RawSettings {
            pattern: Some("*.tmpl".into()),
            verbose: Some(true),
            ..RawSettings::default()
        };

        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.pattern, "*.tmpl");
        assert!(merged.verbose);
        assert_eq!(merged.template_paths, Settings::default().template_paths);
    }

    #[test]
    fn given_tilde_in_template_path_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            template_paths: vec![PathBuf::from("~/templates")],
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.template_paths[0].starts_with(&home));
    }

    #[test]
    fn given_empty_and_relative_paths_when_adding_then_skips_invalid() {
        let mut settings = Settings {
            template_paths: vec![],
            ..Settings::default()
        };

        let added = settings.add_template_paths(["views", ""]);

        assert_eq!(added, 1);
        assert!(settings.template_paths()[0].is_absolute());
        assert!(settings.template_paths()[0].ends_with("views"));
    }

    #[test]
    fn given_settings_when_to_toml_then_round_trips() {
        let settings = Settings::default();
        let toml_str = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsing_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
