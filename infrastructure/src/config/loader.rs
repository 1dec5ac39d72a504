//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment, Provider,
    providers::{Env, Format, Serialized, Toml},
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_CONFIG_FILES: [&str; 2] = ["workflow.toml", ".workflow.toml"];

/// Prefix of environment overrides (`PROJECT_WORKFLOW_DISPATCHER__BASE_URL`)
const ENV_PREFIX: &str = "PROJECT_WORKFLOW_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `PROJECT_WORKFLOW_*` environment variables
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./workflow.toml` or `./.workflow.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/project-workflow/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Path::new("."),
            config_path,
        )
    }

    /// Load with explicit locations for the global file and project root
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(project_path) = Self::project_config_in(project_dir) {
            figment = figment.merge(Toml::file(project_path));
        }

        // Explicit path is highest priority among files; a missing file is an error
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Box::new(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                ))));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Self::env_overrides());

        figment.extract().map_err(Box::new)
    }

    /// Defaults plus environment overrides, no files (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, Box<figment::Error>> {
        Self::defaults_with(Self::env_overrides())
    }

    fn defaults_with(overrides: impl Provider) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(overrides)
            .extract()
            .map_err(Box::new)
    }

    fn env_overrides() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/project-workflow/config.toml` if set,
    /// otherwise the platform config directory equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("project-workflow").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_in(Path::new("."))
    }

    fn project_config_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config sources being used (for --show-config)
    pub fn print_config_sources(config_path: Option<&Path>) {
        print!("{}", Self::describe_sources(config_path));
    }

    /// Config sources in priority order, marking the ones that exist
    pub fn describe_sources(config_path: Option<&Path>) -> String {
        let mut out = String::from("Configuration sources (in priority order):\n");

        let _ = writeln!(out, "  [ENV  ] {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            let _ = writeln!(out, "  [{:<5}] Explicit: {}", mark, path.display());
        }

        match Self::project_config_path() {
            Some(path) => {
                let _ = writeln!(out, "  [FOUND] Project: {}", path.display());
            }
            None => {
                let _ = writeln!(
                    out,
                    "  [     ] Project: ./workflow.toml or ./.workflow.toml"
                );
            }
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            let _ = writeln!(out, "  [{}] Global:  {}", mark, path.display());
        }

        out.push_str("  [     ] Default: built-in defaults\n");
        out
    }
}
