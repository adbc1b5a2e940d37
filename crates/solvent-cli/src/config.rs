//! Configuration loading with multi-source merging.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use solvent::SolverConfig;

const PROJECT_FILE: &str = "solvent.toml";

/// Loads [`SolverConfig`] from files and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. `SOLVENT_` environment variables, `__` separating nested keys
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./solvent.toml`
    /// 4. Global: `~/.config/solvent/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<SolverConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(SolverConfig::default()));

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                figment = figment.merge(Toml::file(&global));
            }
        }

        let project = PathBuf::from(PROJECT_FILE);
        if project.exists() {
            figment = figment.merge(Toml::file(&project));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(Env::prefixed("SOLVENT_").split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Default configuration only (for `--no-config`).
    pub fn load_defaults() -> SolverConfig {
        SolverConfig::default()
    }

    /// The global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("solvent").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, SolverConfig::default());
    }

    #[test]
    fn test_global_config_path() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("solvent/config.toml"));
        }
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("solvent-test-{}.toml", std::process::id()));
        std::fs::write(&path, "timeout_ms = 1500\n\n[limits]\nmax_depth = 12\n").unwrap();
        let config = ConfigLoader::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.timeout_ms, Some(1500));
        assert_eq!(config.limits.max_depth, 12);
        assert_eq!(
            config.limits.max_exponent,
            SolverConfig::default().limits.max_exponent
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("solvent-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "timeout_ms = \"soon\"\n").unwrap();
        let result = ConfigLoader::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
