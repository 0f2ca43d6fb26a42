use super::{
    operators::OperatorConfig, similarity::SimilarityConfig, simplification::SimplificationConfig,
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::{GpError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix of environment overrides, e.g. `GPCORE_OPERATORS__SUBTREE_MAX_DEPTH=6`
pub const ENV_PREFIX: &str = "GPCORE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub operators: OperatorConfig,
    pub simplification: SimplificationConfig,
    pub similarity: SimilarityConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.operators.validate()?;
        self.simplification.validate()?;
        self.similarity.validate()?;
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![
            self.operators.to_manifest(),
            self.simplification.to_manifest(),
            self.similarity.to_manifest(),
        ]
    }

    /// Defaults, then the file at `path` if given, then `GPCORE_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&EngineConfig::default())?);

        if let Some(path) = path {
            if !path.exists() {
                return Err(GpError::Configuration(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: EngineConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<EngineConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(EngineConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config = EngineConfig::load(Some(path))?;
        log::info!("loaded configuration from {}", path.display());
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    /// Writes JSON for a `.json` path and TOML otherwise
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config = self.get();
        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        let contents = if is_json {
            serde_json::to_string_pretty(&config)?
        } else {
            toml::to_string_pretty(&config)?
        };
        std::fs::write(path, contents)?;
        log::debug!("saved configuration to {}", path.display());
        Ok(())
    }

    pub fn get(&self) -> EngineConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies `f` and keeps the result only if it validates
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut EngineConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_rejects_invalid_changes() {
        let manager = ConfigManager::new();
        let result = manager.update(|config| config.operators.uniform_swap_probability = 2.0);
        assert!(result.is_err());
        assert_eq!(manager.get(), EngineConfig::default());

        manager
            .update(|config| config.similarity.value_seed = 5)
            .unwrap();
        assert_eq!(manager.get().similarity.value_seed, 5);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let manager = ConfigManager::new();
        assert!(manager.load_from_file("/nonexistent/gpcore.toml").is_err());
    }

    #[test]
    fn test_manifests_cover_sections() {
        let sections: Vec<String> = EngineConfig::default()
            .manifests()
            .into_iter()
            .map(|manifest| manifest.section)
            .collect();
        assert_eq!(sections, vec![
            OperatorConfig::section_name(),
            SimplificationConfig::section_name(),
            SimilarityConfig::section_name(),
        ]);
    }

    #[test]
    fn test_manifest_sections_are_file_keys() {
        let serialized = serde_json::to_value(EngineConfig::default()).unwrap();
        for manifest in EngineConfig::default().manifests() {
            assert!(serialized.get(&manifest.section).is_some(), "{}", manifest.section);
        }
    }
}
