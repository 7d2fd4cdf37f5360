//! Configuration for the terminal front end.

use eyre::{Result, WrapErr};
use fuwakuru_core::backend::FileStore;
use fuwakuru_core::cache::DirCache;
use fuwakuru_core::engine::Storage;
use fuwakuru_logic::catalog::{validate_catalog, Catalog};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "fuwakuru";
const CONFIG_FILE: &str = "fuwakuru.json";

/// Front end configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the persistent store (`local.json`).
    pub data_dir: PathBuf,
    /// Session-scope store. Without one the session scope is disabled.
    pub session_file: Option<PathBuf>,
    /// Directory of cached videos and images.
    pub cache_dir: Option<PathBuf>,
    /// JSON technique list to use instead of the built-in catalog.
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            data_dir,
            session_file: None,
            cache_dir: None,
            catalog_path: None,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must load. Otherwise each of [`Config::search_paths`]
    /// is tried in turn; a file there that fails to parse is skipped with a
    /// warning.
    pub fn load(explicit: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path).wrap_err_with(|| format!("Failed to load config from {}", path.display()));
        }
        for path in Self::search_paths() {
            if !path.is_file() {
                continue;
            }
            match Self::read(&path) {
                Ok(config) => return Ok(config),
                Err(e) => log::warn!("Ignoring config {}: {:#}", path.display(), e),
            }
        }
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Where a config file is looked for when none is given, in order.
    pub fn search_paths() -> Vec<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .into_iter()
            .chain(std::iter::once(PathBuf::from(CONFIG_FILE)))
            .collect()
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).wrap_err("Failed to read config file")?;
        let config: Self = serde_json::from_str(&content).wrap_err("Failed to parse config file")?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Path of the persistent store.
    pub fn local_path(&self) -> PathBuf {
        self.data_dir.join("local.json")
    }

    /// Open every configured storage scope.
    pub fn open_storage(&self) -> Result<Storage> {
        let local = FileStore::open(self.local_path())
            .wrap_err_with(|| format!("Failed to open store at {}", self.local_path().display()))?;
        let mut storage = Storage::local_only(local);

        if let Some(path) = &self.session_file {
            match FileStore::open(path) {
                Ok(session) => storage = storage.with_session(session),
                Err(e) => log::warn!("Session scope disabled: {}: {}", path.display(), e),
            }
        }
        if let Some(dir) = &self.cache_dir {
            storage = storage.with_cache(DirCache::new(dir));
        }
        Ok(storage)
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::builtin());
        };
        let content = fs::read_to_string(path).wrap_err_with(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&content).wrap_err("Failed to parse catalog")?;
        for problem in validate_catalog(&catalog) {
            log::warn!("Catalog {}: {:?}", path.display(), problem);
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.data_dir.ends_with("fuwakuru"));
        assert!(config.session_file.is_none());
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_config_paths() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/test"),
            ..Default::default()
        };
        assert_eq!(config.local_path(), PathBuf::from("/tmp/test/local.json"));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("fuwakuru.json");
        fs::write(
            &config_path,
            r#"{"data_dir": "/custom/path", "cache_dir": "/custom/cache"}"#,
        )
        .unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/path"));
        assert_eq!(config.cache_dir, Some(PathBuf::from("/custom/cache")));
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_explicit_bad_config_is_error() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("fuwakuru.json");
        fs::write(&config_path, "data_dir = 3").unwrap();
        assert!(Config::load(Some(&config_path)).is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.json");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_search_paths_end_in_working_dir() {
        let paths = Config::search_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from(CONFIG_FILE)));
        assert!(paths.iter().all(|p| p.ends_with(CONFIG_FILE)));
    }

    #[test]
    fn test_open_storage_creates_scopes() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp.path().join("data"),
            session_file: Some(temp.path().join("session.json")),
            cache_dir: Some(temp.path().join("cache")),
            catalog_path: None,
        };
        let storage = config.open_storage().unwrap();
        assert!(storage.session.is_some());
        assert!(storage.cache.is_some());
    }

    #[test]
    fn test_catalog_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.json");
        fs::write(
            &path,
            r#"[
                {"id": "b", "title": "B", "stage": "vault", "order": 2, "video": null, "checkpoints": ["x"]},
                {"id": "a", "title": "A", "stage": "vault", "order": 1, "video": null, "checkpoints": ["x"]}
            ]"#,
        )
        .unwrap();
        let config = Config {
            catalog_path: Some(path),
            ..Default::default()
        };
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.all()[0].id, "a");
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_builtin_catalog_without_path() {
        assert_eq!(Config::default().catalog().unwrap().len(), 11);
    }
}
