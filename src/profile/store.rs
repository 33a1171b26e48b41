use super::UserConfig;
use crate::error::ProfileError;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON-file backed profile store.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and validate the stored profile, `None` when onboarding never ran.
    pub fn load(&self) -> Result<Option<UserConfig>, ProfileError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let profile: UserConfig = serde_json::from_str(&raw)?;
        profile.validate()?;
        Ok(Some(profile))
    }

    pub fn load_required(&self) -> Result<UserConfig, ProfileError> {
        self.load()?.ok_or(ProfileError::Missing)
    }

    pub fn save(&self, profile: &UserConfig) -> Result<(), ProfileError> {
        profile.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, json)?;
        tracing::info!(path = %self.path.display(), "profile saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::sample_profile;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_without_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = ProfileStore::new(tmp.path().join("profile.json"));
        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
        assert!(matches!(
            store.load_required().unwrap_err(),
            ProfileError::Missing
        ));
    }

    #[test]
    fn save_then_load_returns_same_profile() {
        let tmp = TempDir::new().unwrap();
        let store = ProfileStore::new(tmp.path().join("nested").join("profile.json"));
        let profile = sample_profile();

        store.save(&profile).unwrap();

        assert!(store.exists());
        assert_eq!(store.load_required().unwrap(), profile);
    }

    #[test]
    fn save_refuses_invalid_profile() {
        let tmp = TempDir::new().unwrap();
        let store = ProfileStore::new(tmp.path().join("profile.json"));
        let mut profile = sample_profile();
        profile.brand.tone.clear();

        assert!(store.save(&profile).is_err());
        assert!(!store.exists());
    }

    #[test]
    fn corrupt_file_surfaces_json_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("profile.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ProfileStore::new(path).load().unwrap_err();
        assert!(matches!(err, ProfileError::Json(_)));
    }
}
