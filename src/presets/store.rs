//! Preset CRUD against a TOML file
//!
//! `PresetManager` owns the storage path and loads/saves the whole store on
//! every operation; preset files are small and this keeps the on-disk copy
//! authoritative.

use super::error::PresetError;
use super::types::{Preset, PresetStore, validate_preset_name};
use crate::spec::FilterSpecification;
use std::fs;
use std::path::{Path, PathBuf};

/// Manager for saved filter presets
pub struct PresetManager {
    path: PathBuf,
    auto_backup: bool,
}

impl PresetManager {
    /// Create a manager storing presets at `path`
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self {
            path,
            auto_backup: true,
        }
    }

    /// Create a manager with the `.backup` copy on save disabled
    #[must_use]
    pub const fn without_backup(path: PathBuf) -> Self {
        Self {
            path,
            auto_backup: false,
        }
    }

    fn load(&self) -> Result<PresetStore, PresetError> {
        if !self.path.exists() {
            return Ok(PresetStore::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let store: PresetStore = toml::from_str(&contents)?;
        Ok(store)
    }

    fn save(&self, store: &PresetStore) -> Result<(), PresetError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        if self.auto_backup && self.path.exists() {
            let backup_path = self.path.with_extension("toml.backup");
            fs::copy(&self.path, backup_path)?;
        }

        let toml = toml::to_string_pretty(store)?;
        fs::write(&self.path, toml)?;
        Ok(())
    }

    /// Create a new preset
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the name is invalid, the specification
    /// violates its invariants, a preset with the name already exists, or
    /// the store cannot be saved.
    pub fn create(
        &self,
        name: &str,
        description: String,
        spec: FilterSpecification,
    ) -> Result<Preset, PresetError> {
        validate_preset_name(name)
            .map_err(|e| PresetError::InvalidName(name.to_string(), e))?;
        spec.validate()?;

        let mut store = self.load()?;
        if store.contains(name) {
            return Err(PresetError::AlreadyExists(name.to_string()));
        }

        let preset = Preset::new(name.to_string(), description, spec);
        store.presets.push(preset.clone());
        self.save(&store)?;

        Ok(preset)
    }

    /// Get a preset by name
    ///
    /// # Errors
    ///
    /// Returns `PresetError::NotFound` if no preset has the name.
    pub fn get(&self, name: &str) -> Result<Preset, PresetError> {
        let store = self.load()?;
        store
            .get(name)
            .cloned()
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    /// Replace an existing preset's specification and description
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the preset is not found, the specification
    /// is invalid, or the store cannot be saved.
    pub fn update(
        &self,
        name: &str,
        description: String,
        spec: FilterSpecification,
    ) -> Result<(), PresetError> {
        spec.validate()?;

        let mut store = self.load()?;
        let preset = store
            .get_mut(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))?;
        preset.description = description;
        preset.spec = spec;

        self.save(&store)
    }

    /// Delete a preset by name, returning it
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the preset is not found or the store cannot
    /// be saved.
    pub fn delete(&self, name: &str) -> Result<Preset, PresetError> {
        let mut store = self.load()?;
        let preset = store
            .remove(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))?;
        self.save(&store)?;
        Ok(preset)
    }

    /// Rename a preset
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the old preset is not found, the new name is
    /// invalid or taken, or the store cannot be saved.
    pub fn rename(&self, old_name: &str, new_name: String) -> Result<(), PresetError> {
        validate_preset_name(&new_name)
            .map_err(|e| PresetError::InvalidName(new_name.clone(), e))?;

        let mut store = self.load()?;
        if store.contains(&new_name) {
            return Err(PresetError::AlreadyExists(new_name));
        }

        let mut preset = store
            .remove(old_name)
            .ok_or_else(|| PresetError::NotFound(old_name.to_string()))?;
        preset.name = new_name;
        store.presets.push(preset);

        self.save(&store)
    }

    /// List all presets
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the store cannot be loaded.
    pub fn list(&self) -> Result<Vec<Preset>, PresetError> {
        Ok(self.load()?.presets)
    }

    /// Record a use of a preset (increments count, updates `last_used`)
    ///
    /// # Errors
    ///
    /// Returns `PresetError` if the preset is not found or the store cannot
    /// be saved.
    pub fn record_use(&self, name: &str) -> Result<(), PresetError> {
        let mut store = self.load()?;
        let preset = store
            .get_mut(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))?;
        preset.record_use();
        self.save(&store)
    }

    /// The storage path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> PresetManager {
        PresetManager::without_backup(dir.path().join("presets.toml"))
    }

    fn git_spec() -> FilterSpecification {
        FilterSpecification::builder().tag("git").build().unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);

        manager
            .create("git-stuff", "Git snippets".to_string(), git_spec())
            .unwrap();

        let loaded = manager.get("git-stuff").unwrap();
        assert_eq!(loaded.description, "Git snippets");
        assert_eq!(loaded.spec, git_spec());
    }

    #[test]
    fn test_create_duplicate_fails() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        manager.create("p", String::new(), git_spec()).unwrap();

        let err = manager.create("p", String::new(), git_spec());
        assert!(matches!(err, Err(PresetError::AlreadyExists(_))));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);

        let err = manager.create("no spaces", String::new(), git_spec());
        assert!(matches!(err, Err(PresetError::InvalidName(_, _))));
    }

    #[test]
    fn test_invalid_spec_rejected() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);

        let mut spec = FilterSpecification::default();
        spec.min_items = Some(9);
        spec.max_items = Some(1);

        let err = manager.create("p", String::new(), spec);
        assert!(matches!(err, Err(PresetError::InvalidSpec(_))));
    }

    #[test]
    fn test_update_and_delete() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        manager.create("p", String::new(), git_spec()).unwrap();

        let new_spec = FilterSpecification::builder()
            .favorites_only(true)
            .build()
            .unwrap();
        manager
            .update("p", "favorites now".to_string(), new_spec.clone())
            .unwrap();
        assert_eq!(manager.get("p").unwrap().spec, new_spec);

        manager.delete("p").unwrap();
        assert!(matches!(manager.get("p"), Err(PresetError::NotFound(_))));
    }

    #[test]
    fn test_rename() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        manager.create("old", String::new(), git_spec()).unwrap();

        manager.rename("old", "new".to_string()).unwrap();
        assert!(manager.get("old").is_err());
        assert!(manager.get("new").is_ok());
    }

    #[test]
    fn test_record_use_persists() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        manager.create("p", String::new(), git_spec()).unwrap();

        manager.record_use("p").unwrap();
        manager.record_use("p").unwrap();
        assert_eq!(manager.get("p").unwrap().use_count, 2);
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let manager = manager(&dir);
        assert!(manager.list().unwrap().is_empty());
    }
}
