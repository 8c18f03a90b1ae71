//! Preset loader.
//!
//! Loads surface materials and world configurations from YAML files, so
//! bounciness, friction and solver tuning can change without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! materials/
//! ├── surfaces/
//! │   ├── rubber.yaml
//! │   ├── ice.yaml
//! │   └── ...
//! └── worlds/
//!     ├── screen_space.yaml
//!     └── ...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collider::Material;
use crate::world::WorldConfig;

/// Error type for preset loading.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("preset not found: {0}")]
    NotFound(String),
}

/// A named surface material as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPreset {
    pub name: String,
    pub restitution: f64,
    pub static_friction: f64,
    pub dynamic_friction: f64,
}

impl MaterialPreset {
    pub fn material(&self) -> Material {
        Material::new(self.restitution, self.static_friction, self.dynamic_friction)
    }
}

/// Preset loader with configurable base directory.
pub struct MaterialLoader {
    base_path: PathBuf,
}

impl MaterialLoader {
    /// Create a new loader with the given base path.
    ///
    /// The base path should contain `surfaces/` and `worlds/` subdirectories.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a surface preset by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = MaterialLoader::new("materials");
    /// let ice = loader.load_surface("ice")?.material();
    /// let puck = CircleCollider::new(12.0).with_material(ice);
    /// ```
    pub fn load_surface(&self, name: &str) -> Result<MaterialPreset, MaterialError> {
        self.load("surfaces", name)
    }

    /// Load a world configuration by name.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn load_world(&self, name: &str) -> Result<WorldConfig, MaterialError> {
        self.load("worlds", name)
    }

    /// List all available surfaces.
    pub fn list_surfaces(&self) -> Result<Vec<String>, MaterialError> {
        self.list_presets("surfaces")
    }

    /// List all available world configurations.
    pub fn list_worlds(&self) -> Result<Vec<String>, MaterialError> {
        self.list_presets("worlds")
    }

    fn load<T: serde::de::DeserializeOwned>(
        &self,
        subdir: &str,
        name: &str,
    ) -> Result<T, MaterialError> {
        let path = self.base_path.join(subdir).join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(MaterialError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let value: T = serde_yaml::from_str(&contents)?;
        log::debug!("loaded {} preset {:?}", subdir, name);
        Ok(value)
    }

    fn list_presets(&self, subdir: &str) -> Result<Vec<String>, MaterialError> {
        let path = self.base_path.join(subdir);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".yaml") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
