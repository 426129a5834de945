//! RON catalog loader

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::schema::{BuildingDef, ResourceDef};
use indexmap::IndexMap;
use serde::Deserialize;
use sovereign_core::{
    Building, BuildingCost, BuildingId, BuildingResourceProduction, BuildingResourceStorage,
    BuildingSpec, Resource, ResourceId,
};
use std::fs;
use std::path::Path;

/// Layout of a catalog file; either section may be omitted
#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    resources: Vec<ResourceDef>,
    #[serde(default)]
    buildings: Vec<BuildingDef>,
}

/// Loader for RON catalog files
///
/// Definitions keep the order they were loaded in; ids are assigned from
/// that order, starting at 1, when the loader is finished.
#[derive(Debug, Default)]
pub struct Loader {
    resources: IndexMap<String, ResourceDef>,
    buildings: IndexMap<String, BuildingDef>,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single RON file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        self.load_str(&content)?;
        log::debug!("Loaded catalog file {}", path.display());
        Ok(())
    }

    /// Load resources and buildings from a RON string
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        let file: CatalogFile = ron::from_str(content)?;
        for resource in file.resources {
            self.add_resource(resource)?;
        }
        for building in file.buildings {
            self.add_building(building)?;
        }
        Ok(())
    }

    pub fn add_resource(&mut self, resource: ResourceDef) -> Result<()> {
        if self.resources.contains_key(&resource.name) {
            return Err(Error::DuplicateDefinition(format!(
                "resource '{}'",
                resource.name
            )));
        }
        self.resources.insert(resource.name.clone(), resource);
        Ok(())
    }

    pub fn add_building(&mut self, building: BuildingDef) -> Result<()> {
        if self.buildings.contains_key(&building.name) {
            return Err(Error::DuplicateDefinition(format!(
                "building '{}'",
                building.name
            )));
        }
        self.buildings.insert(building.name.clone(), building);
        Ok(())
    }

    /// Load all RON files from a directory, in file name order
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for file_path in entries {
            if file_path.extension().map(|e| e == "ron").unwrap_or(false) {
                self.load_file(&file_path)?;
            } else if file_path.is_dir() {
                // Recursively load subdirectories
                self.load_directory(&file_path)?;
            }
        }

        Ok(())
    }

    /// Validate the definitions and resolve names to ids
    pub fn finish(self) -> Result<Catalog> {
        let resources: Vec<Resource> = self
            .resources
            .values()
            .enumerate()
            .map(|(index, def)| Resource {
                id: ResourceId::new(index as u64 + 1),
                name: def.name.clone(),
                start_amount: def.start_amount,
                start_production: def.start_production,
                start_storage: def.start_storage,
            })
            .collect();

        let mut buildings = Vec::with_capacity(self.buildings.len());
        for (index, def) in self.buildings.values().enumerate() {
            buildings.push(self.resolve_building(BuildingId::new(index as u64 + 1), def)?);
        }

        Ok(Catalog {
            resources,
            buildings,
        })
    }

    fn resource_id(&self, building: &BuildingDef, name: &str) -> Result<ResourceId> {
        self.resources
            .get_index_of(name)
            .map(|index| ResourceId::new(index as u64 + 1))
            .ok_or_else(|| Error::UnknownReference {
                building: building.name.clone(),
                resource: name.to_string(),
            })
    }

    fn resolve_building(&self, id: BuildingId, def: &BuildingDef) -> Result<BuildingSpec> {
        for name in def.referenced_resources() {
            self.resource_id(def, name)?;
        }

        let mut spec = BuildingSpec::new(Building {
            id,
            name: def.name.clone(),
        });

        for cost in &def.costs {
            check_progress(def, &cost.resource, cost.progress)?;
            spec.costs.push(BuildingCost {
                building: id,
                resource: self.resource_id(def, &cost.resource)?,
                cost: cost.cost,
                progress: cost.progress,
            });
        }
        for production in &def.productions {
            check_progress(def, &production.resource, production.progress)?;
            spec.productions.push(BuildingResourceProduction {
                building: id,
                resource: self.resource_id(def, &production.resource)?,
                base: production.base,
                progress: production.progress,
            });
        }
        for storage in &def.storages {
            check_progress(def, &storage.resource, storage.progress)?;
            // Storage must not shrink as the building levels up.
            if storage.scale * (storage.progress - 1.0) < 0.0 {
                return Err(Error::InvalidSchema(format!(
                    "storage of '{}' on '{}' decreases with level",
                    storage.resource, def.name
                )));
            }
            spec.storages.push(BuildingResourceStorage {
                building: id,
                resource: self.resource_id(def, &storage.resource)?,
                base: storage.base,
                scale: storage.scale,
                progress: storage.progress,
            });
        }

        Ok(spec)
    }
}

fn check_progress(building: &BuildingDef, resource: &str, progress: f64) -> Result<()> {
    if !progress.is_finite() || progress <= 0.0 {
        return Err(Error::InvalidSchema(format!(
            "progress of '{}' on '{}' must be positive, got {}",
            resource, building.name, progress
        )));
    }
    Ok(())
}
