//! The plant catalog backed by `plants.json`.
//!
//! The file is a JSON array of [`Plant`] records in insertion order. Reads
//! re-load the whole file and honor the [`ReadPolicy`]; mutations hold the
//! catalog's write lock across the read-modify-write cycle and always read
//! strictly, so a corrupt file is never overwritten.

use crate::plant::{NewPlant, Plant, PlantPatch};
use crate::storage::persistence::{load_json, read_json, write_json_atomic};
use crate::storage::{timestamp_now, ReadPolicy, StoreError};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Handle to the plant collection file. Clones share the same write lock.
#[derive(Debug, Clone)]
pub struct PlantCatalog {
    path: PathBuf,
    policy: ReadPolicy,
    write_lock: Arc<Mutex<()>>,
}

impl PlantCatalog {
    pub fn new(path: impl Into<PathBuf>, policy: ReadPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> ReadPolicy {
        self.policy
    }

    /// Load every plant. A missing file is an empty catalog.
    pub fn load(&self) -> Result<Vec<Plant>, StoreError> {
        load_json(&self.path, self.policy)
    }

    /// First plant whose id equals `id`.
    pub fn get(&self, id: &str) -> Result<Option<Plant>, StoreError> {
        Ok(self.load()?.into_iter().find(|p| p.id == id))
    }

    /// Append a plant. The id is the supplied one or `len + 1`; `date_added`
    /// is today's date. Uniqueness is not checked.
    pub fn insert(&self, new: NewPlant) -> Result<Plant, StoreError> {
        self.mutate(|plants| {
            let id = new
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| (plants.len() + 1).to_string());
            let plant = Plant {
                id,
                common_name: new.common_name,
                scientific_name: new.scientific_name,
                medicinal_uses: new.medicinal_uses,
                preparation_method: new.preparation_method,
                parts_used: new.parts_used,
                region: new.region,
                habitat: new.habitat,
                precautions: new.precautions,
                description: new.description,
                image_url: new.image_url,
                date_added: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
                ..Default::default()
            };
            plants.push(plant.clone());
            tracing::info!(id = %plant.id, name = %plant.common_name, "Plant added");
            Ok(plant)
        })
    }

    /// Apply `patch` to the first plant with `id`.
    pub fn update(&self, id: &str, patch: PlantPatch) -> Result<Plant, StoreError> {
        self.mutate(|plants| {
            let plant = plants
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| not_found(id))?;
            patch.apply(plant);
            tracing::info!(id = %id, "Plant updated");
            Ok(plant.clone())
        })
    }

    /// Remove every plant with `id`. Returns how many were removed.
    pub fn delete(&self, id: &str) -> Result<usize, StoreError> {
        self.mutate(|plants| {
            let before = plants.len();
            plants.retain(|p| p.id != id);
            let removed = before - plants.len();
            if removed == 0 {
                return Err(not_found(id));
            }
            tracing::info!(id = %id, removed, "Plant deleted");
            Ok(removed)
        })
    }

    /// Remove every plant whose id is in `ids`. Unknown ids are ignored, but
    /// removing nothing at all is `NotFound`.
    pub fn bulk_delete(&self, ids: &[String]) -> Result<usize, StoreError> {
        self.mutate(|plants| {
            let before = plants.len();
            plants.retain(|p| !ids.contains(&p.id));
            let removed = before - plants.len();
            if removed == 0 {
                return Err(StoreError::NotFound("No matching plants found".into()));
            }
            tracing::info!(requested = ids.len(), removed, "Bulk delete");
            Ok(removed)
        })
    }

    /// Record a moderation decision on the first plant with `id`.
    pub fn moderate(
        &self,
        id: &str,
        approved: bool,
        moderator: Option<String>,
    ) -> Result<Plant, StoreError> {
        self.mutate(|plants| {
            let plant = plants
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| not_found(id))?;
            plant.moderated = Some(approved);
            plant.moderated_by = Some(moderator.unwrap_or_else(|| "admin".to_string()));
            plant.moderated_at = Some(timestamp_now());
            tracing::info!(id = %id, approved, "Plant moderated");
            Ok(plant.clone())
        })
    }

    /// Replace the whole collection. Returns the new record count.
    pub fn replace_all(&self, new_plants: Vec<Plant>) -> Result<usize, StoreError> {
        self.mutate(|plants| {
            *plants = new_plants;
            tracing::info!(count = plants.len(), "Catalog replaced");
            Ok(plants.len())
        })
    }

    fn mutate<R>(
        &self,
        f: impl FnOnce(&mut Vec<Plant>) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let _guard = self.write_lock.lock();
        let mut plants: Vec<Plant> = read_json(&self.path)?.unwrap_or_default();
        let out = f(&mut plants)?;
        write_json_atomic(&self.path, &plants)?;
        Ok(out)
    }
}

fn not_found(id: &str) -> StoreError {
    StoreError::NotFound(format!("Plant '{}' not found", id))
}
