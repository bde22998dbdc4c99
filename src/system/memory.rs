// ~/privshield/src/system/memory.rs

use std::{collections::HashMap, sync::RwLock};

use super::registry::{Hive, RegData, Registry};
use crate::error::RegistryError;
use crate::info;

type Slot = (Hive, String, String);

/// In-memory registry used for `--simulate` runs and tests.
///
/// Paths and value names compare case-insensitively. Key prefixes passed to
/// [`MemoryRegistry::deny`] reject writes and deletes with `AccessDenied`.
#[derive(Default)]
pub struct MemoryRegistry {
    values: RwLock<HashMap<Slot, RegData>>,
    denied: RwLock<Vec<(Hive, String)>>,
}

fn slot(hive: Hive, path: &str, name: &str) -> Slot {
    (hive, path.to_lowercase(), name.to_lowercase())
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn deny(&self, hive: Hive, prefix: &str) {
        self.denied
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((hive, prefix.to_lowercase()));
    }

    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn check_access(&self, hive: Hive, path: &str) -> Result<(), RegistryError> {
        let lower = path.to_lowercase();
        let denied = self.denied.read().unwrap_or_else(|e| e.into_inner());
        if denied.iter().any(|(h, p)| *h == hive && lower.starts_with(p.as_str())) {
            return Err(RegistryError::AccessDenied(format!("{hive}\\{path}")));
        }
        Ok(())
    }
}

impl Registry for MemoryRegistry {
    fn read(&self, hive: Hive, path: &str, name: &str) -> Result<Option<RegData>, RegistryError> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(&slot(hive, path, name)).cloned())
    }

    fn write(&self, hive: Hive, path: &str, name: &str, data: &RegData) -> Result<(), RegistryError> {
        self.check_access(hive, path)?;
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(slot(hive, path, name), data.clone());
        info!("[Registry:memory] Set '{}={}' in key '{}\\{}'", name, data, hive, path);
        Ok(())
    }

    fn delete(&self, hive: Hive, path: &str, name: &str) -> Result<(), RegistryError> {
        self.check_access(hive, path)?;
        self.values
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&slot(hive, path, name));
        Ok(())
    }
}
