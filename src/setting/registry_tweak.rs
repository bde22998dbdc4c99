// ~/privshield/src/setting/registry_tweak.rs

use std::sync::Arc;

use super::Setting;
use crate::system::{Hive, RegData, Registry};
use crate::{info, warn};

/// What `revert` restores for a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fallback {
    Value(RegData),
    /// Remove the value; used for policy values Windows does not ship.
    Absent,
}

/// A single registry value with its protected and default state.
#[derive(Clone, Debug)]
pub struct RegEdit {
    pub hive: Hive,
    pub path: &'static str,
    pub name: &'static str,
    pub protected: RegData,
    pub default: Fallback,
}

impl RegEdit {
    pub fn dword(hive: Hive, path: &'static str, name: &'static str, protected: u32) -> Self {
        Self { hive, path, name, protected: RegData::Dword(protected), default: Fallback::Absent }
    }

    pub fn sz(hive: Hive, path: &'static str, name: &'static str, protected: &str) -> Self {
        Self { hive, path, name, protected: RegData::Sz(protected.to_string()), default: Fallback::Absent }
    }

    pub fn default_dword(mut self, value: u32) -> Self {
        self.default = Fallback::Value(RegData::Dword(value));
        self
    }

    pub fn default_sz(mut self, value: &str) -> Self {
        self.default = Fallback::Value(RegData::Sz(value.to_string()));
        self
    }

    fn target(&self) -> String {
        format!(r"{}\{}\{}", self.hive, self.path, self.name)
    }
}

/// Setting backed by one or more registry values (plain values, policy keys
/// and service start types alike).
pub struct RegistryTweak {
    id: &'static str,
    info: &'static str,
    edits: Vec<RegEdit>,
    registry: Arc<dyn Registry>,
}

impl RegistryTweak {
    pub fn new(id: &'static str, info: &'static str, registry: Arc<dyn Registry>, edits: Vec<RegEdit>) -> Self {
        Self { id, info, edits, registry }
    }

    fn read(&self, edit: &RegEdit) -> Option<Option<RegData>> {
        match self.registry.read(edit.hive, edit.path, edit.name) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("[{}] Failed to read {}: {e}", self.id, edit.target());
                None
            }
        }
    }

    /// Every edit currently reads back as `expected(edit)`.
    fn verify(&self, expected: impl Fn(&RegEdit) -> Option<RegData>) -> bool {
        self.edits.iter().all(|edit| match self.read(edit) {
            Some(current) => current == expected(edit),
            None => false,
        })
    }
}

impl Setting for RegistryTweak {
    fn id(&self) -> &str {
        self.id
    }

    fn info(&self) -> &str {
        self.info
    }

    fn check_state(&self) -> bool {
        let mut needs_action = false;
        for edit in &self.edits {
            match self.read(edit) {
                Some(Some(current)) if current == edit.protected => {}
                Some(_) => needs_action = true,
                None => return false,
            }
        }
        info!("[{}] check_state -> {}", self.id, needs_action);
        needs_action
    }

    fn apply(&self) -> bool {
        let mut written = true;
        for edit in &self.edits {
            if let Err(e) = self.registry.write(edit.hive, edit.path, edit.name, &edit.protected) {
                warn!("[{}] Failed to write {}: {e}", self.id, edit.target());
                written = false;
            }
        }

        let ok = written && self.verify(|edit| Some(edit.protected.clone()));
        info!("[{}] apply -> {}", self.id, ok);
        ok
    }

    fn revert(&self) -> bool {
        let mut written = true;
        for edit in &self.edits {
            let res = match &edit.default {
                Fallback::Value(data) => self.registry.write(edit.hive, edit.path, edit.name, data),
                Fallback::Absent => self.registry.delete(edit.hive, edit.path, edit.name),
            };
            if let Err(e) = res {
                warn!("[{}] Failed to restore {}: {e}", self.id, edit.target());
                written = false;
            }
        }

        let ok = written
            && self.verify(|edit| match &edit.default {
                Fallback::Value(data) => Some(data.clone()),
                Fallback::Absent => None,
            });
        info!("[{}] revert -> {}", self.id, ok);
        ok
    }
}
