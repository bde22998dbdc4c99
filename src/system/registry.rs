// ~/privshield/src/system/registry.rs

use std::{fmt, sync::Arc};
use serde::Serialize;
use crate::error::RegistryError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Hive {
    LocalMachine,
    CurrentUser,
}

impl fmt::Display for Hive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hive::LocalMachine => f.write_str("HKLM"),
            Hive::CurrentUser => f.write_str("HKCU"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RegData {
    Dword(u32),
    Sz(String),
}

impl fmt::Display for RegData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegData::Dword(v) => write!(f, "dword:{v}"),
            RegData::Sz(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Minimal value-level registry access.
///
/// A missing key or value reads as `Ok(None)`; deleting something that does
/// not exist succeeds.
pub trait Registry: Send + Sync {
    fn read(&self, hive: Hive, path: &str, name: &str) -> Result<Option<RegData>, RegistryError>;
    fn write(&self, hive: Hive, path: &str, name: &str, data: &RegData) -> Result<(), RegistryError>;
    fn delete(&self, hive: Hive, path: &str, name: &str) -> Result<(), RegistryError>;
}

#[cfg(windows)]
pub fn native_registry() -> Arc<dyn Registry> {
    Arc::new(super::native::WindowsRegistry)
}

#[cfg(not(windows))]
pub fn native_registry() -> Arc<dyn Registry> {
    crate::warn!("[Registry] Native registry requested on a non-Windows host");
    Arc::new(UnavailableRegistry)
}

/// Stand-in on hosts without a Windows registry; every call fails.
#[cfg(not(windows))]
pub struct UnavailableRegistry;

#[cfg(not(windows))]
impl Registry for UnavailableRegistry {
    fn read(&self, _hive: Hive, _path: &str, _name: &str) -> Result<Option<RegData>, RegistryError> {
        Err(RegistryError::Unsupported)
    }

    fn write(&self, _hive: Hive, _path: &str, _name: &str, _data: &RegData) -> Result<(), RegistryError> {
        Err(RegistryError::Unsupported)
    }

    fn delete(&self, _hive: Hive, _path: &str, _name: &str) -> Result<(), RegistryError> {
        Err(RegistryError::Unsupported)
    }
}
