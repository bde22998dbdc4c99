// ~/privshield/src/system/mod.rs
//
// OS configuration surface: registry, PowerShell and host information.

pub mod registry;
pub mod memory;
pub mod powershell;
pub mod os;

#[cfg(windows)]
mod native;

use std::sync::Arc;

pub use registry::{Hive, RegData, Registry};
pub use memory::MemoryRegistry;
pub use powershell::{PowerShell, Shell, SimulatedShell};

/// Handles every setting in the catalog shares.
#[derive(Clone)]
pub struct SystemHandles {
    pub registry: Arc<dyn Registry>,
    pub shell: Arc<dyn Shell>,
}

impl SystemHandles {
    /// Live system: Win32 registry and powershell.exe.
    pub fn native() -> Self {
        Self {
            registry: registry::native_registry(),
            shell: Arc::new(PowerShell::new()),
        }
    }

    #[cfg(test)]
    pub fn simulated() -> Self {
        Self::with_memory(Arc::new(MemoryRegistry::new()))
    }

    /// Dry run against an in-memory registry; scripts are modelled, not executed.
    pub fn with_memory(registry: Arc<MemoryRegistry>) -> Self {
        Self { registry, shell: Arc::new(SimulatedShell::new()) }
    }
}
