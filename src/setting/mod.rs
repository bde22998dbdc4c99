// ~/privshield/src/setting/mod.rs

pub mod registry_tweak;
pub mod script_tweak;

pub use registry_tweak::{RegEdit, RegistryTweak};
pub use script_tweak::ScriptTweak;

/// One togglable privacy setting.
///
/// Implementations hold no mutable state of their own; every call goes
/// straight to the OS. OS failures never escape: they are logged and the call
/// reports `false`.
pub trait Setting: Send + Sync {
    /// Short name, unique within its category.
    fn id(&self) -> &str;

    /// One-line explanation shown next to the setting.
    fn info(&self) -> &str;

    /// `true` while the system is still in its unprotected (default) state.
    fn check_state(&self) -> bool;

    /// Put the system into the protected state. `true` on verified success.
    fn apply(&self) -> bool;

    /// Restore the Windows default. `true` on verified success.
    fn revert(&self) -> bool;
}
