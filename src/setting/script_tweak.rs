// ~/privshield/src/setting/script_tweak.rs

use std::sync::Arc;

use super::Setting;
use crate::system::Shell;
use crate::{info, warn};

/// Setting driven by PowerShell (Appx removal and similar).
///
/// The check script prints whatever still needs handling, e.g. the names of
/// installed packages; empty output means the system is protected.
pub struct ScriptTweak {
    id: &'static str,
    info: &'static str,
    check: String,
    apply: String,
    revert: String,
    shell: Arc<dyn Shell>,
}

impl ScriptTweak {
    pub fn new(
        id: &'static str,
        info: &'static str,
        shell: Arc<dyn Shell>,
        check: impl Into<String>,
        apply: impl Into<String>,
        revert: impl Into<String>,
    ) -> Self {
        Self {
            id,
            info,
            check: check.into(),
            apply: apply.into(),
            revert: revert.into(),
            shell,
        }
    }

    /// Output of the check script, `None` if it could not run.
    fn pending(&self) -> Option<String> {
        match self.shell.query(&self.check) {
            Ok(out) => Some(out),
            Err(e) => {
                warn!("[{}] Check script failed: {e}", self.id);
                None
            }
        }
    }

    fn execute(&self, script: &str, stage: &str, protects: bool) -> bool {
        match self.shell.change(script, &self.check, protects) {
            Ok(_) => true,
            Err(e) => {
                warn!("[{}] {} script failed: {e}", self.id, stage);
                false
            }
        }
    }
}

impl Setting for ScriptTweak {
    fn id(&self) -> &str {
        self.id
    }

    fn info(&self) -> &str {
        self.info
    }

    fn check_state(&self) -> bool {
        let needs_action = self.pending().is_some_and(|out| !out.trim().is_empty());
        info!("[{}] check_state -> {}", self.id, needs_action);
        needs_action
    }

    fn apply(&self) -> bool {
        let ok = self.execute(&self.apply, "Apply", true)
            && self.pending().is_some_and(|out| out.trim().is_empty());
        info!("[{}] apply -> {}", self.id, ok);
        ok
    }

    fn revert(&self) -> bool {
        let ok = self.execute(&self.revert, "Revert", false)
            && self.pending().is_some_and(|out| !out.trim().is_empty());
        info!("[{}] revert -> {}", self.id, ok);
        ok
    }
}
