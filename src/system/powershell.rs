// ~/privshield/src/system/powershell.rs

use std::{
    collections::HashSet,
    process::{Command, Stdio},
    sync::Mutex,
};
#[cfg(windows)]
use std::os::windows::process::CommandExt;

use crate::error::ShellError;
use crate::{info, warn};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x08000000;

pub trait Shell: Send + Sync {
    /// Run a script to completion and return its trimmed stdout.
    fn run(&self, script: &str) -> Result<String, ShellError>;

    /// Run a check script; non-empty output means something is left to do.
    fn query(&self, check: &str) -> Result<String, ShellError> {
        self.run(check)
    }

    /// Run a script expected to change what `check` reports: empty when
    /// `protects`, non-empty otherwise.
    fn change(&self, script: &str, _check: &str, _protects: bool) -> Result<String, ShellError> {
        self.run(script)
    }
}

/// Windows PowerShell, invoked with a hidden console window.
pub struct PowerShell {
    program: String,
}

impl PowerShell {
    pub fn new() -> Self {
        Self { program: "powershell.exe".into() }
    }
}

impl Shell for PowerShell {
    fn run(&self, script: &str) -> Result<String, ShellError> {
        let utf8_prefix = "[Console]::OutputEncoding = [System.Text.Encoding]::UTF8; ";
        let full_script = format!("{utf8_prefix}{script}");

        let mut cmd = Command::new(&self.program);
        cmd.args([
                "-NoProfile",
                "-NonInteractive",
                "-ExecutionPolicy", "Bypass",
                "-Command", &full_script,
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        let output = cmd.output()?;

        if output.status.success() {
            info!("[PowerShell] Script finished ({} bytes of output)", output.stdout.len());
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("[PowerShell] Script failed with {:?}: {}", output.status.code(), stderr);
            Err(ShellError::Failed { code: output.status.code(), stderr })
        }
    }
}

/// Output a simulated check prints while its target is still present.
const SIMULATED_PENDING: &str = "(simulated) present";

/// Shell for simulated runs. Nothing is executed; each check script is
/// modelled as pending, like a fresh Windows install, until a protecting
/// change runs for it.
#[derive(Default)]
pub struct SimulatedShell {
    protected: Mutex<HashSet<String>>,
}

impl SimulatedShell {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Shell for SimulatedShell {
    fn run(&self, script: &str) -> Result<String, ShellError> {
        info!("[PowerShell:sim] Skipping script ({} chars)", script.len());
        Ok(String::new())
    }

    fn query(&self, check: &str) -> Result<String, ShellError> {
        let protected = self.protected.lock().unwrap_or_else(|e| e.into_inner());
        if protected.contains(check) {
            Ok(String::new())
        } else {
            Ok(SIMULATED_PENDING.to_string())
        }
    }

    fn change(&self, script: &str, check: &str, protects: bool) -> Result<String, ShellError> {
        info!("[PowerShell:sim] Skipping script ({} chars), protected -> {}", script.len(), protects);
        let mut protected = self.protected.lock().unwrap_or_else(|e| e.into_inner());
        if protects {
            protected.insert(check.to_string());
        } else {
            protected.remove(check);
        }
        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_checks_follow_changes() {
        let shell = SimulatedShell::new();
        assert!(!shell.query("check-a").unwrap().is_empty());
        assert!(!shell.query("check-b").unwrap().is_empty());

        shell.change("remove-a", "check-a", true).unwrap();
        assert!(shell.query("check-a").unwrap().is_empty());
        assert!(!shell.query("check-b").unwrap().is_empty());

        shell.change("restore-a", "check-a", false).unwrap();
        assert!(!shell.query("check-a").unwrap().is_empty());
        assert_eq!(shell.run("Write-Host hi").unwrap(), "");
    }
}
