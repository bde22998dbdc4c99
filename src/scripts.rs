// ~/privshield/src/scripts.rs
//
// Optional community package: user-managed PowerShell scripts in a folder.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::ScriptError;
use crate::system::Shell;
use crate::{info, warn};

const INFO_PREFIX: &str = "What does this template/script do?\r\n\n";
const README: &str = "readme.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEntry {
    pub name: String,
    pub path: PathBuf,
}

pub struct ScriptLibrary {
    dir: PathBuf,
}

impl ScriptLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The package is considered installed when its folder exists.
    pub fn available(&self) -> bool {
        self.dir.is_dir()
    }

    /// `.ps1` files directly inside the folder, sorted by name.
    pub fn list(&self) -> Result<Vec<ScriptEntry>, ScriptError> {
        if !self.available() {
            return Err(ScriptError::MissingDir(self.dir.clone()));
        }

        let mut entries: Vec<ScriptEntry> = walkdir::WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("ps1"))
                    .unwrap_or(false)
            })
            .filter_map(|e| {
                let name = e.path().file_stem()?.to_string_lossy().to_string();
                Some(ScriptEntry { name, path: e.path().to_path_buf() })
            })
            .collect();

        entries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        info!("Found {} scripts in {}", entries.len(), self.dir.display());
        Ok(entries)
    }

    pub fn find(&self, name: &str) -> Result<ScriptEntry, ScriptError> {
        let wanted = name.trim_end_matches(".ps1");
        self.list()?
            .into_iter()
            .find(|e| e.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ScriptError::NotFound(name.to_string()))
    }

    pub fn read(&self, name: &str) -> Result<String, ScriptError> {
        let entry = self.find(name)?;
        fs::read_to_string(&entry.path).map_err(|source| ScriptError::Io { path: entry.path, source })
    }

    /// Description assembled from `###` comment lines.
    pub fn info(&self, name: &str) -> Result<String, ScriptError> {
        Ok(describe(&self.read(name)?))
    }

    pub fn readme(&self) -> Result<String, ScriptError> {
        let path = self.dir.join(README);
        fs::read_to_string(&path).map_err(|source| ScriptError::Io { path, source })
    }

    pub fn run(&self, name: &str, shell: &dyn Shell) -> Result<String, ScriptError> {
        let content = self.read(name)?;
        info!("Running script '{}'", name);
        Ok(shell.run(&content)?)
    }

    /// Copy script files into the folder, creating it when needed.
    ///
    /// Every source is attempted; the per-file outcome is returned in order.
    pub fn import(&self, sources: &[PathBuf]) -> Vec<Result<PathBuf, ScriptError>> {
        if let Err(source) = fs::create_dir_all(&self.dir) {
            warn!("Cannot create scripts folder {}: {source}", self.dir.display());
            let dir = self.dir.clone();
            return sources
                .iter()
                .map(|_| {
                    Err(ScriptError::Io {
                        path: dir.clone(),
                        source: std::io::Error::new(source.kind(), source.to_string()),
                    })
                })
                .collect();
        }

        sources.iter().map(|src| self.import_one(src)).collect()
    }

    fn import_one(&self, src: &Path) -> Result<PathBuf, ScriptError> {
        let ext_ok = src
            .extension()
            .map(|e| e.eq_ignore_ascii_case("ps1") || e.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);
        if !ext_ok {
            return Err(ScriptError::UnsupportedType(src.to_path_buf()));
        }

        let file_name = src
            .file_name()
            .ok_or_else(|| ScriptError::UnsupportedType(src.to_path_buf()))?;
        let dst = self.dir.join(file_name);
        if dst.exists() {
            return Err(ScriptError::Io {
                path: dst,
                source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file already exists"),
            });
        }

        fs::copy(src, &dst).map_err(|source| ScriptError::Io { path: src.to_path_buf(), source })?;
        info!("Imported {} -> {}", src.display(), dst.display());
        Ok(dst)
    }
}

/// `### Title ### Detail` lines become paragraphs; everything else is ignored.
pub fn describe(script: &str) -> String {
    let body: Vec<String> = script
        .lines()
        .filter(|l| l.starts_with("###"))
        .map(|l| l[3..].replace("###", "\r\n\n"))
        .collect();
    format!("{INFO_PREFIX}{}", body.join("\r\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use tempfile::TempDir;

    struct EchoShell;

    impl Shell for EchoShell {
        fn run(&self, script: &str) -> Result<String, ShellError> {
            Ok(format!("ran {} lines", script.lines().count()))
        }
    }

    #[test]
    fn describe_uses_hash_lines_only() {
        let script = "### Block telemetry hosts ### Adds entries to the hosts file\n\
                      Write-Host hi\n\
                      ### Needs admin\n";
        assert_eq!(
            describe(script),
            "What does this template/script do?\r\n\n Block telemetry hosts \r\n\n Adds entries to the hosts file\r\n Needs admin"
        );
    }

    #[test]
    fn missing_folder_is_reported() {
        let tmp = TempDir::new().expect("create temp dir");
        let lib = ScriptLibrary::new(tmp.path().join("scripts"));
        assert!(!lib.available());
        assert!(matches!(lib.list(), Err(ScriptError::MissingDir(_))));
    }

    #[test]
    fn lists_only_ps1_sorted() {
        let tmp = TempDir::new().expect("create temp dir");
        fs::write(tmp.path().join("zeta.ps1"), "").unwrap();
        fs::write(tmp.path().join("Alpha.PS1"), "").unwrap();
        fs::write(tmp.path().join("readme.txt"), "hello").unwrap();
        fs::create_dir(tmp.path().join("nested.ps1")).unwrap();

        let lib = ScriptLibrary::new(tmp.path());
        let names: Vec<String> = lib.list().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Alpha", "zeta"]);
        assert_eq!(lib.readme().unwrap(), "hello");
        assert!(matches!(lib.find("nope"), Err(ScriptError::NotFound(_))));
    }

    #[test]
    fn runs_script_content_through_shell() {
        let tmp = TempDir::new().expect("create temp dir");
        fs::write(tmp.path().join("hosts.ps1"), "### Hosts\nWrite-Host 1\nWrite-Host 2\n").unwrap();

        let lib = ScriptLibrary::new(tmp.path());
        assert_eq!(lib.run("hosts.ps1", &EchoShell).unwrap(), "ran 3 lines");
        assert!(lib.info("HOSTS").unwrap().ends_with(" Hosts"));
    }

    #[test]
    fn import_copies_and_reports_each_file() {
        let src = TempDir::new().expect("create temp dir");
        let dst = TempDir::new().expect("create temp dir");
        let good = src.path().join("tweak.ps1");
        let bad = src.path().join("image.png");
        fs::write(&good, "Write-Host ok").unwrap();
        fs::write(&bad, "png").unwrap();

        let lib = ScriptLibrary::new(dst.path().join("scripts"));
        let out = lib.import(&[good.clone(), bad, src.path().join("missing.ps1")]);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].as_ref().unwrap(), &dst.path().join("scripts").join("tweak.ps1"));
        assert!(matches!(out[1], Err(ScriptError::UnsupportedType(_))));
        assert!(matches!(out[2], Err(ScriptError::Io { .. })));
        assert!(lib.available());

        let again = lib.import(&[good]);
        assert!(again[0].is_err(), "existing files are not overwritten");
    }
}
