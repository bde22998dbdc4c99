// ~/privshield/src/logging.rs

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Sender},
        Mutex, OnceLock,
    },
    thread::{self, JoinHandle},
};

/* =========================
   GLOBAL STATE
   ========================= */

static ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
static LOG_TX: Mutex<Option<Sender<String>>> = Mutex::new(None);
static WRITER: Mutex<Option<JoinHandle<()>>> = Mutex::new(None);

/* =========================
   PUBLIC API
   ========================= */

/// Start the writer thread. Lines queued before this call are dropped.
/// Calling it again only updates the info flag.
pub fn init(verbose: bool) {
    init_at(log_path(), verbose);
}

fn init_at(path: &Path, verbose: bool) {
    set_enabled(verbose);

    let mut tx_slot = LOG_TX.lock().unwrap_or_else(|e| e.into_inner());
    if tx_slot.is_some() {
        return;
    }

    let path = path.to_path_buf();
    let (tx, rx) = mpsc::channel::<String>();
    *tx_slot = Some(tx);

    let handle = thread::spawn(move || {
        let mut file = match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("privshield: cannot open log file {}: {e}", path.display());
                return;
            }
        };

        // Ends once every sender is gone and the queue is drained.
        while let Ok(line) = rx.recv() {
            let _ = writeln!(file, "{line}");
        }
        let _ = file.flush();
    });
    *WRITER.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
}

/// Flush queued lines and stop the writer. Must run before the process exits;
/// later log calls are dropped.
pub fn shutdown() {
    drop(LOG_TX.lock().unwrap_or_else(|e| e.into_inner()).take());

    let handle = WRITER.lock().unwrap_or_else(|e| e.into_inner()).take();
    if let Some(handle) = handle {
        let _ = handle.join();
    }
}

/// Toggle `info!` output at runtime (config reload, `--verbose`).
pub fn set_enabled(verbose: bool) {
    ENABLED.store(verbose, Ordering::Relaxed);
}

#[inline]
pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/* =========================
   INTERNAL
   ========================= */

#[inline]
pub fn enqueue(level: &str, msg: String) {
    let tx = LOG_TX.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(tx) = tx.as_ref() {
        let _ = tx.send(format!("{} [{level}] {msg}", timestamp()));
    }
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/* =========================
   MACROS
   ========================= */

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        if $crate::logging::enabled() {
            $crate::logging::enqueue(
                "INFO",
                format!($($arg)*)
            );
        }
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        $crate::logging::enqueue(
            "WARN",
            format!($($arg)*)
        );
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        $crate::logging::enqueue(
            "ERROR",
            format!($($arg)*)
        );
    }};
}

/* =========================
   PATH
   ========================= */

fn log_path() -> &'static PathBuf {
    LOG_PATH.get_or_init(|| crate::paths::app_root_dir().join("privshield.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_writes_everything_queued() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        let path = dir.path().join("privshield.log");

        init_at(&path, false);
        for n in 0..50 {
            crate::error!("failure {n}");
        }
        crate::info!("hidden while info is off");
        shutdown();

        let text = std::fs::read_to_string(&path).expect("log file written");
        let failures: Vec<&str> = text.lines().filter(|l| l.contains("[ERROR] failure")).collect();
        assert_eq!(failures.len(), 50);
        assert!(failures[49].ends_with("[ERROR] failure 49"));
        assert!(!text.contains("hidden"));

        // Writer is gone; further lines are dropped without blocking.
        crate::warn!("after shutdown");
        shutdown();
    }
}
