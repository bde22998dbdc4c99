// ~/privshield/src/runner.rs
//
// Sequential executor: one setting at a time, each on a blocking worker.

use std::fmt;
use serde::Serialize;

use crate::selection::Selection;
use crate::setting::Setting;
use crate::{info, warn};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    Analyze,
    Apply,
    Revert,
}

impl RunKind {
    fn invoke(self, setting: &dyn Setting) -> bool {
        match self {
            RunKind::Analyze => setting.check_state(),
            RunKind::Apply => setting.apply(),
            RunKind::Revert => setting.revert(),
        }
    }

    /// Status label and whether it counts as a good outcome.
    pub fn label(self, outcome: bool) -> (&'static str, bool) {
        match (self, outcome) {
            // Analyze: `true` means the setting still needs action.
            (RunKind::Analyze, true) => ("Not configured", false),
            (RunKind::Analyze, false) => ("Configured", true),
            (_, true) => ("Applied", true),
            (_, false) => ("Not applied", false),
        }
    }

    pub fn finish_message(self) -> &'static str {
        match self {
            RunKind::Analyze => "Analysis complete.",
            RunKind::Apply => "Applying complete.",
            RunKind::Revert => "Reverting complete.",
        }
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunKind::Analyze => f.write_str("analyze"),
            RunKind::Apply => f.write_str("apply"),
            RunKind::Revert => f.write_str("revert"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunResult {
    pub category: String,
    pub setting: String,
    pub outcome: bool,
    pub state: &'static str,
    pub success: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Complete,
}

pub enum RunEvent<'a> {
    Started { kind: RunKind, total: usize },
    Item { index: usize, total: usize, result: &'a RunResult, progress: u32 },
    Finished { kind: RunKind, progress: u32 },
}

/// Owns progress and results of the current run.
///
/// `run` takes `&mut self`, so a second run cannot start while one is in
/// flight.
pub struct Runner {
    phase: Phase,
    progress: u32,
    results: Vec<RunResult>,
}

impl Runner {
    pub fn new() -> Self {
        Self { phase: Phase::Idle, progress: 0, results: Vec::new() }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    fn reset(&mut self) {
        self.progress = 0;
        self.results.clear();
    }

    pub async fn run(
        &mut self,
        kind: RunKind,
        selection: &Selection,
        mut on_event: impl FnMut(RunEvent<'_>),
    ) -> &[RunResult] {
        self.reset();
        self.phase = Phase::Running;

        let total = selection.len();
        info!("Run {} started with {} settings (step {})", kind, total, selection.increment());
        on_event(RunEvent::Started { kind, total });

        for (index, entry) in selection.entries().iter().enumerate() {
            let setting = entry.setting.clone();
            let id = setting.id().to_string();

            let outcome = match tokio::task::spawn_blocking(move || kind.invoke(setting.as_ref())).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("[{}] {} worker did not finish: {e}", id, kind);
                    // A dead worker is a failed item: Analyze reports "needs action".
                    kind == RunKind::Analyze
                }
            };

            let (state, success) = kind.label(outcome);
            self.results.push(RunResult {
                category: entry.category.to_string(),
                setting: id,
                outcome,
                state,
                success,
            });
            self.progress += selection.increment();

            if let Some(result) = self.results.last() {
                on_event(RunEvent::Item { index, total, result, progress: self.progress });
            }
        }

        // Absorb the rounding of the per-item step.
        self.progress = 100;
        self.phase = Phase::Complete;
        info!("Run {} complete: {} results, {} failed", kind, self.results.len(), self.failures());
        on_event(RunEvent::Finished { kind, progress: self.progress });

        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{SelectedSetting, Selection};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    /// Scripted setting that records the global order of calls.
    struct Scripted {
        id: &'static str,
        check: bool,
        apply: bool,
        revert: bool,
        log: Arc<Mutex<Vec<String>>>,
        in_flight: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn call(&self, what: &str, out: bool) -> bool {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst);
            assert_eq!(now, 0, "two settings ran at once");
            std::thread::sleep(std::time::Duration::from_millis(2));
            self.log.lock().unwrap().push(format!("{what}:{}", self.id));
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            out
        }
    }

    impl Setting for Scripted {
        fn id(&self) -> &str {
            self.id
        }
        fn info(&self) -> &str {
            ""
        }
        fn check_state(&self) -> bool {
            self.call("check", self.check)
        }
        fn apply(&self) -> bool {
            self.call("apply", self.apply)
        }
        fn revert(&self) -> bool {
            self.call("revert", self.revert)
        }
    }

    struct Panicking;

    impl Setting for Panicking {
        fn id(&self) -> &str {
            "panics"
        }
        fn info(&self) -> &str {
            ""
        }
        fn check_state(&self) -> bool {
            panic!("boom")
        }
        fn apply(&self) -> bool {
            panic!("boom")
        }
        fn revert(&self) -> bool {
            panic!("boom")
        }
    }

    fn selection(rows: &[(&'static str, bool, bool)], log: &Arc<Mutex<Vec<String>>>) -> Selection {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let entries = rows
            .iter()
            .map(|&(id, check, apply)| SelectedSetting {
                category: "Privacy",
                setting: Arc::new(Scripted {
                    id,
                    check,
                    apply,
                    revert: true,
                    log: log.clone(),
                    in_flight: in_flight.clone(),
                }),
            })
            .collect();
        Selection::new(entries)
    }

    fn states(results: &[RunResult]) -> Vec<&'static str> {
        results.iter().map(|r| r.state).collect()
    }

    #[tokio::test]
    async fn analyze_three_unprotected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sel = selection(&[("a", true, true), ("b", true, true), ("c", true, true)], &log);
        let mut runner = Runner::new();

        let results = runner.run(RunKind::Analyze, &sel, |_| {}).await;
        assert_eq!(states(results), ["Not configured"; 3]);
        assert!(results.iter().all(|r| !r.success));
        assert_eq!(runner.progress(), 100);
        assert_eq!(runner.phase(), Phase::Complete);
    }

    #[tokio::test]
    async fn apply_with_one_failure_keeps_going() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sel = selection(&[("a", true, true), ("b", true, false), ("c", true, true)], &log);
        let mut runner = Runner::new();

        let results = runner.run(RunKind::Apply, &sel, |_| {}).await;
        assert_eq!(states(results), ["Applied", "Not applied", "Applied"]);
        assert_eq!(runner.failures(), 1);
        assert_eq!(runner.progress(), 100);
        assert_eq!(*log.lock().unwrap(), ["apply:a", "apply:b", "apply:c"]);
    }

    #[tokio::test]
    async fn progress_steps_then_forced_to_100() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sel = selection(&[("a", false, true), ("b", false, true), ("c", false, true)], &log);
        let mut runner = Runner::new();
        let mut seen = Vec::new();
        let mut finished = None;

        let results = runner
            .run(RunKind::Revert, &sel, |ev| match ev {
                RunEvent::Item { progress, .. } => seen.push(progress),
                RunEvent::Finished { kind, progress } => finished = Some((kind, progress)),
                RunEvent::Started { .. } => {}
            })
            .await;
        assert_eq!(states(results), ["Applied"; 3]);

        assert_eq!(seen, [33, 66, 99]);
        assert_eq!(finished, Some((RunKind::Revert, 100)));
    }

    #[tokio::test]
    async fn empty_selection_completes_at_100() {
        let sel = Selection::new(Vec::new());
        let mut runner = Runner::new();
        assert_eq!(runner.phase(), Phase::Idle);

        let results = runner.run(RunKind::Apply, &sel, |_| {}).await;
        assert!(results.is_empty());
        assert_eq!(runner.progress(), 100);
        assert_eq!(runner.phase(), Phase::Complete);
    }

    #[tokio::test]
    async fn results_follow_selection_order_and_reset_between_runs() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let ids = ["s1", "s2", "s3", "s4", "s5", "s6", "s7"];
        let rows: Vec<(&'static str, bool, bool)> = ids.iter().map(|id| (*id, false, true)).collect();
        let sel = selection(&rows, &log);
        let mut runner = Runner::new();

        let results = runner.run(RunKind::Analyze, &sel, |_| {}).await;
        let got: Vec<&str> = results.iter().map(|r| r.setting.as_str()).collect();
        assert_eq!(got, ids);
        assert_eq!(states(results), ["Configured"; 7]);

        let again = runner.run(RunKind::Analyze, &sel, |_| {}).await;
        assert_eq!(again.len(), ids.len());
    }

    #[tokio::test]
    async fn panicking_worker_is_a_failed_item() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut entries = selection(&[("a", true, true)], &log).entries().to_vec();
        entries.insert(0, SelectedSetting { category: "Security", setting: Arc::new(Panicking) });
        let sel = Selection::new(entries);
        let mut runner = Runner::new();

        let results = runner.run(RunKind::Apply, &sel, |_| {}).await;
        assert_eq!(states(results), ["Not applied", "Applied"]);
        assert_eq!(results[0].setting, "panics");
        assert_eq!(runner.progress(), 100);
    }
}
