// ~/privshield/src/report.rs
//
// Rendering of run results and the selection tree for the terminal.

use clap::ValueEnum;
use serde::Serialize;
use serde_json::json;

use crate::runner::{Phase, RunKind, RunResult};
use crate::selection::{Node, NodeKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    Category,
    Setting,
    State,
}

pub fn sort_results(results: &mut [RunResult], column: SortColumn, descending: bool) {
    results.sort_by(|a, b| {
        let ord = match column {
            SortColumn::Category => a.category.cmp(&b.category),
            SortColumn::Setting => a.setting.cmp(&b.setting),
            SortColumn::State => a.state.cmp(b.state),
        };
        if descending { ord.reverse() } else { ord }
    });
}

/// Fixed-width table; failed items are flagged with `!`.
pub fn render_table(results: &[RunResult]) -> String {
    let cat_w = results.iter().map(|r| r.category.len()).max().unwrap_or(0).max("Category".len());
    let set_w = results.iter().map(|r| r.setting.len()).max().unwrap_or(0).max("Setting".len());

    let mut out = format!("  {:<cat_w$}  {:<set_w$}  State\n", "Category", "Setting");
    out.push_str(&format!("  {}  {}  {}\n", "-".repeat(cat_w), "-".repeat(set_w), "-".repeat(14)));

    for r in results {
        let flag = if r.success { ' ' } else { '!' };
        out.push_str(&format!("{flag} {:<cat_w$}  {:<set_w$}  {}\n", r.category, r.setting, r.state));
    }
    out
}

pub fn summary_line(kind: RunKind, results: &[RunResult]) -> String {
    let good = results.iter().filter(|r| r.success).count();
    let bad = results.len() - good;
    let (good_label, _) = kind.label(kind != RunKind::Analyze);
    let (bad_label, _) = kind.label(kind == RunKind::Analyze);
    format!("{good} {}, {bad} {}.", good_label.to_lowercase(), bad_label.to_lowercase())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    kind: RunKind,
    phase: Phase,
    progress: u32,
    results: &'a [RunResult],
}

pub fn render_json(kind: RunKind, phase: Phase, progress: u32, results: &[RunResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport { kind, phase, progress, results })
}

/// Indented tree with `[x]` / `[ ]` check marks.
pub fn render_tree(root: &Node, with_info: bool) -> String {
    fn walk(node: &Node, depth: usize, with_info: bool, out: &mut String) {
        let mark = if node.checked { "[x]" } else { "[ ]" };
        out.push_str(&format!("{}{mark} {}\n", "    ".repeat(depth), node.label));
        match &node.kind {
            NodeKind::Leaf { setting, .. } if with_info => {
                out.push_str(&format!("{}      {}\n", "    ".repeat(depth), setting.info()));
            }
            NodeKind::Leaf { .. } => {}
            NodeKind::Group(children) => {
                for child in children {
                    walk(child, depth + 1, with_info, out);
                }
            }
        }
    }

    let mut out = String::new();
    walk(root, 0, with_info, &mut out);
    out
}

/// Tree as JSON, for front ends that draw their own checkboxes.
pub fn tree_json(root: &Node) -> serde_json::Value {
    match &root.kind {
        NodeKind::Leaf { setting, .. } => json!({
            "label": root.label,
            "checked": root.checked,
            "info": setting.info(),
        }),
        NodeKind::Group(children) => json!({
            "label": root.label,
            "checked": root.checked,
            "children": children.iter().map(tree_json).collect::<Vec<_>>(),
        }),
    }
}

pub fn states_help() -> &'static str {
    "Analyze:\n\
     Determines which settings are enabled and configured on your system or not. NO system changes are done yet!\n\n\
     Apply:\n\
     This will enable all selected settings.\n\n\
     Revert:\n\
     This will restore the default Windows 10 settings.\n\n\
     Configured (state):\n\
     This indicates your privacy is protected.\n\n\
     Not configured (state):\n\
     This indicates that the Windows 10 settings are in place.\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(category: &str, setting: &str, state: &'static str, success: bool) -> RunResult {
        RunResult {
            category: category.into(),
            setting: setting.into(),
            outcome: !success,
            state,
            success,
        }
    }

    #[test]
    fn sorts_by_column_both_ways() {
        let mut rs = vec![
            result("Privacy", "b", "Not configured", false),
            result("Edge", "c", "Configured", true),
            result("Gaming", "a", "Configured", true),
        ];

        sort_results(&mut rs, SortColumn::Setting, false);
        assert_eq!(rs.iter().map(|r| r.setting.as_str()).collect::<Vec<_>>(), ["a", "b", "c"]);

        sort_results(&mut rs, SortColumn::Category, true);
        assert_eq!(rs.iter().map(|r| r.category.as_str()).collect::<Vec<_>>(), ["Privacy", "Gaming", "Edge"]);

        sort_results(&mut rs, SortColumn::State, false);
        assert_eq!(rs[2].state, "Not configured");
    }

    #[test]
    fn table_flags_failures() {
        let table = render_table(&[
            result("Privacy", "Disable Telemetry", "Applied", true),
            result("Privacy", "Disable Feedback", "Not applied", false),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("  Privacy"));
        assert!(lines[3].starts_with("! Privacy"));
        assert!(lines[3].ends_with("Not applied"));
    }

    #[test]
    fn summary_counts_by_label() {
        let rs = [
            result("Privacy", "a", "Configured", true),
            result("Privacy", "b", "Not configured", false),
            result("Privacy", "c", "Not configured", false),
        ];
        assert_eq!(
            summary_line(RunKind::Analyze, &rs),
            "1 configured, 2 not configured."
        );
    }

    #[test]
    fn json_report_shape() {
        let rs = [result("Privacy", "a", "Applied", true)];
        let text = render_json(RunKind::Apply, Phase::Complete, 100, &rs).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["kind"], "apply");
        assert_eq!(v["phase"], "complete");
        assert_eq!(v["progress"], 100);
        assert_eq!(v["results"][0]["state"], "Applied");
    }
}
