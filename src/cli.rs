// ~/privshield/src/cli.rs
// Command line front end: selection flags, runs, community scripts.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use crate::catalog::Catalog;
use crate::config::{current_config, AppConfig};
use crate::report::{self, SortColumn};
use crate::runner::{RunEvent, RunKind, Runner};
use crate::scripts::ScriptLibrary;
use crate::selection::SelectionTree;
use crate::system::{os, MemoryRegistry, SystemHandles};
use crate::paths::resolve_import_source;
use crate::{info, warn, error};

#[derive(Parser, Debug)]
#[command(author, version, about = "Windows 10 privacy settings manager")]
pub struct Cli {
    /// Run against an in-memory registry; nothing on this machine is changed.
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub simulate: bool,

    /// Write info lines to privshield.log.
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the settings tree with check marks.
    List {
        #[command(flatten)]
        select: SelectArgs,
        /// Print each setting's description below it.
        #[arg(long, action = ArgAction::SetTrue)]
        info: bool,
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
    /// Report which selected settings are already protected. Changes nothing.
    Analyze {
        #[command(flatten)]
        select: SelectArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Apply the protective value of every selected setting.
    Apply {
        #[command(flatten)]
        select: SelectArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Restore the Windows 10 defaults of every selected setting.
    Revert {
        #[command(flatten)]
        select: SelectArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Do not ask for confirmation.
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Explain the actions and states.
    States,
    /// Community scripts package.
    #[command(subcommand)]
    Scripts(ScriptsCommand),
}

#[derive(Subcommand, Debug)]
enum ScriptsCommand {
    List,
    Info { name: String },
    Show { name: String },
    Run { names: Vec<String> },
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    Readme,
}

#[derive(Args, Debug, Default)]
struct SelectArgs {
    /// Select every setting.
    #[arg(long, action = ArgAction::SetTrue)]
    all: bool,
    /// Replace the configured preselection (`Category` or `Category/Setting`).
    #[arg(long, value_name = "PATH", action = ArgAction::Append)]
    only: Vec<String>,
    #[arg(long, value_name = "PATH", action = ArgAction::Append)]
    select: Vec<String>,
    #[arg(long, value_name = "PATH", action = ArgAction::Append)]
    deselect: Vec<String>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
    #[arg(long, value_enum)]
    sort: Option<SortColumn>,
    #[arg(long, action = ArgAction::SetTrue, requires = "sort")]
    descending: bool,
}

const REVERT_PROMPT: &str = "Do you really want to revert all selected settings to Windows 10 default state?";

/// Check the tree according to config and flags.
///
/// Order: `--all` or `--only` (else the configured preselection), then
/// `--select`, then `--deselect`.
fn apply_selection(tree: &mut SelectionTree, cfg: &AppConfig, args: &SelectArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.all {
        tree.check_all();
    } else if !args.only.is_empty() {
        for path in &args.only {
            tree.set_checked(path, true)?;
        }
    } else {
        for path in &cfg.preselect {
            // A stale preselect entry should not block the run.
            if let Err(e) = tree.set_checked(path, true) {
                warn!("Ignoring preselect entry: {e}");
            }
        }
    }

    for path in &args.select {
        tree.set_checked(path, true)?;
    }
    for path in &args.deselect {
        tree.set_checked(path, false)?;
    }
    Ok(())
}

fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

struct Session {
    handles: SystemHandles,
    memory: Option<Arc<MemoryRegistry>>,
}

impl Session {
    fn new(simulate: bool) -> Self {
        if simulate {
            let memory = Arc::new(MemoryRegistry::new());
            info!("Simulation mode: using in-memory registry");
            Self { handles: SystemHandles::with_memory(memory.clone()), memory: Some(memory) }
        } else {
            Self { handles: SystemHandles::native(), memory: None }
        }
    }

    fn tree(&self, cfg: &AppConfig, args: &SelectArgs) -> Result<SelectionTree, Box<dyn std::error::Error>> {
        let catalog = Catalog::build(&self.handles);
        info!("Catalog holds {} settings", catalog.len());
        let mut tree = SelectionTree::new(os::root_label(), &catalog);
        apply_selection(&mut tree, cfg, args)?;
        Ok(tree)
    }
}

fn run_settings(
    session: &Session,
    cfg: &AppConfig,
    kind: RunKind,
    select: &SelectArgs,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = session.tree(cfg, select)?;
    let selection = tree.collect();
    if selection.is_empty() {
        println!("No settings selected.");
        return Ok(());
    }

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let mut runner = Runner::new();
    let quiet = output.json;

    let mut results = rt
        .block_on(runner.run(kind, &selection, |ev| {
            if quiet {
                return;
            }
            match ev {
                RunEvent::Started { kind, total } => println!("Running {kind} on {total} settings..."),
                RunEvent::Item { index, total, result, progress } => println!(
                    "[{:>3}%] ({}/{}) {} / {}: {}",
                    progress,
                    index + 1,
                    total,
                    result.category,
                    result.setting,
                    result.state
                ),
                RunEvent::Finished { kind, progress } => println!("[{progress:>3}%] {}", kind.finish_message()),
            }
        }))
        .to_vec();

    if let Some(column) = output.sort {
        report::sort_results(&mut results, column, output.descending);
    }

    if output.json {
        println!("{}", report::render_json(kind, runner.phase(), runner.progress(), &results)?);
    } else {
        println!();
        print!("{}", report::render_table(&results));
        println!("{}", report::summary_line(kind, &results));
    }

    if let Some(memory) = &session.memory {
        info!("Simulated registry now holds {} values", memory.len());
    }
    Ok(())
}

fn run_scripts(session: &Session, cfg: &AppConfig, cmd: ScriptsCommand) -> Result<(), Box<dyn std::error::Error>> {
    let lib = ScriptLibrary::new(cfg.scripts_dir());

    match cmd {
        ScriptsCommand::List => {
            let entries = lib.list()?;
            if entries.is_empty() {
                println!("No scripts in {}", lib.dir().display());
            }
            for entry in entries {
                println!("{}", entry.name);
            }
        }
        ScriptsCommand::Info { name } => println!("{}", lib.info(&name)?),
        ScriptsCommand::Show { name } => println!("{}", lib.read(&name)?),
        ScriptsCommand::Readme => println!("{}", lib.readme()?),
        ScriptsCommand::Run { names } => {
            if names.is_empty() {
                println!("Please select a script.");
                return Ok(());
            }
            for name in names {
                let output = lib.run(&name, session.handles.shell.as_ref())?;
                if !output.trim().is_empty() {
                    println!("{}", output.trim_end());
                }
                println!("Script \"{name}\" has been successfully executed.");
            }
        }
        ScriptsCommand::Import { files } => {
            let sources: Vec<PathBuf> = files.iter().map(|f| resolve_import_source(f)).collect();
            let mut failed = 0usize;
            for (src, outcome) in sources.iter().zip(lib.import(&sources)) {
                match outcome {
                    Ok(dst) => println!("Imported {}", dst.display()),
                    Err(e) => {
                        failed += 1;
                        error!("Import of {} failed: {e}", src.display());
                        eprintln!("{e}");
                    }
                }
            }
            if failed > 0 {
                return Err(format!("{failed} of {} files could not be imported", sources.len()).into());
            }
        }
    }
    Ok(())
}

pub fn run_cli(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    info!("CLI parsed: {:?}", cli);
    let cfg = current_config();
    let session = Session::new(cli.simulate);

    match cli.command {
        Command::List { select, info, json } => {
            let tree = session.tree(&cfg, &select)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report::tree_json(tree.root()))?);
            } else {
                print!("{}", report::render_tree(tree.root(), info));
            }
        }
        Command::Analyze { select, output } => run_settings(&session, &cfg, RunKind::Analyze, &select, &output)?,
        Command::Apply { select, output } => run_settings(&session, &cfg, RunKind::Apply, &select, &output)?,
        Command::Revert { select, output, yes } => {
            if cfg.confirm_revert && !yes && !confirm(REVERT_PROMPT)? {
                info!("Revert cancelled by user");
                println!("Cancelled.");
                return Ok(());
            }
            run_settings(&session, &cfg, RunKind::Revert, &select, &output)?;
        }
        Command::States => print!("{}", report::states_help()),
        Command::Scripts(cmd) => run_scripts(&session, &cfg, cmd)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(cfg: &AppConfig, args: &SelectArgs) -> Result<SelectionTree, Box<dyn std::error::Error>> {
        Session::new(true).tree(cfg, args)
    }

    fn ids(tree: &SelectionTree) -> Vec<String> {
        tree.collect().entries().iter().map(|e| format!("{}/{}", e.category, e.setting.id())).collect()
    }

    #[test]
    fn preselect_comes_from_config() {
        let tree = tree_with(&AppConfig::default(), &SelectArgs::default()).unwrap();
        let sel = tree.collect();
        assert_eq!(sel.len(), 20);
        assert!(sel.entries().iter().all(|e| e.category == "Privacy"));
    }

    #[test]
    fn only_replaces_preselect_and_deselect_wins() {
        let args = SelectArgs {
            only: vec!["Security".into()],
            select: vec!["Gaming".into()],
            deselect: vec!["security/disable drm in windows media player".into()],
            ..Default::default()
        };
        let tree = tree_with(&AppConfig::default(), &args).unwrap();
        assert_eq!(
            ids(&tree),
            ["Gaming/Disable Game Bar features", "Security/Disable password reveal button"]
        );
    }

    #[test]
    fn stale_preselect_is_skipped_but_bad_flags_fail() {
        let cfg = AppConfig { preselect: vec!["Gone".into(), "Updates".into()], ..Default::default() };
        let tree = tree_with(&cfg, &SelectArgs::default()).unwrap();
        assert_eq!(tree.collect().len(), 3);

        let args = SelectArgs { select: vec!["Gone".into()], ..Default::default() };
        assert!(tree_with(&cfg, &args).is_err());
    }

    #[test]
    fn all_checks_everything() {
        let args = SelectArgs { all: true, ..Default::default() };
        let tree = tree_with(&AppConfig::default(), &args).unwrap();
        assert_eq!(tree.collect().len(), 60);
    }

    #[tokio::test]
    async fn simulated_session_reports_script_settings_honestly() {
        let session = Session::new(true);
        let args = SelectArgs { only: vec!["Bloatware".into(), "Cortana".into()], ..Default::default() };
        let selection = session.tree(&AppConfig::default(), &args).unwrap().collect();
        assert_eq!(selection.len(), 5);

        let mut runner = Runner::new();
        let passes = [
            (RunKind::Analyze, "Not configured"),
            (RunKind::Revert, "Applied"),
            (RunKind::Apply, "Applied"),
            (RunKind::Analyze, "Configured"),
            (RunKind::Revert, "Applied"),
            (RunKind::Analyze, "Not configured"),
        ];
        for (kind, expected) in passes {
            let results = runner.run(kind, &selection, |_| {}).await;
            for r in results {
                assert_eq!(r.state, expected, "{kind} {} / {}", r.category, r.setting);
            }
        }
    }

    #[test]
    fn parses_nested_commands() {
        let cli = Cli::try_parse_from(["privshield", "--simulate", "revert", "--only", "Privacy", "--yes"]).unwrap();
        assert!(cli.simulate);
        assert!(matches!(cli.command, Command::Revert { yes: true, .. }));

        let cli = Cli::try_parse_from(["privshield", "scripts", "run", "a", "b", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Scripts(ScriptsCommand::Run { ref names }) if names.len() == 2));

        assert!(Cli::try_parse_from(["privshield", "analyze", "--descending"]).is_err());
    }
}
