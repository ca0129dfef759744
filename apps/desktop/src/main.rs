use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use problemlist_core::{Category, ProblemList};
use problemlist_desktop::commands;
use problemlist_desktop::config::Config;
use problemlist_desktop::sources::ImportOptions;
use problemlist_desktop::state::AppState;
use problemlist_desktop::watcher::SourceEvent;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "problemlist", author, about, version)]
struct Cli {
    /// Database file (overrides PROBLEMLIST_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a Markdown file and show what would be stored
    Preview { file: PathBuf },
    /// Import a Markdown file as a list, or refresh the list it feeds
    Import {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        priority: i32,
    },
    /// Import every Markdown file in a directory
    ImportDir { dir: PathBuf },
    /// List stored lists in sidebar order
    Lists,
    /// Show one list with completion marks
    Show { id: String },
    /// Toggle completion for a problem URL
    Toggle { url: String },
    /// Show progress for one list, or all lists
    Progress { id: Option<String> },
    /// Delete a list
    Remove { id: String },
    /// Watch directories and re-import changed sources until interrupted
    Watch {
        #[arg(required = true)]
        dirs: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(db) = cli.db.clone() {
        config.db_path = db;
    }
    problemlist_desktop::init_tracing(&config.log_filter);

    if let Commands::Preview { file } = &cli.command {
        let source = std::fs::read_to_string(file)
            .with_context(|| format!("reading {}", file.display()))?;
        let categories = commands::preview_content(source).await?;
        return emit(cli.json, &categories, || print_categories(&categories, &|_: &str| false));
    }

    let state = problemlist_desktop::open_state(&config)?;
    run(cli, &state).await
}

async fn run(cli: Cli, state: &AppState) -> anyhow::Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Preview { .. } => Ok(()),
        Commands::Import {
            file,
            title,
            description,
            priority,
        } => {
            let options = ImportOptions {
                title,
                description,
                priority,
            };
            let result = commands::import_file(file.to_string_lossy().to_string(), options, state).await?;
            emit(json, &result, || {
                println!(
                    "{:?}: {} [{}] ({} problems)",
                    result.outcome, result.title, result.list_id, result.problems
                )
            })
        }
        Commands::ImportDir { dir } => {
            let results = commands::import_directory(dir.to_string_lossy().to_string(), state).await?;
            emit(json, &results, || {
                for result in &results {
                    println!("{:?}: {} ({} problems)", result.outcome, result.source_path, result.problems);
                }
            })
        }
        Commands::Lists => {
            let summaries = commands::list_lists(state).await?;
            emit(json, &summaries, || {
                for s in &summaries {
                    println!(
                        "{}  [{}] {}/{}  p{}  {}",
                        s.id, s.title, s.completed, s.problem_count, s.priority, s.description
                    );
                }
            })
        }
        Commands::Show { id } => {
            let list = commands::get_list(id.clone(), state)
                .await?
                .with_context(|| format!("list not found: {id}"))?;
            let lists = state.lists()?;
            let done = |url: &str| lists.is_completed(url);
            emit(json, &list, || print_list(&list, &done))
        }
        Commands::Toggle { url } => {
            let done = commands::toggle_completion(url.clone(), state).await?;
            emit(json, &done, || {
                println!("{} {}", if done { "[x]" } else { "[ ]" }, url)
            })
        }
        Commands::Progress { id: Some(id) } => {
            let progress = commands::get_progress(id, state).await?;
            emit(json, &progress, || {
                println!("{}: {}/{} ({:.0}%)", progress.title, progress.completed, progress.total, progress.percent());
                for c in &progress.categories {
                    println!("  {}: {}/{}", c.title, c.completed, c.total);
                }
            })
        }
        Commands::Progress { id: None } => {
            let all = commands::get_all_progress(state).await?;
            emit(json, &all, || {
                for p in &all {
                    println!("{}: {}/{} ({:.0}%)", p.title, p.completed, p.total, p.percent());
                }
            })
        }
        Commands::Remove { id } => {
            commands::delete_list(id.clone(), state).await?;
            emit(json, &id, || println!("removed {id}"))
        }
        Commands::Watch { dirs } => watch(dirs, json, state).await,
    }
}

async fn watch(dirs: Vec<PathBuf>, json: bool, state: &AppState) -> anyhow::Result<()> {
    let mut events = state.subscribe();
    for dir in dirs {
        commands::start_watching(dir.to_string_lossy().to_string(), state).await?;
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            received = events.recv() => match received {
                Ok(event) => emit(json, &event, || print_event(&event))?,
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("dropped {} watcher events", skipped);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    state.watcher.lock().await.stop();
    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce()) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human();
    }
    Ok(())
}

fn print_event(event: &SourceEvent) {
    match event {
        SourceEvent::Imported { path, result } => {
            println!("{:?}: {} ({} problems)", result.outcome, path, result.problems)
        }
        SourceEvent::Rejected { path, message } => println!("rejected: {path}: {message}"),
        SourceEvent::Removed { path } => println!("removed: {path}"),
    }
}

fn print_list(list: &ProblemList, done: &dyn Fn(&str) -> bool) {
    println!("{} [{}]", list.title, list.id);
    if !list.description.is_empty() {
        println!("{}", list.description);
    }
    print_categories(&list.categories, done);
}

fn print_categories(categories: &[Category], done: &dyn Fn(&str) -> bool) {
    for category in categories {
        println!("## {}", category.title);
        for problem in &category.problems {
            let mark = if done(&problem.url) { "[x]" } else { "[ ]" };
            let mut line = format!("  {} {}  {}", mark, problem.title, problem.url);
            if let (Some(label), Some(url)) = (problem.secondary_label(), &problem.secondary_url) {
                line.push_str(&format!("  {label}: {url}"));
            }
            if let Some(note) = problem.note.as_deref().filter(|n| !n.is_empty()) {
                line.push_str(&format!("  ({note})"));
            }
            println!("{line}");
        }
    }
}
