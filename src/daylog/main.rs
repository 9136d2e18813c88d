use chrono::NaiveDate;
use clap::Parser;
use colored::*;
use daylog::api::DaylogApi;
use daylog::config::DaylogConfig;
use daylog::error::{DaylogError, Result};
use daylog::history::ActionLog;
use daylog::model::{Mood, Record, RecordDraft};
use daylog::store::fs::{default_root, FileGateway};
use daylog::transfer::ExportFormat;
use daylog::view::FilterCriteria;
use std::fs;
use std::path::{Path, PathBuf};

mod args;
use args::{Cli, Commands};

const HISTORY_FILENAME: &str = "history.json";

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: DaylogApi<FileGateway>,
    dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add {
            title,
            content,
            date,
            mood,
            tags,
        }) => handle_add(&mut ctx, title, content, date, mood, tags),
        Some(Commands::List {
            query,
            date,
            mood,
            tags,
            page,
        }) => handle_list(&mut ctx, query, date, mood, tags, page),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Edit {
            id,
            date,
            title,
            content,
            mood,
            tags,
        }) => handle_edit(&mut ctx, &id, date, title, content, mood, tags),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, &id),
        Some(Commands::Undo) => handle_undo(&mut ctx),
        Some(Commands::Redo) => handle_redo(&mut ctx),
        Some(Commands::Import { file }) => handle_import(&mut ctx, &file),
        Some(Commands::Export { csv, output }) => handle_export(&ctx, csv, output),
        Some(Commands::Tags) => handle_tags(&ctx),
        Some(Commands::Size) => handle_size(&ctx),
        None => handle_list(&mut ctx, None, None, None, Vec::new(), 1),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => default_root().ok_or_else(|| {
            DaylogError::Io(std::io::Error::other("could not determine a data directory"))
        })?,
    };

    let config = DaylogConfig::load(&dir).unwrap_or_default();
    let mut gateway = FileGateway::new(dir.clone());
    if let Some(quota) = config.quota_bytes {
        gateway = gateway.with_quota(quota);
    }

    let mut api = DaylogApi::with_page_size(gateway, config.page_size);
    api.set_action_log(load_history(&dir));

    Ok(AppContext { api, dir })
}

// The action log lives in memory; a short-lived CLI parks it on disk so
// undo works across invocations.
fn load_history(dir: &Path) -> ActionLog {
    fs::read_to_string(dir.join(HISTORY_FILENAME))
        .ok()
        .and_then(|text| serde_json::from_str(&text).ok())
        .unwrap_or_default()
}

fn save_history(ctx: &AppContext) -> Result<()> {
    if !ctx.dir.exists() {
        fs::create_dir_all(&ctx.dir).map_err(DaylogError::Io)?;
    }
    let text = serde_json::to_string(ctx.api.action_log())?;
    fs::write(ctx.dir.join(HISTORY_FILENAME), text).map_err(DaylogError::Io)?;
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    title: String,
    content: Option<String>,
    date: Option<String>,
    mood: Option<Mood>,
    tags: Vec<String>,
) -> Result<()> {
    let draft = RecordDraft {
        id: None,
        date: date.unwrap_or_else(|| daylog::model::today().to_string()),
        title,
        content: content.unwrap_or_default(),
        mood: mood.unwrap_or_default(),
        tags,
        attachments: Vec::new(),
    };
    let record = ctx.api.submit_new(draft)?;
    save_history(ctx)?;
    println!(
        "{} {} {} ({})",
        "Added".green().bold(),
        record.date,
        record.title,
        record.id.dimmed()
    );
    Ok(())
}

fn handle_list(
    ctx: &mut AppContext,
    query: Option<String>,
    date: Option<String>,
    mood: Option<Mood>,
    tags: Vec<String>,
    page: usize,
) -> Result<()> {
    let criteria = FilterCriteria {
        query: query.unwrap_or_default(),
        date: date.map(|d| parse_date(&d)).transpose()?,
        mood,
        tags: tags.into_iter().collect(),
    };
    ctx.api.set_criteria(criteria);
    for _ in 1..page.max(1) {
        ctx.api.load_more();
    }

    let visible = ctx.api.visible();
    if visible.is_empty() {
        println!("{}", "No entries.".dimmed());
        return Ok(());
    }
    for record in &visible {
        print_line(record);
    }
    if ctx.api.has_more() {
        println!(
            "{}",
            format!("… more entries; rerun with --page {}", ctx.api.page() + 1).dimmed()
        );
    }
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    let record = ctx
        .api
        .find(id)
        .ok_or_else(|| DaylogError::RecordNotFound(id.to_string()))?;
    println!("{}  {}", record.date.to_string().cyan(), record.title.bold());
    println!("{}  {}", "id:".dimmed(), record.id);
    println!("{}  {}", "mood:".dimmed(), record.mood);
    if !record.tags.is_empty() {
        println!("{}  {}", "tags:".dimmed(), record.tags.join(", "));
    }
    if !record.attachments.is_empty() {
        println!("{}  {}", "attachments:".dimmed(), record.attachments.len());
    }
    if !record.content.is_empty() {
        println!("\n{}", record.content);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_edit(
    ctx: &mut AppContext,
    id: &str,
    date: Option<String>,
    title: Option<String>,
    content: Option<String>,
    mood: Option<Mood>,
    tags: Vec<String>,
) -> Result<()> {
    let existing = ctx
        .api
        .find(id)
        .ok_or_else(|| DaylogError::RecordNotFound(id.to_string()))?
        .clone();

    let draft = RecordDraft {
        id: Some(existing.id.clone()),
        date: date.unwrap_or_else(|| existing.date.to_string()),
        title: title.unwrap_or(existing.title),
        content: content.unwrap_or(existing.content),
        mood: mood.unwrap_or(existing.mood),
        tags: if tags.is_empty() { existing.tags } else { tags },
        attachments: existing.attachments,
    };
    let record = ctx.api.submit_update(id, draft)?;
    save_history(ctx)?;
    println!("{} {}", "Updated".green().bold(), record.title);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let removed = ctx.api.remove(id)?;
    save_history(ctx)?;
    println!(
        "{} {} {}",
        "Deleted".yellow().bold(),
        removed.date,
        removed.title
    );
    Ok(())
}

fn handle_undo(ctx: &mut AppContext) -> Result<()> {
    ctx.api.undo()?;
    save_history(ctx)?;
    println!("{}", "Undid the last change.".green());
    Ok(())
}

fn handle_redo(ctx: &mut AppContext) -> Result<()> {
    ctx.api.redo()?;
    save_history(ctx)?;
    println!("{}", "Redid the last undone change.".green());
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file).map_err(DaylogError::Io)?;
    let report = ctx.api.import_json(&text)?;
    save_history(ctx)?;
    let mut summary = format!(
        "Imported {} entries, skipped {} duplicates",
        report.added, report.skipped
    );
    if report.attachments_dropped > 0 {
        summary.push_str(&format!(
            ", dropped {} oversized attachments",
            report.attachments_dropped
        ));
    }
    println!("{} {}", "Done.".green().bold(), summary);
    Ok(())
}

fn handle_export(ctx: &AppContext, csv: bool, output: Option<PathBuf>) -> Result<()> {
    let format = if csv {
        ExportFormat::Csv
    } else {
        ExportFormat::Json
    };
    let dump = ctx.api.export(format)?;
    match output {
        Some(path) => {
            fs::write(&path, dump).map_err(DaylogError::Io)?;
            println!("{} {}", "Exported to".green().bold(), path.display());
        }
        None => println!("{dump}"),
    }
    Ok(())
}

fn handle_tags(ctx: &AppContext) -> Result<()> {
    let tags = ctx.api.tag_vocabulary();
    if tags.is_empty() {
        println!("{}", "No tags yet.".dimmed());
    } else {
        for tag in tags {
            println!("{tag}");
        }
    }
    Ok(())
}

fn handle_size(ctx: &AppContext) -> Result<()> {
    let estimate = ctx.api.estimate_size()?;
    println!("{} entries, {}", ctx.api.len(), estimate);
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    s.parse()
        .map_err(|_| DaylogError::validation("date", format!("expected YYYY-MM-DD, got {s:?}")))
}

fn print_line(record: &Record) {
    let tags = if record.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", record.tags.join(", "))
    };
    println!(
        "{}  {:<7}  {}{}  {}",
        record.date.to_string().cyan(),
        record.mood.to_string().magenta(),
        record.title.bold(),
        tags.dimmed(),
        record.id.dimmed()
    );
}
