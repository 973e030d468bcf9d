use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use tmerge_align::{align, Alignment};
use tmerge_merge::{assemble, SelectionMap};
use tmerge_types::{DiffRecord, RecordKind};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Clean(args) => cmd_clean(args),
        Command::Diff(args) => cmd_diff(args, &cli.format),
        Command::Merge(args) => cmd_merge(args),
    }
}

fn cmd_clean(args: CleanArgs) -> anyhow::Result<()> {
    let content = read_document(&args.file)?;
    println!("{}", tmerge_normalize::normalize_document(&content));
    Ok(())
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let doc_a = read_non_empty(&args.file_a)?;
    let doc_b = read_non_empty(&args.file_b)?;

    let alignment = align(&doc_a, &doc_b, !args.raw);
    debug!(
        records = alignment.records.len(),
        additions = alignment.additions(),
        deletions = alignment.deletions(),
        modifications = alignment.modifications(),
        "alignment computed"
    );

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&alignment.records)?);
        return Ok(());
    }

    if alignment.is_identical() {
        println!("{} No differences found between the documents.", "✓".green());
        return Ok(());
    }

    let mut index = 0;
    for rec in &alignment.records {
        if rec.kind == RecordKind::Unchanged {
            if args.all {
                print_card(rec, None, args.cleaned);
            }
            continue;
        }
        print_card(rec, Some(index), args.cleaned);
        index += 1;
    }

    println!(
        "{} changes: {} added, {} deleted, {} modified",
        index.to_string().bold(),
        alignment.additions().to_string().green(),
        alignment.deletions().to_string().red(),
        alignment.modifications().to_string().yellow(),
    );
    Ok(())
}

fn print_card(rec: &DiffRecord, index: Option<usize>, cleaned: bool) {
    let header = match rec.kind {
        RecordKind::Unchanged => format!(
            "Unchanged (line {} / {})",
            line_no(rec.left_index),
            line_no(rec.right_index)
        )
        .dimmed(),
        RecordKind::Modified => format!(
            "Modified (line {} / {})",
            line_no(rec.left_index),
            line_no(rec.right_index)
        )
        .yellow(),
        RecordKind::Added => {
            format!("Added (line {} in document B)", line_no(rec.right_index)).green()
        }
        RecordKind::Deleted => {
            format!("Deleted (line {} in document A)", line_no(rec.left_index)).red()
        }
    };

    match index {
        Some(index) => println!("[{index}] {header}"),
        None => println!("    {header}"),
    }

    let left = if cleaned { &rec.left_clean } else { &rec.left };
    let right = if cleaned { &rec.right_clean } else { &rec.right };

    if let Some(left) = left {
        println!("  {} {}", "-".red(), display_line(left).red());
    }
    if let Some(right) = right {
        println!("  {} {}", "+".green(), display_line(right).green());
    }
}

fn line_no(index: Option<usize>) -> String {
    match index {
        Some(index) => (index + 1).to_string(),
        None => "-".to_string(),
    }
}

fn display_line(line: &str) -> &str {
    if line.is_empty() {
        "(empty line)"
    } else {
        line
    }
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let doc_a = read_non_empty(&args.file_a)?;
    let doc_b = read_non_empty(&args.file_b)?;

    let alignment = align(&doc_a, &doc_b, !args.raw);
    let selections = build_selections(&args, &alignment)?;

    let merged = assemble(&alignment.records, &selections)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &merged)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} Merged transcript written to {}",
                "✓".green().bold(),
                path.display().to_string().bold()
            );
        }
        None => println!("{merged}"),
    }
    Ok(())
}

fn build_selections(args: &MergeArgs, alignment: &Alignment) -> anyhow::Result<SelectionMap> {
    let mut selections = SelectionMap::new();

    if let Some(prefer) = args.prefer {
        match prefer {
            Prefer::Left => selections.select_all_left(alignment.changed()),
            Prefer::Right => selections.select_all_right(alignment.changed()),
        }
    }

    // Explicit choices override the blanket preference.
    if let Some(path) = &args.choices {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read choices file {}", path.display()))?;
        let explicit = SelectionMap::from_json(&json)
            .with_context(|| format!("failed to parse choices file {}", path.display()))?;
        for (index, choice) in explicit.iter() {
            selections.set(index, choice.clone());
        }
    }

    Ok(selections)
}

fn read_document(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_non_empty(path: &Path) -> anyhow::Result<String> {
    let content = read_document(path)?;
    if content.trim().is_empty() {
        bail!(
            "{} is empty; both documents need text before they can be aligned",
            path.display()
        );
    }
    Ok(content)
}
