use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use filetype_registry::config::{Args, Config};
use filetype_registry::filetype::{Capabilities, FileType, FileTypeId};
use filetype_registry::prefs::PrefsHandle;
use filetype_registry::{CommandRegistry, FileTypeRegistry, PreferencesStore};

/// Everything the tool reports about one classified file.
#[derive(Debug, Serialize)]
struct Report<'a> {
    path: String,
    kind: FileTypeId,
    id: &'static str,
    label: &'static str,
    highlight_mode: &'static str,
    default_extension: &'static str,
    icon: &'static str,
    word_wrap: bool,
    capabilities: &'a Capabilities,
    commands: Vec<&'static str>,
    chunk_start_pattern: Option<String>,
    chunk_end_pattern: Option<String>,
}

fn build_report<'a>(
    path: &Path,
    file_type: &'a FileType,
    prefs: &PrefsHandle,
    commands: &CommandRegistry,
) -> Report<'a> {
    let mut supported: Vec<&'static str> = file_type
        .supported_commands(commands)
        .into_iter()
        .map(|cmd| cmd.name())
        .collect();
    supported.sort_unstable();

    Report {
        path: path.display().to_string(),
        kind: file_type.kind(),
        id: file_type.id(),
        label: file_type.label(),
        highlight_mode: file_type.language().highlight_mode(),
        default_extension: file_type.default_extension(),
        icon: file_type.icon().resource(),
        word_wrap: file_type.word_wrap(prefs),
        capabilities: file_type.capabilities(),
        commands: supported,
        chunk_start_pattern: file_type.chunk_start_pattern().map(|p| p.as_str().to_string()),
        chunk_end_pattern: file_type.chunk_end_pattern().map(|p| p.as_str().to_string()),
    }
}

fn print_report(report: &Report<'_>) {
    println!("{}", report.path);
    println!("  type:          {} ({})", report.label, report.id);
    println!("  highlighting:  {}", report.highlight_mode);
    println!("  word wrap:     {}", report.word_wrap);
    println!("  commands:      {}", report.commands.join(", "));
    if let (Some(start), Some(end)) = (&report.chunk_start_pattern, &report.chunk_end_pattern) {
        println!("  chunk start:   {}", start);
        println!("  chunk end:     {}", end);
    }
}

fn list_types(registry: &FileTypeRegistry) {
    let mut types: Vec<&FileType> = registry.types().collect();
    types.sort_by_key(|ft| ft.id());
    println!("Registered file types:");
    for ft in types {
        let exts = registry.extensions_for(ft.kind()).join(", ");
        println!("  {:<12} {} [{}]", ft.id(), ft.label(), exts);
    }
}

/// Poll the preference handle and report soft-wrap changes as the
/// preference files are edited.
fn watch_word_wrap(prefs: &PrefsHandle) {
    let mut last = prefs.soft_wrap_rmd_files();
    log::info!("Watching preference files (soft_wrap_rmd_files = {last})");
    loop {
        std::thread::sleep(Duration::from_millis(500));
        let current = prefs.soft_wrap_rmd_files();
        if current != last {
            println!("soft_wrap_rmd_files -> {current}");
            last = current;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new().parse_filters(&args.log_level).init();

    let config = Config::from_args(args)?;

    let mut prefs = PreferencesStore::new(&config);
    if let Err(e) = prefs.seed_user_file() {
        log::warn!("Could not seed the user preference file: {:#}", e);
    }
    prefs.initialize()?;
    let handle = prefs.handle();

    let types = FileTypeRegistry::with_builtin_types();
    let commands = CommandRegistry::with_builtin_commands();

    if config.paths.is_empty() && !config.watch {
        list_types(&types);
        return Ok(());
    }

    let reports: Vec<Report<'_>> = config
        .paths
        .iter()
        .filter_map(|path| {
            let file_type = types.type_for_path(path);
            if file_type.is_none() {
                log::warn!("No descriptor for {}", path.display());
            }
            file_type.map(|ft| build_report(path, ft, &handle, &commands))
        })
        .collect();

    if config.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    if config.watch {
        watch_word_wrap(&handle);
    }

    Ok(())
}
