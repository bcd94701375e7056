// Command-line interface for notion-md-sync
//
// This binary uploads Markdown files to Notion as native blocks, one new page per file.
//
// The conversion itself lives in the notion-md-blocks crate. This binary reads files, loads
// configuration and the integration token, and reports progress for each file.
//
// Usage:
//  notion-md-sync <files>... [--parent <id>]        - Upload files (default)
//  notion-md-sync sync <files>... [--parent <id>]   - Same as above (explicit)
//  notion-md-sync convert <input> [--output <file>] - Print the Notion blocks as JSON, no upload
//
// Extra Parameters:
//
// Configuration keys can be overridden with --extra-<key> <value> (or --extra-<key>=<value>).
// Example:
//  notion-md-sync notes.md --extra-chunk-size 50 --extra-code-language text

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use notion_md_blocks::api::{DestinationResolver, FixedDestination, NotionClient, SearchDestination};
use notion_md_blocks::publish::{sync_file, SyncSpec};
use notion_md_blocks::wire::{blocks_to_json, fit_request_limits};
use notion_md_blocks::{convert_with_options, ConvertOptions};
use notion_md_cli::credentials;
use notion_md_config::{Loader, SyncConfig};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["sync", "convert", "help"];

/// Split `--extra-<key> <value>` (or `--extra-<key>=<value>`) pairs out of
/// the command line. Every key takes a value.
fn parse_extra_args(args: &[String]) -> Result<(Vec<String>, HashMap<String, String>), String> {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut rest = args.iter();

    while let Some(arg) = rest.next() {
        let Some(key) = arg.strip_prefix("--extra-") else {
            cleaned_args.push(arg.clone());
            continue;
        };

        let (key, value) = match key.split_once('=') {
            Some((key, value)) => (key, value.to_string()),
            None => match rest.next() {
                Some(value) => (key, value.clone()),
                None => return Err(format!("missing value for --extra-{key}")),
            },
        };
        extra_params.insert(key.to_string(), value);
    }

    Ok((cleaned_args, extra_params))
}

/// Arguments with `sync` inserted after the program name, when no
/// subcommand is named but a file is.
fn with_default_subcommand(args: &[String]) -> Option<Vec<String>> {
    let rest = args.get(1..)?;
    let names_subcommand = rest.iter().any(|arg| SUBCOMMANDS.contains(&arg.as_str()));
    let names_file = rest.iter().any(|arg| !arg.starts_with('-'));
    if names_subcommand || !names_file {
        return None;
    }

    let mut injected = vec![args[0].clone(), "sync".to_string()];
    injected.extend_from_slice(rest);
    Some(injected)
}

fn build_cli() -> Command {
    Command::new("notion-md-sync")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Upload Markdown files to Notion as native blocks")
        .long_about(
            "notion-md-sync converts Markdown files into native Notion blocks and uploads\n\
            each file as a new page.\n\n\
            Commands:\n  \
            - sync:    Create one page per file under a parent page (default)\n  \
            - convert: Print the Notion block JSON for a file without uploading\n\n\
            The integration token is read from NOTION_TOKEN.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> <value> to override configuration:\n  \
            chunk-size, code-language, search-words, base-url, notion-version, token-env\n\n\
            Examples:\n  \
            notion-md-sync notes.md --parent 1a2b3c          # Upload under a known page\n  \
            notion-md-sync Release_Notes.md                  # Find the parent by title\n  \
            notion-md-sync convert notes.md -o blocks.json   # Dry run",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a notion-md-sync.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("sync")
                .about("Upload Markdown files as new Notion pages (default command)")
                .long_about(
                    "Create one Notion page per file and fill it with the converted blocks.\n\n\
                    The page title is the file name without extension, with underscores\n\
                    replaced by spaces. Without --parent, the parent page is found by\n\
                    searching Notion for the first words of that title.\n\n\
                    Missing files are reported and skipped. The exit status is 1 if any\n\
                    file failed.",
                )
                .arg(
                    Arg::new("files")
                        .help("Markdown files to upload")
                        .required(true)
                        .num_args(1..)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("parent")
                        .long("parent")
                        .short('p')
                        .visible_alias("parent-id")
                        .help("Id of the page to create new pages under")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Print the Notion block JSON for a Markdown file")
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(2);
    });

    let matches = match parse_cli(&cleaned_args) {
        Ok(m) => m,
        Err(e) => e.exit(),
    };

    init_logging(matches.get_flag("verbose"));

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &extra_params,
    )
    .unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    });

    match matches.subcommand() {
        Some(("sync", sub_matches)) => {
            let files: Vec<&String> = sub_matches
                .get_many::<String>("files")
                .expect("files are required")
                .collect();
            let parent = sub_matches.get_one::<String>("parent").map(|s| s.as_str());
            let failures = handle_sync_command(&files, parent, &config);
            if failures > 0 {
                std::process::exit(1);
            }
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, output, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Parse as given; if that fails and the line names files but no
/// subcommand, retry as `sync`.
fn parse_cli(args: &[String]) -> Result<ArgMatches, clap::Error> {
    let cli = build_cli();
    match cli.clone().try_get_matches_from(args) {
        Ok(m) => Ok(m),
        Err(e) => match with_default_subcommand(args) {
            Some(injected) => cli.try_get_matches_from(injected),
            None => Err(e),
        },
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Handle the convert command
fn handle_convert_command(input: &str, output: Option<&str>, config: &SyncConfig) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let options = ConvertOptions::from(&config.convert);
    let blocks = fit_request_limits(convert_with_options(&source, &options));
    debug!(blocks = blocks.len(), "converted {input}");

    let json = serde_json::to_string_pretty(&blocks_to_json(&blocks)).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, json + "\n").unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{json}"),
    }
}

/// Handle the sync command. Returns the number of files that failed.
fn handle_sync_command(files: &[&String], parent: Option<&str>, config: &SyncConfig) -> usize {
    let token = credentials::token_from_env(&config.api.token_env).unwrap_or_else(|err| {
        eprintln!("ERROR: {err}");
        eprintln!();
        eprintln!("{}", err.help());
        std::process::exit(1);
    });

    println!("Syncing {} files to Notion...", files.len());
    match parent {
        Some(id) => println!("Parent page ID: {id}"),
        None => println!("Parent page: Auto-detect from content"),
    }
    println!();

    let client = NotionClient::new(token)
        .with_base_url(config.api.base_url.as_str())
        .with_version(config.api.version.as_str());

    let fixed;
    let search;
    let resolver: &dyn DestinationResolver = match parent {
        Some(id) => {
            fixed = FixedDestination::new(id);
            &fixed
        }
        None => {
            search = SearchDestination::new(&client).with_words(config.resolve.search_words);
            &search
        }
    };

    let spec = SyncSpec::new(&client, resolver)
        .with_chunk_size(config.upload.chunk_size)
        .with_options(ConvertOptions::from(&config.convert));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Failed to start async runtime: {e}");
            std::process::exit(1);
        });

    let mut failures = 0;
    for file in files {
        if !Path::new(file.as_str()).exists() {
            println!("✗ File not found: {file}");
            failures += 1;
            continue;
        }

        println!("Processing: {file}");
        match runtime.block_on(sync_file(&spec, file.as_str())) {
            Ok(report) => {
                println!("  ✓ Uploaded {} blocks", report.block_count);
                println!("  URL: {}", report.url);
            }
            Err(err) => {
                warn!("sync failed for {file}: {err}");
                println!("  ✗ ERROR: {err}");
                failures += 1;
            }
        }
        println!();
    }

    failures
}

fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &HashMap<String, String>,
) -> Result<SyncConfig, String> {
    let loader = Loader::new().with_local_file(".");
    let mut loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    for (name, raw) in extra_params {
        loader = loader
            .with_override(name, raw)
            .map_err(|err| format!("--extra-{name}: {err}"))?;
    }

    loader.build().map_err(|err| err.to_string())
}
