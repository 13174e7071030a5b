// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use gameshelf_app::{AppCommand, AppState, LoadPhase};
use gameshelf_catalog::{CatalogSource, Client};
use runtime::{CatalogFeed, ShelfRuntime};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    if let Err(error) = logging::init_tracing() {
        eprintln!("logging disabled: {error:#}");
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `gameshelf --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let feed = if options.demo {
        CatalogFeed::Demo
    } else {
        let raw = options
            .source
            .as_deref()
            .unwrap_or_else(|| config.catalog_source());
        let source = CatalogSource::parse(raw)
            .with_context(|| format!("invalid catalog source {raw:?}"))?;
        let client = Client::new(source, config.catalog_timeout()?).with_context(|| {
            format!(
                "invalid [catalog] config in {}; fix source/timeout values",
                options.config_path.display()
            )
        })?;
        tracing::info!(
            source = %client.source(),
            timeout_ms = client.timeout().as_millis() as u64,
            "catalog client ready"
        );
        CatalogFeed::Remote(client)
    };
    if options.check_only {
        return Ok(());
    }

    let address = options
        .address
        .clone()
        .unwrap_or_else(|| config.start_address().to_owned());
    tracing::info!(%address, demo = options.demo, "starting gameshelf");

    let mut runtime = ShelfRuntime::new(feed, address);
    let mut state = AppState::default();

    if options.list {
        gameshelf_tui::load_catalog(&mut state, &mut runtime, AppCommand::BeginLoad);
        if let LoadPhase::Failed { message } = &state.phase {
            bail!("catalog unavailable: {message}");
        }
        print!("{}", render_listing(&state, runtime.address()));
        return Ok(());
    }

    gameshelf_tui::run_app(&mut state, &mut runtime)?;
    println!("{}", runtime.address());
    Ok(())
}

/// Plain-text rendering of the current page for `--list`.
fn render_listing(state: &AppState, address: &str) -> String {
    let derived = state.derived();
    let mut lines = Vec::new();

    if let Some(featured) = state.catalog.featured() {
        lines.push(format!("featured: {} <{}>", featured.title, featured.url));
    }
    lines.push(format!(
        "search: {:?}  tag: {}  sort: {}",
        state.view.query,
        state.view.tag.label(),
        state.view.sort.label()
    ));

    if derived.filtered.is_empty() {
        lines.push("no games match".to_owned());
    }
    for (offset, entry) in derived.page_items().iter().enumerate() {
        let position = derived.page_offset() + offset + 1;
        let tags = entry
            .tags
            .iter()
            .map(|tag| format!("#{tag}"))
            .collect::<Vec<String>>()
            .join(" ");
        lines.push(format!("{position:>3}. {}  {tags}  {}", entry.title, entry.url));
    }

    lines.push(format!(
        "{} ({} matches)",
        derived.pagination.label(),
        derived.filtered.len()
    ));
    if let Some(status) = &state.status_line {
        lines.push(status.clone());
    }
    lines.push(format!("address: {address}"));

    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    source: Option<String>,
    address: Option<String>,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    list: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        source: None,
        address: None,
        print_config_path: false,
        print_example: false,
        demo: false,
        list: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--source" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--source requires a URL or file path"))?;
                options.source = Some(value.as_ref().to_owned());
            }
            "--address" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow!("--address requires a query string such as \"?tag=puzzle\"")
                })?;
                options.address = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--list" => {
                options.list = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.demo && options.source.is_some() {
        bail!("--demo and --source cannot be combined; pick one catalog");
    }

    Ok(options)
}

fn print_help() {
    println!("gameshelf");
    println!("  --config <path>          Use a specific config path");
    println!("  --source <url|path>      Load the catalog from this URL or file");
    println!("  --address <query>        Restore view state, e.g. \"?tag=puzzle&page=2\"");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Browse a generated demo catalog");
    println!("  --list                   Print the restored page and exit");
    println!("  --check                  Validate config and catalog source");
    println!("  --help                   Show this help");
}
