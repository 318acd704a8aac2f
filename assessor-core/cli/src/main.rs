mod args;
mod output;

use std::io::Read;

use anyhow::{bail, Context, Result};
use assessor_core::content::{describe_file, describe_text};
use assessor_core::observability::setup_logging;
use assessor_core::{
    assess, export, AssessorConfig, Catalog, ContentDescriptor, Estimator, SortKey, TextStats,
};
use clap::Parser;
use tracing::debug;

use args::{Cli, Commands, InputArgs};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AssessorConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(reference) = cli.reference {
        config.reference_path = reference;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    setup_logging(&config.logging).context("failed to set up logging")?;

    match cli.command {
        Commands::Models { sort, format } => {
            let catalog = load_catalog(&config, &sort)?;
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(catalog.records())?);
            } else {
                print!("{}", output::render_models(catalog.records()));
            }
        }

        Commands::Classify { path } => {
            let content = describe_file(&path, config.estimator.sniff_bytes)
                .with_context(|| format!("failed to read {}", path.display()))?;
            println!("{}: {} ({} bytes)", path.display(), content.kind, content.size_bytes);
        }

        Commands::Assess {
            input,
            all,
            model,
            sort,
            export: export_path,
            format,
        } => {
            let catalog = load_catalog(&config, &sort)?;
            if catalog.is_empty() {
                bail!("no models loaded from {}", config.reference_path.display());
            }

            let selected = if all {
                catalog.select_all()
            } else {
                catalog.select(&model)
            };
            if selected.is_empty() {
                bail!("no models selected (use --all or --model)");
            }

            let content = read_input(&input, config.estimator.sniff_bytes)?;
            let estimator = Estimator::new(config.estimator.clone())?;
            let assessment = assess(selected, &content, &estimator);

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print!("{}", output::render_assessment(&assessment));
            }

            if let Some(path) = export_path {
                export::write(&path, &assessment)
                    .with_context(|| format!("failed to export to {}", path.display()))?;
                println!("Exported assessment results to {}", path.display());
            }
        }

        Commands::Stats { text, stdin } => {
            let text = match (text, stdin) {
                (Some(text), _) => text,
                (None, true) => read_stdin()?,
                (None, false) => bail!("provide --text or --stdin"),
            };
            let stats = TextStats::of(&text);
            println!("Words: {}", stats.words);
            println!("Characters: {}", stats.characters);
        }
    }

    Ok(())
}

fn load_catalog(config: &AssessorConfig, sort: &str) -> Result<Catalog> {
    let mut catalog = Catalog::load(&config.reference_path);
    catalog.sort_by(sort.parse::<SortKey>()?);
    debug!(models = catalog.len(), "Catalog ready");
    Ok(catalog)
}

fn read_input(input: &InputArgs, sniff_bytes: usize) -> Result<ContentDescriptor> {
    if let Some(path) = &input.file {
        let content = describe_file(path, sniff_bytes)
            .with_context(|| format!("failed to read {}", path.display()))?;
        debug!(path = %path.display(), kind = %content.kind, "Input file described");
        return Ok(content);
    }
    let text = match (&input.text, input.stdin) {
        (Some(text), _) => text.clone(),
        (None, true) => read_stdin()?,
        (None, false) => bail!("provide --file, --text or --stdin"),
    };
    Ok(describe_text(&text)?)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read standard input")?;
    Ok(text)
}
