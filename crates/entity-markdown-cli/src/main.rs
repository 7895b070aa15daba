use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use entity_markdown_config::Config;
use entity_markdown_engine::{StyleAnnotation, parse, unparse};
use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

const DEMO_SAMPLE: &str = ">**Release 2.1** is out
>upgrade with `pkg update`
See [the notes](https://example.com/notes) for details.
>questions go to ||the usual channel||";

#[derive(Parser)]
#[command(
    name = "entity-markdown",
    version,
    about = "Convert between delimiter markdown and styled-text entities"
)]
struct Cli {
    /// Path to a config.toml (defaults to ~/.config/entity-markdown/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert delimiter markdown into tag markup
    Parse {
        /// Input file (stdin when omitted or "-")
        file: Option<PathBuf>,
    },
    /// Apply a JSON entity list to plain text, producing delimiter markdown
    Unparse {
        /// JSON array of entities with UTF-16 offsets
        #[arg(short, long, value_name = "PATH")]
        entities: PathBuf,

        /// Fail on entities that have no markdown form instead of dropping them
        #[arg(long)]
        strict: bool,

        /// Input file (stdin when omitted or "-")
        file: Option<PathBuf>,
    },
    /// Print the sample quoted message and its parsed markup
    Demo,
    /// Show the config file location and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let loaded = Config::load_from_path(&config_path);

    let mut logger = env_logger::Builder::new();
    logger.filter_level(log::LevelFilter::Info);
    if let Ok(Some(Config {
        log_filter: Some(filter),
        ..
    })) = &loaded
    {
        logger.parse_filters(filter);
    }
    logger.parse_default_env().init();

    log::debug!("Config path: {}", config_path.display());
    let config = loaded?.unwrap_or_else(|| {
        log::debug!("No config file found, using defaults");
        Config::default()
    });

    match cli.command {
        Command::Parse { file } => {
            let text = read_input(file.as_deref())?;
            write_output(&parse(&text))
        }
        Command::Unparse {
            entities,
            strict,
            file,
        } => {
            let text = read_input(file.as_deref())?;
            let entities = read_entities(&entities)?;
            check_supported(&entities, strict || config.strict_entities)?;
            let markdown = unparse(&text, &entities).context("Failed to apply entities")?;
            write_output(&markdown)
        }
        Command::Demo => {
            let sample = match &config.demo_sample {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("Failed to read demo sample {}", path.display()))?,
                None => DEMO_SAMPLE.to_string(),
            };
            write_output(&sample)?;
            println!();
            write_output(&parse(&sample))
        }
        Command::Config { init } => show_config(&config_path, &config, init),
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn read_entities(path: &Path) -> Result<Vec<StyleAnnotation>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read entities file {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to decode entities in {}", path.display()))
}

/// Reports entities `unparse` will drop. Strict mode turns them into an error.
fn check_supported(entities: &[StyleAnnotation], strict: bool) -> Result<()> {
    for (index, entity) in entities.iter().enumerate() {
        if entity.kind.is_supported() {
            continue;
        }
        if strict {
            bail!(
                "Entity #{index} ({:?}) has no markdown form",
                entity.kind
            );
        }
        log::warn!("Dropping entity #{index} ({:?}): no markdown form", entity.kind);
    }
    Ok(())
}

fn write_output(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

fn show_config(config_path: &Path, config: &Config, init: bool) -> Result<()> {
    if init {
        if config_path.exists() {
            bail!("Config file already exists at {}", config_path.display());
        }
        Config::default().save_to_path(config_path)?;
        log::info!("Wrote default config to {}", config_path.display());
    }

    println!("# {}", config_path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}
