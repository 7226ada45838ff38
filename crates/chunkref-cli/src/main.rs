use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chunkref_common::{ChunkRefError, ChunkRegistry, Config, label};
use chunkref_renderer::{ReferenceRenderer, retain_known_markers};
use clap::{Parser, Subcommand};
use miette::Result;

#[derive(Parser)]
#[command(version, about = "chunkref - link chunk references in rendered math documents", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite chunk references in an HTML file
    Render {
        /// HTML input, `-` for stdin
        input: PathBuf,

        /// JSON array of chunk records
        #[arg(long, env = "CHUNKREF_REGISTRY")]
        registry: PathBuf,

        /// KDL config file
        #[arg(long, env = "CHUNKREF_CONFIG")]
        config: Option<PathBuf>,

        /// Chunk currently on screen, overrides the config
        #[arg(long)]
        current_id: Option<String>,

        /// Output file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Drop `[REF:id]` markers whose id is not in the registry
    Validate {
        /// Text input, `-` for stdin
        input: PathBuf,

        /// JSON array of chunk records
        #[arg(long, env = "CHUNKREF_REGISTRY")]
        registry: PathBuf,

        /// Output file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the display label for a chunk type
    Label {
        chunk_type: String,
    },
}

fn main() -> Result<()> {
    init_miette();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            registry,
            config,
            current_id,
            output,
        } => {
            let registry = ChunkRegistry::load(&registry)?;
            let mut config = match config {
                Some(path) => Config::load(path)?,
                None => Config::default(),
            };
            if let Some(current_id) = current_id {
                config.current_id = Some(current_id.into());
            }
            let html = read_input(&input)?;
            let rendered = ReferenceRenderer::new(&registry, &config).render(&html);
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Validate {
            input,
            registry,
            output,
        } => {
            let registry = ChunkRegistry::load(&registry)?;
            let text = read_input(&input)?;
            let validated = retain_known_markers(&text, registry.by_id());
            write_output(output.as_deref(), &validated)?;
        }
        Commands::Label { chunk_type } => {
            println!("{}", label(&chunk_type));
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String, ChunkRefError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| ChunkRefError::io(path, e))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|e| ChunkRefError::io(path, e))
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), ChunkRefError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| ChunkRefError::io(parent, e))?;
            }
            std::fs::write(path, contents).map_err(|e| ChunkRefError::io(path, e))?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .map_err(|e| ChunkRefError::io("<stdout>", e))?;
        }
    }
    Ok(())
}

/// Logs go to stderr so rendered output on stdout stays clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}
