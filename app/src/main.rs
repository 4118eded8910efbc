//! Main entry point for the portfolio shell.

mod config;
mod shell;

use access::{AccessController, AccessError, FileSessionStore, SessionStore, UrlQuery, SESSION_KEY};
use catalog::Catalog;
use clap::{Parser, Subcommand};
use gallery::Filter;
use shell::{Flow, Shell, RESTRICTED};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_PAGE_URL: &str = "http://localhost:5173/";

#[derive(Parser)]
#[command(
    name = "portfolio",
    author,
    version,
    about = "Access-gated portfolio gallery"
)]
struct Cli {
    /// Override log level (e.g. info, debug)
    #[arg(long)]
    log_level: Option<String>,
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON catalog to use instead of the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Directory holding the session file and logs
    #[arg(long)]
    session_dir: Option<PathBuf>,
    /// Page URL; its `access` query parameter is checked on startup
    #[arg(long)]
    url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show gate state and catalog counts
    Status,
    /// Enter the access code
    Unlock {
        code: String,
    },
    /// Forget the unlocked session
    Lock,
    /// Write the effective configuration to the config file
    SaveConfig,
    /// List visible gallery items
    Gallery {
        /// Category to show, or All
        #[arg(long, default_value = "All")]
        category: Filter,
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Open the lightbox on an item and step through the catalog
    Lightbox {
        id: u32,
        #[arg(long, default_value_t = 0)]
        next: usize,
        #[arg(long, default_value_t = 0)]
        prev: usize,
    },
    /// List visible videos of the motion showcase
    Showcase {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Interactive session on stdin
    Shell,
}

impl Commands {
    fn needs_unlock(&self) -> bool {
        matches!(
            self,
            Commands::Gallery { .. } | Commands::Lightbox { .. } | Commands::Showcase { .. }
        )
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = config::AppConfigOverrides {
        log_level: cli.log_level.clone(),
        catalog_path: cli.catalog.clone(),
        session_dir: cli.session_dir.clone(),
    };
    let cfg = config::AppConfig::load_from(cli.config.clone()).apply_overrides(&overrides);
    std::fs::create_dir_all(&cfg.session_dir)?;
    let file_appender = rolling::daily(&cfg.session_dir, "portfolio.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(cfg.log_level.clone()))
        .with_writer(std::io::stderr.and(file_writer))
        .init();

    let catalog = match &cfg.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    let query = UrlQuery::parse(cli.url.as_deref().unwrap_or(DEFAULT_PAGE_URL))?;
    let gate = AccessController::with_secret(
        cfg.access_code.clone(),
        FileSessionStore::new(&cfg.session_dir),
        query,
    );
    let mut shell = Shell::mount(gate, Arc::new(catalog));
    let mut stdout = std::io::stdout();

    if cli.command.needs_unlock() && !shell.is_unlocked() {
        println!("{}", RESTRICTED);
        return Ok(ExitCode::from(2));
    }

    match cli.command {
        Commands::Status => shell.render_status(&mut stdout)?,
        Commands::Unlock { code } => match shell.unlock(&code) {
            Ok(()) => {
                println!("Portfolio unlocked");
                println!("Share link: {}", shell.gate().query().url());
            }
            Err(AccessError::InvalidCode) => {
                println!("Invalid Access Code");
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Gallery { category, pages } => {
            let gallery = shell.gallery_mut();
            gallery.set_category(category);
            for _ in 1..pages {
                gallery.load_more();
            }
            shell.render_gallery(&mut stdout)?;
        }
        Commands::Lightbox { id, next, prev } => {
            let gallery = shell.gallery_mut();
            if !gallery.open_id(id) {
                println!("No media item with id {}", id);
                return Ok(ExitCode::FAILURE);
            }
            for _ in 0..next {
                gallery.next();
            }
            for _ in 0..prev {
                gallery.prev();
            }
            shell.render_lightbox(&mut stdout)?;
        }
        Commands::Showcase { pages } => {
            let showcase = shell.showcase_mut();
            for _ in 1..pages {
                showcase.load_more();
            }
            shell.render_showcase(&mut stdout)?;
        }
        Commands::Shell => {
            if !shell.is_unlocked() {
                println!("{}", RESTRICTED);
            }
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            prompt(&mut stdout)?;
            while let Some(line) = lines.next_line().await? {
                if shell.execute(&line, &mut stdout)? == Flow::Quit {
                    break;
                }
                prompt(&mut stdout)?;
            }
            shell.gate_mut().dispose();
        }
        Commands::SaveConfig => {
            let path = cli.config.clone().unwrap_or_else(config::AppConfig::default_path);
            cfg.save_to(Some(path.clone()))?;
            println!("Config written to {}", path.display());
        }
        Commands::Lock => {
            shell.gate_mut().store_mut().remove(SESSION_KEY)?;
            println!("Session cleared");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn prompt(out: &mut impl Write) -> std::io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
