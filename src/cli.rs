//! Command-line interface for scratchguard
//!
//! Small operational surface: create scratch files, wipe validated paths,
//! and a lifecycle demo showing scope-bound vs. exit-deferred removal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::safety::handle::{CleanupHandle, DeferredHandle, ImmediateHandle};
use crate::scratch::mkstemp;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create scratch files under the scratch root and print their paths
    Create {
        /// Number of files to create
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Content written into each file
        #[arg(long, default_value = "scratchguard demo")]
        content: String,
    },
    /// Validate and remove the given scratch files
    Wipe {
        /// Paths to remove; each must be a regular file under the scratch root
        paths: Vec<PathBuf>,
    },
    /// Demonstrate the cleanup lifecycle
    Demo {
        /// Defer removal to process exit instead of scope exit
        #[arg(long)]
        delay: bool,
    },
}

pub fn run() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    settings.apply().context("applying settings")?;

    match cli.command {
        Commands::Create { count, content } => create(count, content.as_bytes()),
        Commands::Wipe { paths } => wipe(&paths),
        Commands::Demo { delay } => demo(delay),
    }
}

fn create(count: u32, content: &[u8]) -> Result<()> {
    for _ in 0..count {
        let (_file, path) = mkstemp::write_tempfile(content).context("creating scratch file")?;
        println!("{}", path.display());
    }
    Ok(())
}

fn wipe(paths: &[PathBuf]) -> Result<()> {
    let mut failures = 0;
    for path in paths {
        match crate::safety::validate::validate(path)
            .and_then(|validated| crate::safety::deleter::delete(&validated))
        {
            Ok(()) => println!("removed {}", path.display()),
            Err(e) => {
                eprintln!("skipped {}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} path(s) were not removed", failures);
    }
    Ok(())
}

fn demo(delay: bool) -> Result<()> {
    let path = {
        let (_file, path) = mkstemp::write_tempfile(b"lifecycle demo")?;
        println!("created {}", path.display());

        let guard = ImmediateHandle::new(&path, delay)?;
        println!(
            "handle bound ({})",
            if delay { "deferred to exit" } else { "scope-bound" }
        );
        drop(guard);
        path
    };

    if delay {
        anyhow::ensure!(path.exists(), "deferred file vanished before process exit");
        println!("file survives scope exit; removal happens at process exit");
    } else {
        anyhow::ensure!(!path.exists(), "scope-bound file was not removed");
        println!("file removed on scope exit");
    }

    // the finalizer-bound variant, cleaned up explicitly
    let (_file, path2) = mkstemp::write_tempfile(b"finalizer demo")?;
    let handle = DeferredHandle::new(&path2, false)?;
    handle.cleanup()?;
    handle.cleanup()?; // idempotent
    println!("explicit cleanup removed {}", path2.display());

    let stats = crate::observability::stats::global().snapshot();
    println!(
        "stats: {} removed, {} failed, {} validation rejections",
        stats.removals, stats.removal_failures, stats.validation_failures
    );
    Ok(())
}
