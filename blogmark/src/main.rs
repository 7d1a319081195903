use std::{fs, path::Path};

use blogmark::{
  cli::{Cli, Commands},
  config::Config,
  render,
};
use color_eyre::eyre::{Context, Report, Result, bail, eyre};
use log::{LevelFilter, info};

fn main() -> Result<()> {
  color_eyre::install()?;

  // Parse command line arguments
  let cli = Cli::parse_args();

  // Initialize logging first so we can log during command handling
  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Commands::Init {
      output,
      format,
      force,
    } => init_config(output, format, *force),

    Commands::Render { files, output, .. } => {
      let config = Config::load(&cli).map_err(into_report)?;

      // Setup thread pool once for all parallel rendering
      let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
      rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build_global()?;

      let posts =
        render::render_files(&config, files).map_err(into_report)?;
      render::write_output(&posts, config.pretty, output.as_deref())
        .map_err(into_report)
        .wrap_err("Failed to write rendered posts")
    },
  }
}

/// Write a default configuration file to `output`.
fn init_config(output: &Path, format: &str, force: bool) -> Result<()> {
  // Check if file already exists and that we're not forcing overwrite
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  // Create parent directories if needed
  if let Some(parent) = output.parent() {
    if !parent.as_os_str().is_empty() && !parent.exists() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
      info!("Created directory: {}", parent.display());
    }
  }

  Config::generate_default_config(format, output)
    .map_err(into_report)
    .wrap_err_with(|| {
      format!(
        "Failed to generate configuration file: {}",
        output.display()
      )
    })?;

  info!(
    "Configuration file created successfully. Edit it to customize how posts \
     are rendered."
  );
  Ok(())
}

/// Carry an `anyhow` error chain over into an eyre report.
fn into_report(err: anyhow::Error) -> Report {
  eyre!("{err:#}")
}
