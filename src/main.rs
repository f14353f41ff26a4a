//! Command-line front end for inspecting the template path table of a built application.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use asset_path_resolver::{
  AssetPathResolver, FileProvider, FsModuleHost, PathTable, ResolverConfig,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Resolve module template virtual paths to their project source files.
#[derive(Parser)]
#[command(name = "asset-path-resolver", version, about, long_about = None)]
struct Cli {
  /// Configuration file; defaults to `asset-resolver.json` in the working directory.
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Name of the application module carrying the module names map.
  #[arg(short, long, global = true)]
  app: Option<String>,

  /// Directory searched for modules; may be repeated.
  #[arg(short, long = "probe", global = true)]
  probe: Vec<PathBuf>,

  /// Log skipped modules and build details.
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print every mapped virtual path.
  List {
    /// Emit JSON instead of plain text.
    #[arg(long)]
    json: bool,
  },
  /// Print the physical file behind a virtual path.
  Resolve {
    /// Virtual path, e.g. `/Modules/Foo/Views/Home.liquid`.
    path: String,
  },
  /// Wait until the file behind a virtual path changes.
  Watch {
    /// Virtual path to watch.
    path: String,
    /// Give up after this many seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
  },
}

#[derive(Serialize)]
struct TableEntry<'a> {
  key: &'a str,
  path: &'a Path,
  exists: bool,
}

fn main() -> Result<ExitCode> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let config = load_config(&cli)?;
  let host = FsModuleHost::new(config.probe_dirs.clone());
  let table = PathTable::build(&config, &host, &host).with_context(|| {
    format!(
      "failed to build the template table for `{}`",
      config.application_name
    )
  })?;
  let resolver = AssetPathResolver::new(Arc::new(table), config.poll_interval());

  match cli.command {
    Command::List { json } => list(&resolver, json),
    Command::Resolve { path } => Ok(resolve(&resolver, &path)),
    Command::Watch { path, timeout_secs } => watch(
      &resolver,
      &path,
      config.poll_interval(),
      timeout_secs.map(Duration::from_secs),
    ),
  }
}

fn init_logging(verbose: bool) {
  let default_filter = if verbose { "debug" } else { "warn" };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
    .init();
}

fn load_config(cli: &Cli) -> Result<ResolverConfig> {
  let mut config = match &cli.config {
    Some(path) => ResolverConfig::from_path(path)
      .with_context(|| format!("failed to load configuration from {}", path.display()))?,
    None => {
      let cwd = std::env::current_dir().context("failed to read the working directory")?;
      ResolverConfig::discover(&cwd)
    }
  };

  if let Some(app) = &cli.app {
    config = config.with_application_name(app.clone());
  }
  if !cli.probe.is_empty() {
    config.probe_dirs = cli.probe.clone();
  }
  if config.probe_dirs.is_empty() {
    config.probe_dirs.push(PathBuf::from("."));
  }
  if config.application_name.is_empty() {
    bail!("no application name configured; pass --app or set `application_name`");
  }

  Ok(config)
}

fn list(resolver: &AssetPathResolver, json: bool) -> Result<ExitCode> {
  let table = resolver.table();

  if json {
    let entries: Vec<TableEntry> = table
      .iter()
      .map(|(key, path)| TableEntry {
        key,
        path,
        exists: path.is_file(),
      })
      .collect();
    println!(
      "{}",
      serde_json::to_string_pretty(&entries).context("failed to serialise the table")?
    );
  } else {
    for (key, path) in table.iter() {
      println!("{key} -> {}", path.display());
    }
    let report = table.report();
    eprintln!(
      "{} templates from {} modules ({} skipped, {} collisions)",
      table.len(),
      report.scanned_modules.len(),
      report.skipped_modules.len(),
      report.collisions.len()
    );
  }

  Ok(ExitCode::SUCCESS)
}

fn resolve(resolver: &AssetPathResolver, path: &str) -> ExitCode {
  let info = resolver.file_info(Some(path));
  match info.physical_path() {
    Some(physical) => {
      let state = if info.exists() { "exists" } else { "missing" };
      println!("{} ({state})", physical.display());
      ExitCode::SUCCESS
    }
    None => {
      eprintln!("`{path}` is not a mapped template");
      ExitCode::FAILURE
    }
  }
}

fn watch(
  resolver: &AssetPathResolver,
  path: &str,
  interval: Duration,
  timeout: Option<Duration>,
) -> Result<ExitCode> {
  let token = resolver.watch(Some(path));
  let Some(physical) = token.watched_path() else {
    bail!("`{path}` is not a mapped template");
  };
  println!("watching {}", physical.display());

  let started = Instant::now();
  let pause = interval.max(Duration::from_millis(100));
  while !token.has_changed() {
    if timeout.is_some_and(|limit| started.elapsed() >= limit) {
      eprintln!("no change within {}s", started.elapsed().as_secs());
      return Ok(ExitCode::FAILURE);
    }
    thread::sleep(pause);
  }

  println!("changed {}", physical.display());
  Ok(ExitCode::SUCCESS)
}
