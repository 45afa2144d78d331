//! Command-line front end for the catalog core.
//!
//! # Responsibility
//! - Load entries and site config from disk.
//! - Drive a `CatalogPage` against in-memory boundaries and print the result.
//!
//! # Invariants
//! - Commands never write outside `--out` and `--log-dir`.
//! - Unknown `--tag` values are errors here, unlike URL restore on the page.

mod args;

pub use args::{Cli, Commands};

use folio_core::{
    core_version, init_logging, CatalogPage, CommonMarkConverter, ConfigError, EntryStore,
    JsonEntryRepository, MemoryLocation, RecordingSurface, RepoError, SelectionError, SiteConfig,
    TagUniverse,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Error for one CLI invocation.
#[derive(Debug)]
pub enum CliError {
    Entries(RepoError),
    Config(ConfigError),
    Selection(SelectionError),
    Logging(String),
    Write { path: Option<PathBuf>, source: std::io::Error },
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entries(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Selection(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Write {
                path: Some(path),
                source,
            } => write!(f, "failed to write `{}`: {source}", path.display()),
            Self::Write { path: None, source } => write!(f, "failed to write output: {source}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Entries(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Selection(err) => Some(err),
            Self::Logging(_) => None,
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Entries(value)
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<SelectionError> for CliError {
    fn from(value: SelectionError) -> Self {
        Self::Selection(value)
    }
}

/// Runs `cli`, writing command output to stdout.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    run_with_output(cli, &mut handle)
}

/// Runs `cli`, writing command output to `out`.
pub fn run_with_output(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    if let Some(log_dir) = &cli.log_dir {
        start_file_logging(&cli.log_level, log_dir)?;
    }

    match cli.command {
        Commands::Tags { entries, config } => {
            let store = load_store(&entries)?;
            let config = load_config(config.as_deref())?;
            let universe = TagUniverse::build(&store, &config);
            for control in universe.controls() {
                writeln!(out, "{}\t{}", control.selection, control.label).map_err(stdout_error)?;
            }
            Ok(())
        }
        Commands::Render {
            entries,
            tag,
            config,
            out: out_path,
        } => {
            let store = load_store(&entries)?;
            let config = load_config(config.as_deref())?;
            let html = render_page(store, config, tag.as_deref())?;
            match out_path {
                Some(path) => {
                    std::fs::write(&path, html).map_err(|source| CliError::Write {
                        path: Some(path.clone()),
                        source,
                    })?;
                    info!(
                        "event=render_write module=cli status=ok path={}",
                        path.display()
                    );
                    Ok(())
                }
                None => out.write_all(html.as_bytes()).map_err(stdout_error),
            }
        }
        Commands::Version => writeln!(out, "folio {}", core_version()).map_err(stdout_error),
    }
}

/// Renders the full page for `tag` as a standalone HTML document.
pub fn render_page(
    store: EntryStore,
    config: SiteConfig,
    tag: Option<&str>,
) -> Result<String, CliError> {
    let mut page = CatalogPage::new(
        store,
        config,
        MemoryLocation::new(),
        RecordingSurface::new(),
        CommonMarkConverter::default(),
    );
    page.start();
    if let Some(tag) = tag {
        page.select(tag)?;
    }
    Ok(document_html(page.surface()))
}

fn document_html(surface: &RecordingSurface) -> String {
    let style: Vec<String> = surface
        .styles
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect();
    let filters: String = surface
        .filters
        .iter()
        .map(|control| control.to_html(surface.active_filter.as_ref() == Some(&control.selection)))
        .collect();

    format!(
        "<!DOCTYPE html>\n<html style=\"{}\">\n<body>\n<nav id=\"filter\">{}</nav>\n<section id=\"projects\">{}</section>\n</body>\n</html>\n",
        style.join("; "),
        filters,
        surface.cards_html()
    )
}

fn load_store(path: &Path) -> Result<EntryStore, CliError> {
    Ok(EntryStore::load(&JsonEntryRepository::from_path(path))?)
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig, CliError> {
    match path {
        Some(path) => Ok(SiteConfig::from_path(path)?),
        None => Ok(SiteConfig::default()),
    }
}

fn start_file_logging(level: &str, log_dir: &Path) -> Result<(), CliError> {
    let absolute = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|err| CliError::Logging(err.to_string()))?
            .join(log_dir)
    };
    let log_dir = absolute
        .to_str()
        .ok_or_else(|| CliError::Logging(format!("non UTF-8 log dir `{}`", absolute.display())))?;
    init_logging(level, log_dir).map_err(CliError::Logging)
}

fn stdout_error(source: std::io::Error) -> CliError {
    CliError::Write { path: None, source }
}
