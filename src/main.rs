use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use log::{error, info};
use tracing_subscriber::EnvFilter;

use db2jsonschema::{ConnectionInfo, FileConfig, GeneratorRequest, OutputFormat, Request};

/// Exit status when required settings are missing
const USAGE_EXIT_CODE: u8 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate JSON Schema definitions from database tables")]
struct Cli {
    /// Config file (default is $HOME/.db2jsonschema.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// The DB driver (sqlite3, mysql)
    #[arg(long)]
    driver: Option<String>,

    /// The DB URL
    #[arg(long)]
    dburl: Option<String>,

    /// The output format (json, yaml)
    #[arg(long)]
    format: Option<String>,

    /// Write one schema file per table into this directory
    #[arg(long)]
    outdir: Option<PathBuf>,

    /// The $schema value for the generated schemas
    #[arg(long)]
    schematype: Option<String>,

    /// A template string for the $id value, e.g. "{{ .Name }}.{{ .Format }}"
    #[arg(long)]
    idtemplate: Option<String>,

    /// Title of the definitions document
    #[arg(long)]
    title: Option<String>,

    /// The tables to include
    #[arg(long = "include", value_delimiter = ',')]
    includes: Vec<String>,

    /// The tables to exclude
    #[arg(long = "exclude", value_delimiter = ',')]
    excludes: Vec<String>,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Merge flags over file values. Returns `None` when driver or URL is missing.
fn build_request(cli: Cli, file: FileConfig) -> Result<Option<Request>> {
    let driver = cli.driver.or(file.driver).filter(|d| !d.is_empty());
    let dburl = cli.dburl.or(file.dburl).filter(|u| !u.is_empty());
    let (Some(driver), Some(dburl)) = (driver, dburl) else {
        return Ok(None);
    };

    let format = match cli.format.or(file.format).filter(|f| !f.is_empty()) {
        Some(name) => name.parse::<OutputFormat>()?,
        None => OutputFormat::default(),
    };

    let mut connection = ConnectionInfo::new(driver, dburl);
    connection.type_overrides = file.types;

    let generator = GeneratorRequest {
        format,
        outdir: cli.outdir.or(file.outdir),
        schema_type: cli.schematype.or(file.schematype),
        id_template: cli.idtemplate.or(file.idtemplate),
        title: cli.title.or(file.title),
    };

    let pick = |flags: Vec<String>, from_file: Vec<String>| if flags.is_empty() { from_file } else { flags };

    Ok(Some(Request {
        connection,
        generator,
        includes: pick(cli.includes, file.include),
        excludes: pick(cli.excludes, file.exclude),
    }))
}

fn run(cli: Cli) -> Result<ExitCode> {
    let file = match FileConfig::discover(cli.config.as_deref())? {
        Some((path, config)) => {
            info!("Using config file: {}", path.display());
            config
        }
        None => FileConfig::default(),
    };

    let Some(request) = build_request(cli, file)? else {
        Cli::command().print_help()?;
        return Ok(ExitCode::from(USAGE_EXIT_CODE));
    };

    request
        .perform()
        .with_context(|| format!("Failed to generate schemas from {}", request.connection.data_source))?;

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
