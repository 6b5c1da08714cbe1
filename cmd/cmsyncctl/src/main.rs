use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pkg_client::{ConfigMapClient, HttpTransport, TransportConfig};
use pkg_constants::network::{DEFAULT_API_ADDR, DEFAULT_NAMESPACE};
use pkg_constants::paths::DEFAULT_CONFIG_PATH;
use pkg_types::config::{SyncConfigFile, load_config_file};
use pkg_types::configmap::LabelSet;
use pkg_types::validate::{parse_label, validate_name};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cmsyncctl", about = "Sync local files into a configmap")]
struct Cli {
    /// Path to YAML config file
    #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Server API endpoint
    #[arg(long)]
    server: Option<String>,

    /// Namespace of the configmap
    #[arg(long, short)]
    namespace: Option<String>,

    /// Configmap name
    #[arg(long)]
    name: Option<String>,

    /// Label as key=value (repeatable, added to labels from the config file)
    #[arg(long = "label", short = 'l')]
    labels: Vec<String>,

    /// Source file (repeatable, replaces files from the config file)
    #[arg(long = "file", short = 'f')]
    files: Vec<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    insecure: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Check whether the configmap exists
    Exists,
    /// Create the configmap from the source files
    Create,
    /// Overwrite the configmap with the source files
    Update,
    /// Delete the configmap
    Delete,
    /// Delete the configmap if present, then create it
    Replace,
}

/// Settings after merging CLI args > config file > defaults.
#[derive(Debug)]
struct Settings {
    server: String,
    namespace: String,
    name: String,
    labels: LabelSet,
    files: Vec<String>,
    transport: TransportConfig,
}

impl Settings {
    fn merge(cli: &Cli, file_cfg: SyncConfigFile) -> anyhow::Result<Self> {
        let server = cli
            .server
            .clone()
            .or(file_cfg.server)
            .unwrap_or_else(|| DEFAULT_API_ADDR.to_string());
        let namespace = cli
            .namespace
            .clone()
            .or(file_cfg.namespace)
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let name = cli
            .name
            .clone()
            .or(file_cfg.name)
            .context("configmap name is required (--name or `name:` in the config file)")?;

        validate_name("namespace", &namespace)?;
        validate_name("configmap", &name)?;

        let mut labels = file_cfg.labels;
        for raw in &cli.labels {
            let (key, value) = parse_label(raw)?;
            labels.insert(key, value);
        }

        let files = if cli.files.is_empty() {
            file_cfg.files
        } else {
            cli.files.clone()
        };

        let transport = TransportConfig {
            timeout: cli
                .timeout_secs
                .or(file_cfg.timeout_secs)
                .map(Duration::from_secs),
            accept_invalid_certs: cli.insecure || file_cfg.insecure.unwrap_or(false),
            ..TransportConfig::default()
        };

        Ok(Self {
            server,
            namespace,
            name,
            labels,
            files,
            transport,
        })
    }
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn run(command: Commands, settings: &Settings) -> anyhow::Result<ExitCode> {
    dispatch(command, settings).with_context(|| format!("{:?} failed", command))
}

fn dispatch(command: Commands, settings: &Settings) -> anyhow::Result<ExitCode> {
    let transport = HttpTransport::new(&settings.transport)?;
    let client = ConfigMapClient::new(settings.server.as_str(), transport);
    let (ns, name) = (settings.namespace.as_str(), settings.name.as_str());

    match command {
        Commands::Exists => {
            let found = client.exists(ns, name)?;
            println!("{}", found);
            return Ok(if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            });
        }
        Commands::Create => client.create(ns, name, &settings.labels, settings.files.as_slice())?,
        Commands::Update => client.update(ns, name, &settings.labels, settings.files.as_slice())?,
        Commands::Delete => client.delete(ns, name)?,
        Commands::Replace => client.replace(ns, name, &settings.labels, settings.files.as_slice())?,
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    // Load config file (returns defaults if file not found)
    let file_cfg: SyncConfigFile = load_config_file(&cli.config)
        .with_context(|| format!("failed to load config file {}", cli.config))?;
    let settings = Settings::merge(&cli, file_cfg)?;

    info!("Server:     {}", settings.server);
    info!("Configmap:  {}/{}", settings.namespace, settings.name);
    info!("Files:      {}", settings.files.len());

    run(cli.command, &settings)
}
