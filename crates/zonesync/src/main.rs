// # zonesync - DNS zone reconciliation CLI
//
// This binary is a THIN integration layer only:
// - DO NOT add reconciliation, diffing or session logic here
// - All record logic lives in zonesync-core, all protocol logic in the
//   provider crates
// - Credentials come from environment variables ONLY, never from flags
//
// The binary is responsible for:
// 1. Reading and validating configuration from environment variables
// 2. Parsing the command line
// 3. Registering providers and creating the configured one
// 4. Running one operation and printing its result as JSON on stdout
//
// ## Configuration
//
// ### Provider
// - `ZONESYNC_PROVIDER_TYPE`: Provider type, only `netcup` is accepted (default: netcup)
// - `ZONESYNC_CUSTOMER_NUMBER`: Customer number
// - `ZONESYNC_API_KEY`: API key
// - `ZONESYNC_API_PASSWORD`: API password
// - `ZONESYNC_ENDPOINT`: API endpoint (optional, defaults to the public one)
//
// ### Client
// - `ZONESYNC_REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 30)
// - `ZONESYNC_LOGOUT_TIMEOUT_SECS`: Upper bound on logout (default: 5)
// - `ZONESYNC_MODE`: Set to `dry-run` to compute batches without submitting
// - `ZONESYNC_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// ## Example
//
// ```bash
// export ZONESYNC_CUSTOMER_NUMBER=12345
// export ZONESYNC_API_KEY=...
// export ZONESYNC_API_PASSWORD=...
//
// zonesync list example.com
// echo '[{"type":"A","name":"www","value":"192.0.2.1"}]' | zonesync replace example.com
// zonesync delete example.com --file stale.json
// ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use zonesync_core::{ClientConfig, Error, ProviderConfig, ProviderRegistry, Record};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// - 0: Operation completed
/// - 1: Configuration or input error, nothing was sent
/// - 2: Runtime error (provider, transport, interruption)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZonesyncExitCode {
    /// Operation completed
    Success = 0,
    /// Configuration or input error
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<ZonesyncExitCode> for ExitCode {
    fn from(code: ZonesyncExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Reconcile DNS zone records against a provider
#[derive(Parser, Debug)]
#[command(name = "zonesync")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every record in the zone
    List {
        /// Zone name (e.g. example.com)
        zone: String,
    },
    /// Create the given records unless an equal one already exists
    Append(Target),
    /// Update matching records in place and create the rest
    Replace(Target),
    /// Delete the matching records
    Delete(Target),
}

#[derive(Args, Debug)]
struct Target {
    /// Zone name (e.g. example.com)
    zone: String,

    /// JSON array of records to apply; read from stdin when omitted
    #[arg(long, short)]
    file: Option<PathBuf>,
}

impl Command {
    fn zone(&self) -> &str {
        match self {
            Command::List { zone } => zone,
            Command::Append(target) | Command::Replace(target) | Command::Delete(target) => {
                &target.zone
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Command::List { .. } => "list",
            Command::Append(_) => "append",
            Command::Replace(_) => "replace",
            Command::Delete(_) => "delete",
        }
    }
}

/// Application configuration
struct Config {
    provider_type: String,
    customer_number: String,
    api_key: String,
    api_password: String,
    endpoint: Option<String>,
    request_timeout_secs: Option<u64>,
    logout_timeout_secs: Option<u64>,
    dry_run: bool,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            provider_type: env::var("ZONESYNC_PROVIDER_TYPE")
                .map(|ty| ty.to_lowercase())
                .unwrap_or_else(|_| "netcup".to_string()),
            customer_number: env::var("ZONESYNC_CUSTOMER_NUMBER").unwrap_or_default(),
            api_key: env::var("ZONESYNC_API_KEY").unwrap_or_default(),
            api_password: env::var("ZONESYNC_API_PASSWORD").unwrap_or_default(),
            endpoint: env::var("ZONESYNC_ENDPOINT").ok().filter(|s| !s.is_empty()),
            request_timeout_secs: parse_secs("ZONESYNC_REQUEST_TIMEOUT_SECS")?,
            logout_timeout_secs: parse_secs("ZONESYNC_LOGOUT_TIMEOUT_SECS")?,
            dry_run: env::var("ZONESYNC_MODE")
                .map(|mode| mode.eq_ignore_ascii_case("dry-run"))
                .unwrap_or(false),
            log_level: env::var("ZONESYNC_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// Runs before any network work: a failure here means nothing was sent.
    fn validate(&self) -> Result<()> {
        if self.customer_number.is_empty() {
            anyhow::bail!(
                "ZONESYNC_CUSTOMER_NUMBER is required. \
                Set it via: export ZONESYNC_CUSTOMER_NUMBER=12345"
            );
        }

        if !self.customer_number.chars().all(|c| c.is_ascii_digit()) {
            anyhow::bail!(
                "ZONESYNC_CUSTOMER_NUMBER must be numeric. Got: {}",
                self.customer_number
            );
        }

        for (name, value) in [
            ("ZONESYNC_API_KEY", &self.api_key),
            ("ZONESYNC_API_PASSWORD", &self.api_password),
        ] {
            if value.is_empty() {
                anyhow::bail!("{} is required", name);
            }

            // Check for obvious placeholders (common mistake)
            let lower = value.to_lowercase();
            if lower.contains("your_") || lower.contains("replace_me") || lower == "changeme" {
                anyhow::bail!(
                    "{} appears to be a placeholder. \
                    Use the value from your provider's control panel.",
                    name
                );
            }
        }

        if let Some(secs) = self.request_timeout_secs
            && !(1..=300).contains(&secs)
        {
            anyhow::bail!(
                "ZONESYNC_REQUEST_TIMEOUT_SECS must be between 1 and 300 seconds. Got: {}",
                secs
            );
        }

        if let Some(secs) = self.logout_timeout_secs
            && !(1..=60).contains(&secs)
        {
            anyhow::bail!(
                "ZONESYNC_LOGOUT_TIMEOUT_SECS must be between 1 and 60 seconds. Got: {}",
                secs
            );
        }

        if let Some(ref url) = self.endpoint
            && url.starts_with("http://")
        {
            eprintln!(
                "WARNING: ZONESYNC_ENDPOINT uses HTTP (not HTTPS). \
                Credentials will be sent in clear text."
            );
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "ZONESYNC_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.provider_config()?.validate()?;
        self.client_config().validate()?;

        Ok(())
    }

    /// Provider configuration for `ZONESYNC_PROVIDER_TYPE`
    ///
    /// The credential variables above are netcup's, so netcup is the only
    /// type accepted here.
    fn provider_config(&self) -> zonesync_core::Result<ProviderConfig> {
        match self.provider_type.as_str() {
            "netcup" => Ok(ProviderConfig::Netcup {
                customer_number: self.customer_number.clone(),
                api_key: self.api_key.clone(),
                api_password: self.api_password.clone(),
                endpoint: self.endpoint.clone(),
            }),
            _ => Err(Error::config(format!(
                "ZONESYNC_PROVIDER_TYPE '{}' is not supported. Supported providers: netcup",
                self.provider_type
            ))),
        }
    }

    fn client_config(&self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            logout_timeout_secs: self
                .logout_timeout_secs
                .unwrap_or(defaults.logout_timeout_secs),
            dry_run: self.dry_run,
        }
    }

    fn log_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn parse_secs(name: &str) -> Result<Option<u64>> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a whole number of seconds. Got: {}", name, value)),
        Err(_) => Ok(None),
    }
}

/// Validate that a zone name is a plausible domain name
///
/// Basic RFC 1035 checks, enough to reject typos before logging in.
fn validate_zone(zone: &str) -> zonesync_core::Result<()> {
    let zone = zone.strip_suffix('.').unwrap_or(zone);

    if zone.is_empty() {
        return Err(Error::invalid_input("zone name cannot be empty"));
    }

    if zone.len() > 253 {
        return Err(Error::invalid_input(format!(
            "zone name too long: {} chars (max 253)",
            zone.len()
        )));
    }

    for label in zone.split('.') {
        if label.is_empty() || label.len() > 63 {
            return Err(Error::invalid_input(format!(
                "zone name has an invalid label: '{}'",
                zone
            )));
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-')
            || label.starts_with('-')
            || label.ends_with('-')
        {
            return Err(Error::invalid_input(format!(
                "zone label '{}' must be alphanumeric or hyphen, not starting or ending with a hyphen",
                label
            )));
        }
    }

    Ok(())
}

/// Parse desired records from a JSON array
fn parse_records(input: &str) -> zonesync_core::Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(input)
        .map_err(|e| Error::invalid_input(format!("records must be a JSON array: {}", e)))?;

    for (index, record) in records.iter().enumerate() {
        if record.record_type.is_empty() {
            return Err(Error::invalid_input(format!(
                "record {} has no type",
                index
            )));
        }
        if record.name.is_empty() {
            return Err(Error::invalid_input(format!(
                "record {} has no name",
                index
            )));
        }
    }

    Ok(records)
}

/// Read desired records from `path`, or stdin when absent
fn read_records(path: Option<&Path>) -> zonesync_core::Result<Vec<Record>> {
    let input = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_input(format!(
                "Failed to read records from {}: {}",
                path.display(),
                e
            ))
        })?,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| {
                    Error::invalid_input(format!("Failed to read records from stdin: {}", e))
                })?;
            input
        }
    };

    parse_records(&input)
}

/// Desired records for `command`; listing takes none
fn desired_records(command: &Command) -> zonesync_core::Result<Vec<Record>> {
    match command {
        Command::List { .. } => Ok(Vec::new()),
        Command::Append(target) | Command::Replace(target) | Command::Delete(target) => {
            read_records(target.file.as_deref())
        }
    }
}

/// Configuration and input errors exit with 1, everything else with 2
fn exit_code_for(err: &anyhow::Error) -> ZonesyncExitCode {
    let is_config = err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<Error>(),
            Some(Error::Config(_) | Error::InvalidInput(_))
        )
    });

    if is_config {
        ZonesyncExitCode::ConfigError
    } else {
        ZonesyncExitCode::RuntimeError
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return ZonesyncExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return ZonesyncExitCode::ConfigError.into();
    }

    if let Err(e) = validate_zone(cli.command.zone()) {
        eprintln!("{}", e);
        return ZonesyncExitCode::ConfigError.into();
    }

    // Input is read up front: bad input never reaches the provider, and an
    // interrupt never has to cancel a blocking read
    let desired = match desired_records(&cli.command) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Input error: {}", e);
            return ZonesyncExitCode::ConfigError.into();
        }
    };

    // Logs go to stderr, stdout carries the JSON result only
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ZonesyncExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ZonesyncExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        run(cli.command, desired, config)
            .await
            .and_then(|records| print_records(&records))
    });

    match result {
        Ok(()) => ZonesyncExitCode::Success.into(),
        Err(e) => {
            error!("{:#}", e);
            exit_code_for(&e).into()
        }
    }
}

fn print_records(records: &[Record]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to encode result")?;
    println!("{}", json);
    Ok(())
}

/// Run one operation against the configured provider
///
/// An interrupt drops the in-flight operation. The provider then cleans up
/// in the background (netcup logs out), and we wait for that before
/// returning so the runtime is still alive to run it.
async fn run(command: Command, desired: Vec<Record>, config: Config) -> Result<Vec<Record>> {
    let registry = ProviderRegistry::new();

    #[cfg(feature = "netcup")]
    {
        info!("Registering netcup provider");
        zonesync_provider_netcup::register(&registry);
    }

    if !registry.has_provider(&config.provider_type) {
        return Err(Error::config(format!(
            "ZONESYNC_PROVIDER_TYPE '{}' is not supported. Supported providers: {}",
            config.provider_type,
            registry.list_providers().join(", ")
        ))
        .into());
    }

    let client = config.client_config();
    let provider = registry
        .create_provider(&config.provider_config()?, &client)
        .context("Failed to create provider")?;

    let zone = command.zone().to_string();
    let operation = command.name();
    info!("Running {} on {} via {}", operation, zone, provider.provider_name());

    let work = async {
        let records = match &command {
            Command::List { zone } => provider.get_records(zone).await?,
            Command::Append(target) => provider.append_records(&target.zone, &desired).await?,
            Command::Replace(target) => provider.set_records(&target.zone, &desired).await?,
            Command::Delete(target) => provider.delete_records(&target.zone, &desired).await?,
        };
        Ok::<_, anyhow::Error>(records)
    };

    tokio::select! {
        result = work => {
            let records = result.with_context(|| format!("{} on {} failed", operation, zone))?;
            info!("{} on {} returned {} record(s)", operation, zone, records.len());
            Ok(records)
        }
        interrupt = wait_for_interrupt() => {
            warn!("Received {}, abandoning {} on {}", interrupt, operation, zone);
            provider.wait_for_teardown().await;
            anyhow::bail!("{} on {} interrupted by {}", operation, zone, interrupt)
        }
    }
}

/// Wait for an interrupt (SIGTERM, SIGINT)
///
/// Never completes when the handlers cannot be installed: the operation
/// then runs without an interrupt source.
#[cfg(unix)]
async fn wait_for_interrupt() -> &'static str {
    let handlers = signal(SignalKind::terminate())
        .and_then(|sigterm| Ok((sigterm, signal(SignalKind::interrupt())?)));
    let (mut sigterm, mut sigint) = match handlers {
        Ok(handlers) => handlers,
        Err(e) => {
            warn!("Failed to setup signal handlers, interrupts are ignored: {}", e);
            return std::future::pending().await;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    }
}

/// Wait for an interrupt (CTRL-C only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_interrupt() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to wait for CTRL-C, interrupts are ignored: {}", e);
        return std::future::pending().await;
    }
    "SIGINT"
}
