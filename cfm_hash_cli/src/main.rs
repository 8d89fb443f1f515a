use anyhow::{Context, Result};
use cfm_hash_cli::config::{AppConfig, ConfigManager, get_config};
use cfm_hash_cli::error::{CliError, ErrorContext};
use cfm_hash_cli::host::PluginHost;
use cfm_hash_cli::output::{
    AlgorithmRow, DigestReport, OutputFormat, format_algorithms, format_digests,
};
use cfm_hash_cli::terminal;
use cfm_hash_plugin::supported_algorithms;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cfmhash")]
#[command(author, version, about = "Compute digests through the Confium hash plugin", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute digests of files or standard input
    Digest {
        /// Files to hash; `-` or no file reads standard input
        files: Vec<PathBuf>,

        /// Algorithm name, can be specified multiple times (e.g. SHA-256, BLAKE2b(512))
        #[arg(short, long = "algorithm", value_name = "NAME")]
        algorithms: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Bytes passed to each update call
        #[arg(long, value_name = "BYTES")]
        chunk_size: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List supported algorithms with their output and block sizes
    List {
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show the capability table the plugin advertises
    Capabilities,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., digest.algorithm)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., digest.chunk_size)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    // Initialize logging based on debug flag
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("cfm_hash_plugin", log::LevelFilter::Trace)
            .filter_module("cfm_hash_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(error) = run(cli.command) {
        let error = CliError::from(error);
        eprint!("{}", error.format_for_user(debug));
        std::process::exit(error.exit_code() as i32);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Digest {
            files,
            algorithms,
            format,
            chunk_size,
            no_color,
        } => {
            let config = get_config()?;
            digest_command(config, files, algorithms, format, chunk_size, no_color)
        }
        Commands::List { format } => {
            let config = get_config()?;
            list_command(&config, format)
        }
        Commands::Capabilities => capabilities_command(),
        Commands::Config { command } => config_command(command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

fn resolve_format(config: &AppConfig, format: Option<OutputFormat>) -> Result<OutputFormat> {
    match format {
        Some(format) => Ok(format),
        None => OutputFormat::from_string(&config.output.default_format)
            .context("Invalid output.default_format in configuration"),
    }
}

fn digest_command(
    config: AppConfig,
    files: Vec<PathBuf>,
    algorithms: Vec<String>,
    format: Option<OutputFormat>,
    chunk_size: Option<usize>,
    no_color: bool,
) -> Result<()> {
    let algorithms = if algorithms.is_empty() {
        vec![config.digest.algorithm.clone()]
    } else {
        algorithms
    };
    let chunk_size = chunk_size.unwrap_or(config.digest.chunk_size);
    if chunk_size == 0 {
        return Err(CliError::misuse("--chunk-size must be greater than 0").into());
    }
    let format = resolve_format(&config, format)?;
    let color = !no_color && terminal::use_color(config.output.color_enabled);

    let inputs = if files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        files
    };

    let host = PluginHost::start()?;
    let start = Instant::now();
    let mut reports = Vec::with_capacity(inputs.len());

    for input in &inputs {
        let name = input.display().to_string();
        let report = if input.as_os_str() == "-" {
            digest_reader(&host, &algorithms, io::stdin().lock(), chunk_size, &name)?
        } else {
            let file = File::open(input).map_err(|e| CliError::from_io_error(e, &name))?;
            digest_reader(&host, &algorithms, file, chunk_size, &name)?
        };
        reports.push(report);
    }

    log::debug!(
        "Hashed {} input(s) with {} algorithm(s) in {:.3}s",
        reports.len(),
        algorithms.len(),
        start.elapsed().as_secs_f64()
    );

    print!("{}", format_digests(&reports, format, color)?);
    Ok(())
}

fn digest_reader<R: Read>(
    host: &PluginHost,
    algorithms: &[String],
    mut reader: R,
    chunk_size: usize,
    name: &str,
) -> Result<DigestReport> {
    let mut hashes = Vec::with_capacity(algorithms.len());
    for algorithm in algorithms {
        let hash = host.hash(algorithm).map_err(|e| {
            CliError::plugin(e).with_context("algorithm", algorithm)
        })?;
        hashes.push(hash);
    }

    let mut buffer = vec![0u8; chunk_size];
    let mut size = 0u64;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CliError::from_io_error(e, name).into()),
        };
        size += read as u64;
        for hash in &mut hashes {
            hash.update(&buffer[..read])?;
        }
    }

    let mut digests = BTreeMap::new();
    for hash in &mut hashes {
        let digest = hash.finish()?;
        digests.insert(hash.algorithm().to_string(), hex::encode(digest));
    }

    log::debug!("{name}: {size} bytes");
    Ok(DigestReport {
        file: name.to_string(),
        size,
        hashes: digests,
    })
}

fn list_command(config: &AppConfig, format: Option<OutputFormat>) -> Result<()> {
    let format = resolve_format(config, format)?;
    let color = terminal::use_color(config.output.color_enabled);
    let host = PluginHost::start()?;

    let mut rows = Vec::new();
    for info in supported_algorithms() {
        let hash = host.hash(info.name)?;
        rows.push(AlgorithmRow {
            name: info.name.to_string(),
            output_size: hash.output_size()?,
            block_size: hash.block_size()?,
        });
    }

    print!("{}", format_algorithms(&rows, format, color)?);
    Ok(())
}

fn capabilities_command() -> Result<()> {
    let host = PluginHost::start()?;
    eprintln!(
        "{} {}",
        "Plugin interface version:".bold(),
        host.interface_version()
    );
    for capability in host.capabilities() {
        println!("{}\tv{}", capability.name, capability.version);
    }
    Ok(())
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager
                .set(&key, &value)
                .map_err(|e| CliError::misuse(&format!("{e:#}")))?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            eprintln!("Config file: {}", manager.get_config_path().display());
            for (key, value) in manager.list()? {
                println!("{key} = {value}");
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut io::stdout());
}
