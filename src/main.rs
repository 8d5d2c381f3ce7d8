// Use modules from the library crate
use locus::{commands, config, logging, resolve::scratch};

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "locus",
    about = "Resolve resource names to local files from the filesystem, bundled resources, archives, or URLs",
    version
)]
struct Cli {
    /// Extra directory searched for bundled resources (repeatable)
    #[arg(long = "resource-dir", short = 'd', value_name = "DIR", global = true)]
    resource_dirs: Vec<PathBuf>,

    /// Extra zip archive searched for bundled resources (repeatable)
    #[arg(long = "archive", short = 'a', value_name = "ZIP", global = true)]
    archives: Vec<PathBuf>,

    /// Do not search the resources compiled into locus
    #[arg(long, global = true)]
    no_bundled: bool,

    /// Never try names as http(s)/file/archive URLs
    #[arg(long, global = true)]
    offline: bool,

    /// Config file (defaults to ~/.config/locus/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Resolve a resource name and print the local path
    ///
    /// Resolution order:
    ///   1. the name as an existing file
    ///   2. a loose file in the resource directories
    ///   3. a packaged entry (archives, compiled-in resources), copied out
    ///   4. an http(s)://, file: or archive:<zip>!/<entry> URL, copied out
    ///   5. the name as a path, unchecked
    ///
    /// Copies are temporary and deleted before locus exits unless --keep
    /// is given.
    Resolve {
        /// Resource name
        name: String,

        /// Keep a temporary copy on disk after exit
        #[arg(long)]
        keep: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the text content of a resource
    Cat {
        /// Resource name
        name: String,
    },

    /// Print the lines of a resource, numbered
    Lines {
        /// Resource name
        name: String,
    },

    /// Exit 0 if the resource resolves to an existing file, 1 otherwise
    Exists {
        /// Resource name
        name: String,

        /// Do not print anything
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Show the directory, leaf, stem and kind of a name (no I/O)
    Inspect {
        /// Resource name
        name: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Expand ${var} placeholders in a template resource
    ///
    /// Example:
    ///   locus expand templates/greeting.txt --var name=world
    Expand {
        /// Template resource name
        name: String,

        /// Variable as KEY=VALUE (repeatable)
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,
    },

    /// Manage the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Parser)]
enum ConfigCommand {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective config
    Show,

    /// Add a resource directory
    AddDir {
        /// Directory to search for loose resources
        dir: PathBuf,
    },

    /// Add a zip archive
    AddArchive {
        /// Archive to search for packaged resources
        archive: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose).context("Failed to initialize logging")?;

    // Sweeps any scratch file a command left registered, even on error returns
    let _purge = scratch::PurgeOnExit;

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    let session = || -> Result<commands::Session> {
        let mut config = config::load_config_from(&config_path)?;
        config.resource_dirs.extend(cli.resource_dirs);
        config.archives.extend(cli.archives);
        if cli.offline {
            config.remote.enabled = false;
        }
        Ok(commands::Session::new(&config, !cli.no_bundled))
    };

    match cli.command {
        Command::Resolve { name, keep, json } => {
            commands::resolve::resolve(&session()?, &name, keep, json)?
        }
        Command::Cat { name } => commands::resolve::cat(&session()?, &name)?,
        Command::Lines { name } => commands::resolve::lines(&session()?, &name)?,
        Command::Exists { name, quiet } => {
            let found = commands::resolve::exists(&session()?, &name);
            if !quiet {
                println!("{}", if found { "yes" } else { "no" });
            }
            if !found {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Inspect { name, json } => commands::resolve::inspect(&name, json)?,
        Command::Expand { name, vars } => commands::expand::expand(&session()?, &name, &vars)?,
        Command::Config(config_cmd) => match config_cmd {
            ConfigCommand::Init { force } => commands::config::init(&config_path, force)?,
            ConfigCommand::Show => commands::config::show(&config_path)?,
            ConfigCommand::AddDir { dir } => commands::config::add_dir(&config_path, &dir)?,
            ConfigCommand::AddArchive { archive } => {
                commands::config::add_archive(&config_path, &archive)?
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
