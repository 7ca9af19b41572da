use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use mediacenter_browser::Platform;
use mediacenter_cli::{OutputFormat, commands};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediacenter")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Provision the mediacenter kiosk Chrome profile and its Widevine CDM",
    long_about = "mediacenter manages the persistent Chrome profile shared by the kiosk host and \
                  external Chrome launches: it installs a Widevine CDM into the profile, shows \
                  the engine switches the host will apply, and opens URLs full-screen with the \
                  same profile."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (pretty, json)
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Chrome profile directory (defaults to <user data dir>/mediacenter/chrome-profile)
    #[arg(long, global = true, env = "MEDIACENTER_PROFILE_DIR", value_name = "DIR")]
    profile_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the Widevine CDM installed in the profile
    Cdm {
        #[command(subcommand)]
        command: CdmCommands,
    },

    /// Inspect the kiosk Chrome profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Print the engine switches the host applies at startup
    Switches,

    /// Open a URL in Chrome, full-screen, with the kiosk profile
    Launch {
        /// URL to open (a bare host gets https://)
        #[arg(long, value_name = "URL")]
        url: String,

        /// Compose the command for another platform (macos, windows, linux)
        #[arg(long, value_name = "PLATFORM")]
        platform: Option<Platform>,

        /// Open a normal window instead of full-screen
        #[arg(long)]
        windowed: bool,

        /// Print the command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  \
                            bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash: mediacenter completion --shell bash >> ~/.bashrc\n  \
                            zsh:  mediacenter completion --shell zsh > \"${fpath[1]}/_mediacenter\"\n  \
                            fish: mediacenter completion --shell fish > ~/.config/fish/completions/mediacenter.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum CdmCommands {
    /// Copy a Widevine CDM into the profile and record its version
    Install {
        /// Absolute path to the CDM folder or library
        #[arg(short, long, value_name = "PATH", value_parser = commands::cdm::parse_absolute_path)]
        src: PathBuf,

        /// CDM version advertised to the engine, e.g. 4.10.2557.0
        #[arg(long = "version", value_name = "VERSION")]
        cdm_version: String,
    },

    /// Show the configured CDM and the library it resolves to
    Show,

    /// Search a file or directory for a Widevine CDM library
    Locate {
        /// File or directory to search
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Print the profile directory path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let profile_dir = cli.profile_dir.as_deref();

    // Execute the command
    match cli.command {
        Commands::Cdm { command } => match command {
            CdmCommands::Install { src, cdm_version } => {
                let profile = commands::resolve_profile(profile_dir)?;
                commands::cdm::install(&profile, &src, &cdm_version)
            }
            CdmCommands::Show => {
                let profile = commands::resolve_profile(profile_dir)?;
                commands::cdm::show(&profile, cli.format)
            }
            CdmCommands::Locate { path } => commands::cdm::locate(&path, cli.format),
        },
        Commands::Profile { command } => match command {
            ProfileCommands::Path => {
                let profile = commands::resolve_profile(profile_dir)?;
                commands::profile::path(&profile, cli.format)
            }
        },
        Commands::Switches => {
            let profile = commands::resolve_profile(profile_dir)?;
            commands::switches::execute(&profile, cli.format)
        }
        Commands::Launch {
            url,
            platform,
            windowed,
            dry_run,
        } => {
            let profile = commands::resolve_profile(profile_dir)?;
            commands::launch::execute(&profile, &url, platform, windowed, dry_run, cli.format)
        }
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command(), &mut std::io::stdout())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(
            "mediacenter=debug,mediacenter_cli=debug,mediacenter_core=debug,mediacenter_browser=debug",
        )
    } else {
        EnvFilter::new("mediacenter=info,mediacenter_cli=info,mediacenter_core=warn,mediacenter_browser=warn")
    };

    // stdout carries command output (possibly JSON), so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
