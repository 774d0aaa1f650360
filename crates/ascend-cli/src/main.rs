use anyhow::Result;
use ascend_cli::commands;
use ascend_cli::commands::publish::PublishArgs;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "ascend")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Publish new app versions through the App Store Connect web console",
    long_about = "Ascend signs in to App Store Connect, opens or creates the pending version \
                  of an app, fills in release notes and promotional text, attaches a build \
                  and saves the submission."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the pending submission of an app
    Publish(PublishArgs),

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts\n\n\
        SUPPORTED SHELLS:\n  bash, zsh, fish, powershell, elvish\n\n\
        INSTALLATION:\n  \
        bash: ascend completion --shell bash >> ~/.bashrc\n  \
        zsh:  ascend completion --shell zsh > ~/.zfunc/_ascend\n  \
        fish: ascend completion --shell fish > ~/.config/fish/completions/ascend.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Publish(args) => commands::publish::execute(args),
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("ascend=debug,ascend_cli=debug,ascend_core=debug,ascend_browser=debug")
    } else {
        EnvFilter::new("ascend=info,ascend_cli=info,ascend_core=info,ascend_browser=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
