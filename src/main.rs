use anyhow::Result;
use clap::{Parser, Subcommand};
use dietdesk_dietplan::PlanMode;

mod cli;

/// dietdesk - diet plans and appointment booking for dietitians
#[derive(Parser)]
#[command(name = "dietdesk")]
#[command(about = "Diet plan text codec and appointment booking", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Manage owners and their booking pages
    Owner {
        #[command(subcommand)]
        command: OwnerCommands,
    },
    /// Convert diet plans between JSON and plain text
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Print the session start times of a working day
    Slots {
        #[arg(long, default_value_t = 9)]
        start: i64,

        #[arg(long, default_value_t = 17)]
        end: i64,

        /// Session length in minutes
        #[arg(long, default_value_t = 45)]
        duration: i64,
    },
}

#[derive(Subcommand)]
enum OwnerCommands {
    /// Create an owner with a public booking slug
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        slug: String,

        #[arg(long, default_value_t = 9)]
        start_hour: u8,

        #[arg(long, default_value_t = 17)]
        end_hour: u8,

        #[arg(long, default_value_t = 45)]
        duration: u16,
    },
    /// Change working hours and session length
    Window {
        slug: String,

        #[arg(long)]
        start_hour: u8,

        #[arg(long)]
        end_hour: u8,

        #[arg(long)]
        duration: u16,
    },
    /// Change the public booking slug
    Slug { slug: String, new_slug: String },
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Encode a JSON plan document into plain text
    Encode { file: String },
    /// Decode plain text into a JSON plan document
    Decode {
        file: String,

        /// Daily or Weekly, guessed from day names when omitted
        #[arg(long)]
        mode: Option<PlanMode>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = dietdesk::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    dietdesk::observability::init_observability(
        "dietdesk",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::database::migrate(config).await,
        Commands::Reset => cli::database::reset(config).await,
        Commands::Owner { command } => match command {
            OwnerCommands::Create {
                name,
                slug,
                start_hour,
                end_hour,
                duration,
            } => {
                let window = dietdesk_booking::BookingWindow {
                    start_hour,
                    end_hour,
                    session_duration: duration,
                };
                cli::owner::create(config, name, slug, window).await
            }
            OwnerCommands::Window {
                slug,
                start_hour,
                end_hour,
                duration,
            } => {
                let window = dietdesk_booking::BookingWindow {
                    start_hour,
                    end_hour,
                    session_duration: duration,
                };
                cli::owner::window(config, slug, window).await
            }
            OwnerCommands::Slug { slug, new_slug } => {
                cli::owner::slug(config, slug, new_slug).await
            }
        },
        Commands::Plan { command } => match command {
            PlanCommands::Encode { file } => cli::plan::encode(file),
            PlanCommands::Decode { file, mode } => cli::plan::decode(file, mode),
        },
        Commands::Slots {
            start,
            end,
            duration,
        } => {
            cli::plan::slots(start, end, duration);
            Ok(())
        }
    }
}
