//! PropertyLens CLI: entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use property_lens::SortDirection;
use property_lens_cli::commands::{self, show::Target};
use property_lens_cli::config::{resolve_input_path, resolve_page_size};

#[derive(Parser)]
#[command(
    name = "property-lens",
    about = "Summarize, sort, and inspect property listing payloads of any shape",
    version
)]
struct Cli {
    /// Path to a JSON response body ("-" for stdin).
    /// Also reads from PROPERTY_LENS_INPUT.
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print listing count plus median and average price.
    Summary {
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print result cards.
    List {
        /// Sort by price (asc or desc). Unpriced listings always go last.
        #[arg(long)]
        sort: Option<SortDirection>,

        /// Maximum number of cards. Also reads from PROPERTY_LENS_PAGE_SIZE.
        #[arg(long)]
        limit: Option<usize>,

        /// Print the cards as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the full detail view of one listing.
    Show {
        /// Zero-based position of the listing in the payload.
        #[arg(long, conflicts_with = "data", required_unless_present = "data")]
        index: Option<usize>,

        /// Query string of a detail link (e.g. "data=%7B...%7D").
        #[arg(long)]
        data: Option<String>,

        /// Print the detail as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the detail link for one listing.
    Link {
        /// Zero-based position of the listing in the payload.
        #[arg(long)]
        index: usize,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   property-lens completions bash > ~/.local/share/bash-completion/completions/property-lens
    ///   property-lens completions zsh > ~/.zfunc/_property-lens
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let output = match cli.command {
        Commands::Summary { json } => {
            let records = commands::load_records(&resolve_input_path(cli.input.as_deref()))?;
            commands::summary::run(&records, json)?
        }

        Commands::List { sort, limit, json } => {
            let records = commands::load_records(&resolve_input_path(cli.input.as_deref()))?;
            commands::list::run(&records, sort, resolve_page_size(limit), json)?
        }

        Commands::Show { index, data, json } => match (index, data) {
            (_, Some(query)) => commands::show::run(&[], Target::Query(&query), json)?,
            (Some(index), None) => {
                let records = commands::load_records(&resolve_input_path(cli.input.as_deref()))?;
                commands::show::run(&records, Target::Index(index), json)?
            }
            (None, None) => anyhow::bail!("Either --index or --data is required"),
        },

        Commands::Link { index } => {
            let records = commands::load_records(&resolve_input_path(cli.input.as_deref()))?;
            commands::link::run(&records, index)?
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "property-lens", &mut std::io::stdout());
            return Ok(());
        }
    };

    println!("{output}");
    Ok(())
}
