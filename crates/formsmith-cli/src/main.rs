//! formsmith CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "formsmith",
    version,
    about = "Form submission name parsing and assessment scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a full name into its components
    ParseName {
        /// The name to parse
        name: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Score a submission against a form's radio questions
    Score {
        /// Path to the form definition (.toml)
        #[arg(long)]
        form: PathBuf,

        /// Path to the submission (.json)
        #[arg(long)]
        submission: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Run the pre-submission pipeline and print the patched submission
    Process {
        /// Path to the form definition (.toml)
        #[arg(long)]
        form: PathBuf,

        /// Path to the submission (.json)
        #[arg(long)]
        submission: PathBuf,

        /// Write the patched submission here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the stored assessment result of an entry
    Results {
        /// Entry id, as received from the visitor
        #[arg(long)]
        entry_id: Option<String>,

        /// Form definition file or directory (overrides config)
        #[arg(long)]
        forms: Option<PathBuf>,

        /// Entries JSON file (overrides config)
        #[arg(long)]
        entries: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show how many entries a limited form still accepts
    Remaining {
        /// Form id
        #[arg(long)]
        form_id: u32,

        /// Thousands separator: comma, decimal
        #[arg(long)]
        number_format: Option<String>,

        /// Form definition file or directory (overrides config)
        #[arg(long)]
        forms: Option<PathBuf>,

        /// Entries JSON file (overrides config)
        #[arg(long)]
        entries: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate form definition files
    Validate {
        /// Path to form file or directory
        #[arg(long)]
        form: PathBuf,
    },

    /// Create starter config and example form
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("formsmith=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::ParseName { name, format } => commands::parse_name::execute(name, format),
        Commands::Score {
            form,
            submission,
            format,
        } => commands::score::execute(form, submission, format),
        Commands::Process {
            form,
            submission,
            output,
            config,
        } => commands::process::execute(form, submission, output, config),
        Commands::Results {
            entry_id,
            forms,
            entries,
            config,
        } => commands::results::execute(entry_id, forms, entries, config),
        Commands::Remaining {
            form_id,
            number_format,
            forms,
            entries,
            config,
        } => commands::remaining::execute(form_id, number_format, forms, entries, config),
        Commands::Validate { form } => commands::validate::execute(form),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
