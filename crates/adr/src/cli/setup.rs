use adrapp::model::Status;
use clap::builder::PossibleValue;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl From<CompletionShell> for clap_complete::Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => clap_complete::Shell::Bash,
            CompletionShell::Zsh => clap_complete::Shell::Zsh,
            CompletionShell::Fish => clap_complete::Shell::Fish,
        }
    }
}

/// Record status as accepted on the command line. Help and shell completion
/// show [`Status::description`] for each value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StatusArg(pub Status);

static STATUS_ARGS: [StatusArg; 6] = [
    StatusArg(Status::Unknown),
    StatusArg(Status::Proposed),
    StatusArg(Status::Accepted),
    StatusArg(Status::Deprecated),
    StatusArg(Status::Superseded),
    StatusArg(Status::Observed),
];

impl ValueEnum for StatusArg {
    fn value_variants<'a>() -> &'a [Self] {
        &STATUS_ARGS
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.0.as_str()).help(self.0.description()))
    }
}

impl From<StatusArg> for Status {
    fn from(status: StatusArg) -> Self {
        status.0
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "adr",
    bin_name = "adr",
    version,
    disable_help_subcommand = true,
    after_help = "Enable shell completions:\n  eval \"$(adr completions bash)\"  # add to ~/.bashrc\n  eval \"$(adr completions zsh)\"   # add to ~/.zshrc"
)]
#[command(about = "Manage Architecture Decision Records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Records directory to use instead of the one configured in .adrrc.yml
    #[arg(short = 'C', long = "dir", value_name = "PATH", global = true, help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the records directory and a .adrrc.yml pointing at it
    #[command(display_order = 1)]
    Init {
        /// Directory that will hold the records, relative to the current one
        directory: PathBuf,
    },

    /// Create a new record
    #[command(alias = "add", display_order = 2)]
    New {
        /// Author of the record [default: git user name]
        #[arg(short, long)]
        author: Option<String>,

        /// Status of the record [default: accepted]
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Tags, comma separated
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// List records
    #[command(alias = "ls", display_order = 3)]
    List {
        /// Only records by one of these authors
        #[arg(short, long, value_delimiter = ',')]
        authors: Vec<String>,

        /// Only records with one of these statuses
        #[arg(short, long = "status", value_enum, value_delimiter = ',')]
        statuses: Vec<StatusArg>,

        /// Only records carrying one of these tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the metadata of a record
    #[command(display_order = 4)]
    Update {
        /// ID of the record
        id: String,

        /// New author
        #[arg(short, long)]
        author: Option<String>,

        /// New status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Replace all tags, comma separated
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Add tags, comma separated
        #[arg(long, value_delimiter = ',')]
        add_tags: Vec<String>,

        /// Remove tags, comma separated
        #[arg(long, value_delimiter = ',')]
        remove_tags: Vec<String>,

        /// Replace all superseders (record IDs), comma separated
        #[arg(short = 'r', long, value_delimiter = ',')]
        superseders: Option<Vec<String>>,

        /// Add superseders, comma separated
        #[arg(long, value_delimiter = ',')]
        add_superseders: Vec<String>,

        /// Remove superseders, comma separated
        #[arg(long, value_delimiter = ',')]
        remove_superseders: Vec<String>,
    },

    /// Print the shell completion script
    #[command(display_order = 10)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

pub fn build_command() -> clap::Command {
    Cli::command()
}
