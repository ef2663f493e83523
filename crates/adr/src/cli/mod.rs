//! # CLI Behavior
//!
//! This is **one possible UI client** for adrapp, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and
//! output formatting.
//!
//! ## Commands
//!
//! - `adr init <dir>`: create the records directory and `.adrrc.yml`.
//! - `adr new <title...>` (`add`): write `NNN_<slug>.md` from the template.
//! - `adr list` (`ls`): table of records, `--json` for scripts.
//! - `adr update <id>`: change author, status, tags or superseders.
//! - `adr completions <shell>`: print a completion script.
//!
//! Every command but `init` locates the records directory through the closest
//! `.adrrc.yml`, unless `-C/--dir` names it.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and dispatch
//! - `render`: output formatting (tables, colors, messages)
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
