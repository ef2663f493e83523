//! # adr CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/adrapp/`: library with the UI-agnostic logic (record format,
//!   indexing, store, commands)
//! - `crates/adr/`: this CLI, depends on `adrapp`
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/adr/src/cli/)                         │
//! │  - clap argument parsing (setup.rs)                      │
//! │  - Logging, context wiring and dispatch (commands.rs)    │
//! │  - Terminal rendering (render.rs, styles.rs)             │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  API Layer (crates/adrapp/src/api.rs)                    │
//! │  - Dispatches to command modules                         │
//! │  - Returns structured `CmdResult` values                 │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/adrapp/src/commands/*)            │
//! │  - Business logic over the record store                  │
//! │  - No knowledge of stdout/stderr or process exits        │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests next to each module, integration tests in
//!   `crates/adrapp/tests/`.
//! - **CLI**: argument parsing and rendering are unit tested in `src/cli/`;
//!   `tests/` drives the real binary through `assert_cmd`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
