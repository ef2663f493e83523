//! # adrapp
//!
//! Library behind the `adr` command line tool: it keeps a directory of
//! Architecture Decision Records, one Markdown file per decision with a YAML
//! header on top.
//!
//! ## Layers
//!
//! ```text
//!   UI (crates/adr)  ──>  api::AdrApi  ──>  commands::*  ──>  store::RecordStore
//!                                                               │
//!                                       indexer (read) ─────────┤
//!                                     header + templates (write)┘
//! ```
//!
//! - [`api`]: facade, dispatches to commands.
//! - [`commands`]: business logic, returns structured [`commands::CmdResult`]s.
//! - [`store`]: snapshot of a records directory, create and update writes.
//! - [`indexer`]: bounded parallel loading of a directory.
//! - [`header`], [`templates`]: the record file format.
//! - [`config`], [`init`]: locating the records directory.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod header;
pub mod ident;
pub mod identity;
pub mod indexer;
pub mod init;
pub mod model;
pub mod store;
pub mod tagset;
pub mod templates;

#[cfg(test)]
pub(crate) mod test_utils;
