use std::fs;
use std::path::Path;

use crate::commands::{CmdMessage, CmdResult};
use crate::config::{self, CONFIG_FILE_NAME};
use crate::error::{AdrError, Result};

/// Creates the records directory (with parents) and writes `.adrrc.yml` in
/// `cwd`. `directory` is stored as given, so a relative path stays relative
/// to the project.
pub fn run(cwd: &Path, directory: &Path) -> Result<CmdResult> {
    let records_dir = cwd.join(directory);
    if records_dir.exists() && !records_dir.is_dir() {
        return Err(AdrError::NotADirectory(records_dir));
    }
    fs::create_dir_all(&records_dir)?;

    let mut result = CmdResult::default();
    if cwd.join(CONFIG_FILE_NAME).exists() {
        result.add_message(CmdMessage::warning(format!(
            "Replacing existing {CONFIG_FILE_NAME}"
        )));
    }
    let config_path = config::write_config(cwd, directory)?;

    result.add_message(CmdMessage::success(format!(
        "Initialized records directory at {}",
        records_dir.display()
    )));
    result.add_message(CmdMessage::info(format!(
        "Configuration written to {}",
        config_path.display()
    )));
    result.add_message(CmdMessage::info(String::new()));
    result.add_message(CmdMessage::info("Tip: Enable shell completions for adr:"));
    result.add_message(CmdMessage::info(
        "  eval \"$(adr completions bash)\"  # add to ~/.bashrc",
    ));
    result.add_message(CmdMessage::info(
        "  eval \"$(adr completions zsh)\"   # add to ~/.zshrc",
    ));

    Ok(result.with_paths(vec![records_dir, config_path]))
}
