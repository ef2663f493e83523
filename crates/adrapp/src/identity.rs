//! Default author for new records: the git user name, then the login name,
//! then `Unknown`.

use std::env;
use std::process::Command;

pub const UNKNOWN_AUTHOR: &str = "Unknown";

pub fn default_author() -> String {
    git_user_name()
        .or_else(os_user_name)
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

fn git_user_name() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "user.name"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    non_empty(String::from_utf8_lossy(&output.stdout).trim())
}

fn os_user_name() -> Option<String> {
    ["USER", "USERNAME"]
        .into_iter()
        .find_map(|var| env::var(var).ok().and_then(|v| non_empty(v.trim())))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
