//! Record file templates.
//!
//! Both templates are embedded in the binary and rendered with minijinja.
//! Trailing newlines are kept so the update template writes the body back
//! byte for byte.

use chrono::{DateTime, Utc};
use minijinja::{context, Environment};

use crate::error::Result;
use crate::model::Status;

const CREATE_TEMPLATE: &str = "create_adr.md";
const UPDATE_TEMPLATE: &str = "update_adr.md";

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template(CREATE_TEMPLATE, include_str!("templates/create_adr.md"))?;
    env.add_template(UPDATE_TEMPLATE, include_str!("templates/update_adr.md"))?;
    Ok(env)
}

/// `Sat, 02 Mar 2024 10:00:00 UTC`
pub fn human_date(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S UTC").to_string()
}

/// Full content of a new record file. `header` is the output of
/// [`crate::header::encode`], `title` the human title used for the H1.
pub fn render_create(
    header: &str,
    title: &str,
    status: Status,
    date: DateTime<Utc>,
) -> Result<String> {
    let env = environment()?;
    let rendered = env.get_template(CREATE_TEMPLATE)?.render(context! {
        header => header,
        title => title,
        status => status.as_str(),
        date => human_date(date),
    })?;
    Ok(rendered)
}

/// Full content of a rewritten record file, `body` kept verbatim.
pub fn render_update(header: &str, body: &str) -> Result<String> {
    let env = environment()?;
    let rendered = env.get_template(UPDATE_TEMPLATE)?.render(context! {
        header => header,
        body => body,
    })?;
    Ok(rendered)
}
