use adrapp::model::Status;
use console::Style;
use once_cell::sync::Lazy;

pub static HEADER: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static ID: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static TIME: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());

pub static INFO: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static WARNING: Lazy<Style> = Lazy::new(|| Style::new().yellow());

static GREY: Lazy<Style> = Lazy::new(|| Style::new().color256(245));

pub fn status(status: Status) -> &'static Style {
    match status {
        Status::Proposed => &*WARNING,
        Status::Accepted | Status::Observed => &*SUCCESS,
        Status::Unknown | Status::Deprecated | Status::Superseded => &*GREY,
    }
}
