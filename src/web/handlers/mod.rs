//! HTML handlers.

mod home;

pub use home::{HomeTemplate, home_handler, shorten_form_handler};
