//! Query tools shared by the HTTP handlers and the CLI

pub mod format;
pub mod lookup;
pub mod search;
pub mod util;
