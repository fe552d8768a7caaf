//! CLI subcommand implementations.

pub mod details;
pub mod groups;
pub mod show;
pub mod tracks;
pub mod util;
pub mod watch;
