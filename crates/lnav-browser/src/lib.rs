//! lnav Browser
//!
//! A minimal page host for the landmark navigator: loads a page into a tab,
//! routes key presses, menu picks, preference changes and timer ticks to
//! the navigator.

pub mod commands;
pub mod session;
pub mod tab;

pub use commands::{Command, CommandError, HELP};
pub use session::Session;
pub use tab::Tab;
