//! Process exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Bad arguments, bad configuration or an engine error.
pub const ERROR: i32 = 2;

/// The user quit an interactive session early.
pub const INTERRUPTED: i32 = 130;
