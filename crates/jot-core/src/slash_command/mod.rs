//! Slash command definitions.
//!
//! All commands are builtin; there are no user-defined commands.

pub mod available;
pub mod builtin;

pub use available::{available_commands, AvailableCommand};
pub use builtin::{
    builtin_commands, command_for_action, find_builtin_command, normalize_command_token,
    BuiltinSlashCommand, CommandContext,
};
