//! Session state: settings, find context, mode and pending confirmation.

pub mod find_context;
pub mod language;
pub mod mode;
pub mod pending;
pub mod settings;
pub mod state;

pub use find_context::FindContext;
pub use language::Language;
pub use mode::{AiTurn, Mode, PendingCommand};
pub use pending::{PendingConfirmation, PendingKind};
pub use settings::Settings;
pub use state::{LastAnswer, SessionState};
