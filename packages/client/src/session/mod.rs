//! Session state machine.
//!
//! A single actor task owns the session state and is its
//! only writer. Callers drive it through a cloneable [`SessionHandle`]; every
//! transition publishes a fresh [`SessionSnapshot`].

mod actor;
mod handle;
mod outcome;
mod state;

pub use handle::{SessionConfig, SessionDeps, SessionHandle};
pub use outcome::{SendError, SendOutcome};
pub use state::{Notification, SessionSnapshot};
