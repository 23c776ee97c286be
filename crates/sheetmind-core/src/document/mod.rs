//! Document state and logic (UI-agnostic).

mod ops;
mod pending;
mod state;

pub use pending::PendingEdit;
pub use state::{Document, Grid};
