//! Interactive review of generated candidates.

mod edit;
mod session;

pub use edit::EditBuffer;
pub use session::{ReviewSession, ReviewState};
