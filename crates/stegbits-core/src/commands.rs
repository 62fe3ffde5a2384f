//! Operations for callers that want a plain result record instead of a
//! `Result`. Every failure ends up as `status: false` with the error message.

mod capacity;
mod hide;
mod unveil;

pub use capacity::capacity;
pub use hide::hide;
pub use unveil::unveil;
