//! Form editing domain layer
//!
//! Question values and the draft that orders them.

mod draft;
mod question;

pub use draft::{DisplayOrderPolicy, Draft, DraftError, ValidationError};
pub use question::{Question, QuestionEdit};
