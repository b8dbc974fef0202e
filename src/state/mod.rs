//! Client-side state: form records, the editor draft and list cache helpers

mod form;
mod form_list;
mod forms;
mod generation;
mod response;

pub use form::*;
pub use form_list::*;
pub use forms::*;
pub use generation::*;
pub use response::*;
