//! Forms API module for REST communication

mod client;
mod error;
mod traits;

pub use client::HttpFormsApi;
pub use error::{ApiError, ApiResult};
pub use traits::FormsApi;

#[cfg(test)]
pub use traits::MockFormsApi;
