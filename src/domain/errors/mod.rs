//! Domain error types.

mod api_error;
mod token_error;

pub use api_error::ApiError;
pub use token_error::TokenError;
