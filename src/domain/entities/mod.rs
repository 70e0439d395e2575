//! Domain entities.

pub mod envelope;
mod outcome;
mod request;
mod retry_policy;
mod token;

pub use outcome::{Failure, FailureKind, RequestOutcome};
pub use request::{
    DEFAULT_TIMEOUT, FormPart, FormValue, HttpMethod, MultipartForm, RequestBody, RequestConfig,
    RequestOptions,
};
pub use retry_policy::RetryPolicy;
pub use token::AuthToken;
