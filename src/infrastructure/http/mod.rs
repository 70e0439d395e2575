//! HTTP transport adapters.

mod executor;

pub use executor::ReqwestExecutor;
