mod auth_expired_port;
mod interceptor_port;
mod request_executor_port;
mod token_storage_port;

pub use auth_expired_port::{AuthExpiredHandler, AuthExpiry};
pub use interceptor_port::{RequestInterceptor, ResponseInterceptor};
pub use request_executor_port::RequestExecutorPort;
pub use token_storage_port::TokenStoragePort;

#[cfg(test)]
pub mod mocks {
    pub use super::auth_expired_port::MockAuthExpiredHandler;
    pub use super::request_executor_port::mock::ScriptedExecutor;
}
