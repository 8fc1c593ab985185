pub mod app;
pub mod configs;
pub mod error;
pub mod http;
pub mod logger;
pub mod utils;

/// Name the service logs under
#[macro_export]
macro_rules! service_name {
    () => {
        env!("CARGO_PKG_NAME")
    };
}
