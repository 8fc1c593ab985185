pub mod access_token;
pub mod connectors;
pub mod notification;
pub mod utils;
