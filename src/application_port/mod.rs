mod auth_service;
mod translate_service;

pub use auth_service::*;
pub use translate_service::*;
