mod auth_service_impl;
mod credential_hasher_argon2;
mod token_codec_jwt;
mod translate_service_fake;
mod translate_service_impl;

pub use auth_service_impl::*;
pub use credential_hasher_argon2::*;
pub use token_codec_jwt::*;
pub use translate_service_fake::*;
pub use translate_service_impl::*;
