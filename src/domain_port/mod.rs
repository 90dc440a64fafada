mod clock;
mod credential_store;
mod translation_provider;

pub use clock::*;
pub use credential_store::*;
pub use translation_provider::*;
