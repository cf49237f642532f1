pub mod access_jwt;
pub mod factory;
pub mod signing_key;

pub use access_jwt::{AccessTokenClaims, AuthService, Rejection, Verification};
pub use factory::build_auth_service;
pub use signing_key::SigningKey;
