// handlers/protected/mod.rs - Protected handlers (token authentication required)
//
// The auth middleware runs before these handlers and leaves an `AuthUser`
// in the request extensions.

pub mod movies;

pub use movies::*;
