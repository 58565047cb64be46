// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition endpoints and service probes.

pub mod auth;
pub mod status;

pub use auth::*;
pub use status::*;
