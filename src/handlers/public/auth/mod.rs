// handlers/public/auth/mod.rs - Public authentication handlers
//
// Signup creates the credential record; signin exchanges credentials for a
// signed token used on every /movies route.

pub mod signin; // POST /signin - verify credentials and issue a token
pub mod signup; // POST /signup - create a new account

pub use signin::signin_post;
pub use signup::signup_post;
