pub mod access;
pub mod auth;
pub mod seed;
pub mod session;

pub use access::AccessService;
pub use auth::{AuthService, Claims};
pub use seed::seed_demo_user;
pub use session::{Flash, SESSION_COOKIE};
