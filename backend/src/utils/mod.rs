pub mod cookies;
pub mod jwt;
pub mod password;
pub mod uploads;

pub use cookies::*;
pub use jwt::*;
pub use password::*;
