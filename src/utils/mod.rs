pub mod csv;
pub mod mask;
pub mod password;
pub mod session;

pub use mask::mask_phone;
pub use password::{hash_password, verify_password};
pub use session::{SessionClaims, SessionService};
