pub mod auth;
pub mod campaign;
pub mod common;
pub mod import;
pub mod prize;
pub mod spin;
pub mod winner;

pub use auth::*;
pub use campaign::*;
pub use common::*;
pub use import::*;
pub use prize::*;
pub use spin::*;
pub use winner::*;
