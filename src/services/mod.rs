pub mod auth_service;
pub mod campaign_service;
pub mod history_service;
pub mod import_service;
pub mod prize_service;

pub use auth_service::*;
pub use campaign_service::*;
pub use history_service::*;
pub use import_service::*;
pub use prize_service::*;
