pub mod admin;
pub mod campaign;
pub mod history;
pub mod prize;
pub mod spin;

pub use admin::admin_config;
pub use campaign::campaign_config;
pub use history::history_config;
pub use prize::prize_config;
pub use spin::spin_config;
