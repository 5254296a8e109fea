pub mod campaigns;
pub mod entries;
pub mod people;
pub mod preset_assignments;
pub mod prizes;
pub mod winners;

pub use campaigns as campaign_entity;
pub use entries as entry_entity;
pub use people as person_entity;
pub use preset_assignments as preset_assignment_entity;
pub use prizes as prize_entity;
pub use winners as winner_entity;

pub use prizes::PrizeMode;
