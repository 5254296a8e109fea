pub mod catalog;
pub mod engine;
pub mod ledger;
pub mod preset;
pub mod registry;
pub mod reveal;
pub mod rng;

pub use catalog::{PrizeCatalog, PrizeUsage};
pub use engine::{DrawEngine, SpinOutcome, SpinWinner};
pub use ledger::WinnerLedger;
pub use preset::PresetResolver;
pub use registry::EntryRegistry;
pub use reveal::{RevealFrame, RevealPhase, RevealSchedule, RevealSequencer};
pub use rng::{RandomSource, SeededRandom, ThreadRandom};
