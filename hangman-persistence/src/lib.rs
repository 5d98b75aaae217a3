pub mod connection;
pub mod entities;
pub mod ledger;
pub mod memory;
pub mod repositories;

pub use ledger::{PersistenceError, ScoreLedger};
pub use memory::InMemoryLedger;
pub use repositories::PlayerRepository;
