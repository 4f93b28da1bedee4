pub mod ledger;
pub mod rank;
pub mod rejection;
pub mod turn;
pub mod word;

pub use ledger::TurnLedger;
pub use rank::{rank_of, Grade, Rank};
pub use rejection::Rejection;
pub use turn::{Match, Placement, Turn};
pub use word::{Word, MIN_WORD_LEN};
