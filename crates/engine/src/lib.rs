//! Ledger & settlement engine for Tally.
//!
//! The engine keeps per-user balances and a graph of pairwise IOUs. A
//! transfer that exceeds the sender's balance records the shortfall as a
//! debt to the recipient; later deposits and transfers settle outstanding
//! debts automatically, oldest first, including chained settlement across
//! third parties. Every operation runs inside a single sea-orm transaction
//! so partial effects never become visible.

pub use balances::Balance;
pub use debts::Debt;
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder};
pub use outcome::{
    DepositOutcome, LoginOutcome, OwedEntry, TransferOutcome, WithdrawOutcome,
};

mod balances;
mod debts;
mod error;
mod money;
mod ops;
mod outcome;
mod users;

pub type ResultEngine<T> = Result<T, EngineError>;
