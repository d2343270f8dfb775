//! Per-operation result values returned by the façade.
//!
//! The ledger rows never carry display annotations; everything a presenter
//! needs (what was transferred, what is still owed and to whom) comes back
//! in these structs, recomputed from the debt rows at the end of the
//! operation. Counterpart lists are ordered by debt creation, so display
//! order is deterministic and matches settlement order.

use crate::MoneyCents;

/// Counterpart name and amount pair, ordered oldest debt first.
pub type OwedEntry = (String, MoneyCents);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginOutcome {
    pub username: String,
    /// `true` when this login created the user (first visit).
    pub created: bool,
    pub balance: MoneyCents,
    /// What this user still owes, per creditor.
    pub owed_to: Vec<OwedEntry>,
    /// What others owe this user, per debtor.
    pub owed_from: Vec<OwedEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositOutcome {
    /// Funds moved straight from the deposit to each creditor, in
    /// settlement (FIFO) order.
    pub settlements: Vec<OwedEntry>,
    /// Final balance after the residual was credited.
    pub balance: MoneyCents,
    /// Debt still outstanding after settlement.
    pub owed_to: Vec<OwedEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawOutcome {
    pub balance: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferOutcome {
    pub target: String,
    /// Amounts reported as transferred, keyed by recipient. Empty when the
    /// transfer was fully netted against a reverse debt.
    pub transfers: Vec<OwedEntry>,
    /// Source's final balance.
    pub balance: MoneyCents,
    /// Source's total outstanding debt after the operation; positive only
    /// when the transfer went short and left the source owing the target.
    pub owed_total: MoneyCents,
    /// What others owe the source, recomputed after the operation.
    pub owed_from: Vec<OwedEntry>,
}
