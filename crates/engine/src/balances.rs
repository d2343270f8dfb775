//! The module contains the `Balance` struct and its entity.

use sea_orm::entity::{ActiveValue, prelude::*};

use crate::{EngineError, MoneyCents, ResultEngine};

/// A user's spendable balance plus the owed-total aggregate.
///
/// `amount` never rests below zero. `owed_total` is the cached sum of all
/// debt edges where this user is the debtor; it is re-derived and asserted
/// against the debt rows at the end of every operation that touches debts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Balance {
    pub username: String,
    pub amount: MoneyCents,
    pub owed_total: MoneyCents,
}

impl Balance {
    pub fn new(username: String) -> Self {
        Self {
            username,
            amount: MoneyCents::ZERO,
            owed_total: MoneyCents::ZERO,
        }
    }

    /// Adds `amount` to the balance. Accepts zero (a no-op), rejects
    /// negative amounts.
    pub fn credit(&mut self, amount: MoneyCents) -> ResultEngine<()> {
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "credit amount must not be negative".to_string(),
            ));
        }
        self.amount += amount;
        Ok(())
    }

    /// Subtracts `amount` from the balance, failing with
    /// [`EngineError::InsufficientFunds`] when the balance cannot cover it.
    pub fn debit(&mut self, amount: MoneyCents) -> ResultEngine<()> {
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "debit amount must not be negative".to_string(),
            ));
        }
        if self.amount < amount {
            return Err(EngineError::InsufficientFunds(self.username.clone()));
        }
        self.amount -= amount;
        Ok(())
    }

    /// Subtracts `amount` when the caller has already proven sufficiency.
    ///
    /// The settlement paths use this after computing how much can actually
    /// move; reaching below zero here means that computation was wrong, so
    /// it is an [`EngineError::Invariant`], not a user error.
    pub fn force_debit(&mut self, amount: MoneyCents) -> ResultEngine<()> {
        if self.amount < amount {
            return Err(EngineError::Invariant(format!(
                "force_debit of {amount} would overdraw {} (balance {})",
                self.username, self.amount
            )));
        }
        self.amount -= amount;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "balances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub amount: i64,
    pub owed_total: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Username",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Balance {
    fn from(model: Model) -> Self {
        Self {
            username: model.username,
            amount: MoneyCents::new(model.amount),
            owed_total: MoneyCents::new(model.owed_total),
        }
    }
}

impl From<&Balance> for ActiveModel {
    fn from(value: &Balance) -> Self {
        Self {
            username: ActiveValue::Set(value.username.clone()),
            amount: ActiveValue::Set(value.amount.cents()),
            owed_total: ActiveValue::Set(value.owed_total.cents()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(cents: i64) -> Balance {
        Balance {
            username: "alice".to_string(),
            amount: MoneyCents::new(cents),
            owed_total: MoneyCents::ZERO,
        }
    }

    #[test]
    fn credit_and_debit() {
        let mut bal = balance(0);
        bal.credit(MoneyCents::new(1000)).unwrap();
        assert_eq!(bal.amount.cents(), 1000);
        bal.debit(MoneyCents::new(400)).unwrap();
        assert_eq!(bal.amount.cents(), 600);
    }

    #[test]
    fn debit_rejects_overdraw() {
        let mut bal = balance(300);
        let err = bal.debit(MoneyCents::new(301)).unwrap_err();
        assert_eq!(err, EngineError::InsufficientFunds("alice".to_string()));
        assert_eq!(bal.amount.cents(), 300);
    }

    #[test]
    fn force_debit_to_exactly_zero() {
        let mut bal = balance(500);
        bal.force_debit(MoneyCents::new(500)).unwrap();
        assert!(bal.amount.is_zero());
    }

    #[test]
    fn force_debit_below_zero_is_invariant_violation() {
        let mut bal = balance(100);
        assert!(matches!(
            bal.force_debit(MoneyCents::new(101)),
            Err(EngineError::Invariant(_))
        ));
    }
}
