//! The module contains the `Debt` struct and its entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::MoneyCents;

/// A directed IOU: `debtor` owes `creditor` a positive amount.
///
/// At most one row exists per ordered (debtor, creditor) pair (unique
/// index); a debt settled down to exactly zero is deleted, never stored.
/// The auto-increment `id` doubles as the creation-order sequence number:
/// settlement always walks a debtor's rows by ascending `id`, so the oldest
/// debt is paid first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debt {
    pub id: i32,
    pub debtor: String,
    pub creditor: String,
    pub amount: MoneyCents,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub debtor: String,
    pub creditor: String,
    pub amount: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Debtor",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DebtorUser,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Debt {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            debtor: model.debtor,
            creditor: model.creditor,
            amount: MoneyCents::new(model.amount),
            created_at: model.created_at,
        }
    }
}

impl From<&Debt> for ActiveModel {
    fn from(value: &Debt) -> Self {
        Self {
            id: ActiveValue::Set(value.id),
            debtor: ActiveValue::Set(value.debtor.clone()),
            creditor: ActiveValue::Set(value.creditor.clone()),
            amount: ActiveValue::Set(value.amount.cents()),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}
