//! Users table (minimal entity).
//!
//! A user is an immutable identity: the case-sensitive `username` is the
//! primary key everywhere else in the schema. `logged_in` tracks the active
//! terminal session; the first successful login creates the row together
//! with its zero [`Balance`](crate::Balance).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub logged_in: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::balances::Entity")]
    Balance,
}

impl Related<super::balances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Balance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
