//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Tally:
//!
//! - `users`: identity plus the active-session flag
//! - `balances`: one spendable balance (and owed-total aggregate) per user
//! - `debts`: directed IOU edges between users; the auto-increment id is
//!   the creation-order sequence used for FIFO settlement

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    LoggedIn,
}

#[derive(Iden)]
enum Balances {
    Table,
    Username,
    Amount,
    OwedTotal,
}

#[derive(Iden)]
enum Debts {
    Table,
    Id,
    Debtor,
    Creditor,
    Amount,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::LoggedIn)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Balances
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Balances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Balances::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Balances::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Balances::OwedTotal)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-balances-username")
                            .from(Balances::Table, Balances::Username)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Debts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Debts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Debts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Debts::Debtor).string().not_null())
                    .col(ColumnDef::new(Debts::Creditor).string().not_null())
                    .col(ColumnDef::new(Debts::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Debts::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-debts-debtor")
                            .from(Debts::Table, Debts::Debtor)
                            .to(Users::Table, Users::Username),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-debts-creditor")
                            .from(Debts::Table, Debts::Creditor)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        // One edge per ordered (debtor, creditor) pair.
        manager
            .create_index(
                Index::create()
                    .name("idx-debts-debtor-creditor-unique")
                    .table(Debts::Table)
                    .col(Debts::Debtor)
                    .col(Debts::Creditor)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Settlement walks a debtor's edges in id order.
        manager
            .create_index(
                Index::create()
                    .name("idx-debts-debtor")
                    .table(Debts::Table)
                    .col(Debts::Debtor)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Debts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Balances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
