use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010005_create_ai_models"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("ai_models"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).string_len(24).not_null().primary_key())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("provider")).string().not_null())
                    .col(ColumnDef::new(Alias::new("first_model")).string().not_null())
                    .col(ColumnDef::new(Alias::new("second_model")).string().not_null())
                    .col(ColumnDef::new(Alias::new("first_weight")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("second_weight")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("ai_models")).to_owned())
            .await
    }
}
