use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010004_create_grades"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("grades"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).string_len(24).not_null().primary_key())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("configured")).boolean().not_null().default(false))
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("grade_ranges"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).string_len(24).not_null().primary_key())
                    .col(ColumnDef::new(Alias::new("grade_id")).string_len(24).not_null())
                    .col(ColumnDef::new(Alias::new("label")).string().not_null())
                    .col(ColumnDef::new(Alias::new("start_range")).double().not_null())
                    .col(ColumnDef::new(Alias::new("end_range")).double().not_null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("grade_ranges"), Alias::new("grade_id"))
                            .to(Alias::new("grades"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("grade_ranges")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("grades")).to_owned())
            .await
    }
}
