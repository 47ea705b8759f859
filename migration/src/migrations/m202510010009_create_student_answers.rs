use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010009_create_student_answers"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("student_answers"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).string_len(24).not_null().primary_key())
                    .col(ColumnDef::new(Alias::new("user_id")).string_len(24).not_null())
                    .col(ColumnDef::new(Alias::new("question_id")).string_len(24).not_null())
                    .col(ColumnDef::new(Alias::new("student_answer")).text().not_null())
                    .col(ColumnDef::new(Alias::new("formatted_answer")).text())
                    .col(ColumnDef::new(Alias::new("first_score")).double())
                    .col(ColumnDef::new(Alias::new("second_score")).double())
                    .col(ColumnDef::new(Alias::new("first_score_feedback")).text())
                    .col(ColumnDef::new(Alias::new("second_score_feedback")).text())
                    .col(ColumnDef::new(Alias::new("human_assess_remarks")).text())
                    .col(ColumnDef::new(Alias::new("is_marked")).boolean().not_null().default(false))
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("student_answers"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("student_answers"), Alias::new("question_id"))
                            .to(Alias::new("questions"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Frozen copies: no foreign keys so they outlive their sources.
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("archived_student_answers"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).string_len(24).not_null().primary_key())
                    .col(ColumnDef::new(Alias::new("original_id")).string_len(24).not_null())
                    .col(ColumnDef::new(Alias::new("user_id")).string_len(24).not_null())
                    .col(ColumnDef::new(Alias::new("question_id")).string_len(24).not_null())
                    .col(ColumnDef::new(Alias::new("student_answer")).text().not_null())
                    .col(ColumnDef::new(Alias::new("formatted_answer")).text())
                    .col(ColumnDef::new(Alias::new("first_score")).double())
                    .col(ColumnDef::new(Alias::new("second_score")).double())
                    .col(ColumnDef::new(Alias::new("first_score_feedback")).text())
                    .col(ColumnDef::new(Alias::new("second_score_feedback")).text())
                    .col(ColumnDef::new(Alias::new("human_assess_remarks")).text())
                    .col(ColumnDef::new(Alias::new("is_marked")).boolean().not_null().default(false))
                    .col(ColumnDef::new(Alias::new("answered_at")).timestamp().not_null())
                    .col(ColumnDef::new(Alias::new("archived_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("archived_student_answers")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("student_answers")).to_owned())
            .await
    }
}
