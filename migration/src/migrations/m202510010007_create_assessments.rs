use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010007_create_assessments"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("assessments"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).string_len(24).not_null().primary_key())
                    .col(ColumnDef::new(Alias::new("course_id")).string_len(24).not_null())
                    .col(ColumnDef::new(Alias::new("file_id")).string_len(24))
                    .col(ColumnDef::new(Alias::new("grade_id")).string_len(24).not_null())
                    .col(ColumnDef::new(Alias::new("ai_model_id")).string_len(24).not_null())
                    .col(ColumnDef::new(Alias::new("name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("assessment_type")).string().not_null())
                    .col(ColumnDef::new(Alias::new("assessment_instruction")).json().not_null())
                    .col(ColumnDef::new(Alias::new("case_study_context")).text().not_null())
                    .col(ColumnDef::new(Alias::new("duration")).string().not_null())
                    .col(ColumnDef::new(Alias::new("duration_seconds")).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assessments_course_file")
                    .table(Alias::new("assessments"))
                    .col(Alias::new("course_id"))
                    .col(Alias::new("file_id"))
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("questions"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).string_len(24).not_null().primary_key())
                    .col(ColumnDef::new(Alias::new("assessment_id")).string_len(24).not_null())
                    .col(ColumnDef::new(Alias::new("position")).integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("question_number")).string().not_null())
                    .col(ColumnDef::new(Alias::new("question")).text().not_null())
                    .col(ColumnDef::new(Alias::new("question_instruction")).text().not_null().default(""))
                    .col(ColumnDef::new(Alias::new("suggested_answer")).json().not_null())
                    .col(ColumnDef::new(Alias::new("comparison_instruction")).text().not_null().default(""))
                    .col(ColumnDef::new(Alias::new("comparison_count")).integer().not_null().default(0))
                    .col(ColumnDef::new(Alias::new("temperature")).double().not_null().default(0.0))
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("questions"), Alias::new("assessment_id"))
                            .to(Alias::new("assessments"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("questions")).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("assessments")).to_owned())
            .await
    }
}
