use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiModelConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiModelConfigs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AiModelConfigs::Modality)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiModelConfigs::ProviderId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiModelConfigs::ModelId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AiModelConfigs::SystemPrompt).text())
                    .col(
                        ColumnDef::new(AiModelConfigs::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AiModelConfigs::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 按模态查询默认模型
        manager
            .create_index(
                Index::create()
                    .name("idx_ai_model_configs_modality")
                    .table(AiModelConfigs::Table)
                    .col(AiModelConfigs::Modality)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiModelConfigs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AiModelConfigs {
    Table,
    Id,
    Modality,
    ProviderId,
    ModelId,
    SystemPrompt,
    CreatedAt,
    UpdatedAt,
}
