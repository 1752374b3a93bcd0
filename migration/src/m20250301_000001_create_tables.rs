use sea_orm_migration::prelude::*;

// 只建索引，不建外键：删除班级不级联，孤儿行在两种存储中表现一致
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(AppUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppUser::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppUser::Username)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AppUser::Name).string_len(32).not_null())
                    .col(
                        ColumnDef::new(AppUser::Email)
                            .string_len(254)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AppUser::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(Class::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Class::ClassId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Class::OwnerId).string().not_null())
                    .col(ColumnDef::new(Class::Name).string_len(20).not_null())
                    .col(ColumnDef::new(Class::Description).text().not_null())
                    .col(ColumnDef::new(Class::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建班级成员表，(class_id, user_id) 唯一
        manager
            .create_table(
                Table::create()
                    .table(ClassMember::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ClassMember::ClassId).string().not_null())
                    .col(ColumnDef::new(ClassMember::UserId).string().not_null())
                    .col(ColumnDef::new(ClassMember::Level).string().not_null())
                    .col(
                        ColumnDef::new(ClassMember::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(ClassMember::ClassId)
                            .col(ClassMember::UserId),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建班级任务表
        manager
            .create_table(
                Table::create()
                    .table(ClassTask::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassTask::TaskId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassTask::ClassId).string().not_null())
                    .col(ColumnDef::new(ClassTask::AuthorId).string().not_null())
                    .col(ColumnDef::new(ClassTask::Name).string_len(20).not_null())
                    .col(ColumnDef::new(ClassTask::Description).text().not_null())
                    .col(ColumnDef::new(ClassTask::DueDate).big_integer().not_null())
                    .col(ColumnDef::new(ClassTask::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建班级课表
        manager
            .create_table(
                Table::create()
                    .table(ClassSchedule::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassSchedule::ScheduleId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassSchedule::ClassId).string().not_null())
                    .col(ColumnDef::new(ClassSchedule::AuthorId).string().not_null())
                    .col(
                        ColumnDef::new(ClassSchedule::Name)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassSchedule::StartAt).integer().not_null())
                    .col(ColumnDef::new(ClassSchedule::Duration).integer().not_null())
                    .col(ColumnDef::new(ClassSchedule::Day).small_integer().not_null())
                    .col(
                        ColumnDef::new(ClassSchedule::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_owner_id")
                    .table(Class::Table)
                    .col(Class::OwnerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_member_user_id")
                    .table(ClassMember::Table)
                    .col(ClassMember::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_task_class_id_due_date")
                    .table(ClassTask::Table)
                    .col(ClassTask::ClassId)
                    .col(ClassTask::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_schedule_class_id_day")
                    .table(ClassSchedule::Table)
                    .col(ClassSchedule::ClassId)
                    .col(ClassSchedule::Day)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(ClassSchedule::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassTask::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Class::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AppUser::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum AppUser {
    #[sea_orm(iden = "app_user")]
    Table,
    UserId,
    Username,
    Name,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Class {
    #[sea_orm(iden = "class")]
    Table,
    ClassId,
    OwnerId,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ClassMember {
    #[sea_orm(iden = "class_member")]
    Table,
    ClassId,
    UserId,
    Level,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ClassTask {
    #[sea_orm(iden = "class_task")]
    Table,
    TaskId,
    ClassId,
    AuthorId,
    Name,
    Description,
    DueDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ClassSchedule {
    #[sea_orm(iden = "class_schedule")]
    Table,
    ScheduleId,
    ClassId,
    AuthorId,
    Name,
    StartAt,
    Duration,
    Day,
    CreatedAt,
}
