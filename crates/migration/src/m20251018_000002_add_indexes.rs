use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Course listing filters
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_category_level")
                    .table(Courses::Table)
                    .col(Courses::Category)
                    .col(Courses::Level)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_created_at")
                    .table(Courses::Table)
                    .col(Courses::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // A user enrolls in (and reviews) a course at most once
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_user_course")
                    .table(Enrollments::Table)
                    .col(Enrollments::UserId)
                    .col(Enrollments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_user_course")
                    .table(Reviews::Table)
                    .col(Reviews::UserId)
                    .col(Reviews::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Per-course lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_course_id")
                    .table(Reviews::Table)
                    .col(Reviews::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_reviews_course_id",
            "idx_enrollments_course_id",
            "idx_reviews_user_course",
            "idx_enrollments_user_course",
            "idx_courses_created_at",
            "idx_courses_category_level",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Category,
    Level,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    UserId,
    CourseId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    UserId,
    CourseId,
}
