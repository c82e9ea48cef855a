use crate::{
    entities::{courses, enrollments},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use log::info;
use models::progress::Progress;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls a user in a course with zero progress
    pub async fn enroll(
        db: &DatabaseConnection,
        user_id: Uuid,
        course_id: Uuid,
    ) -> ServiceResult<enrollments::Model> {
        if courses::Entity::find_by_id(course_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound("course"));
        }

        if Self::find(db, user_id, course_id).await?.is_some() {
            return Err(ServiceError::Conflict(
                "already enrolled in this course".to_string(),
            ));
        }

        let enrollment = enrollments::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            course_id: Set(course_id),
            enrolled_at: Set(Utc::now()),
            completed_at: Set(None),
            progress: Set(Progress::MIN.as_i16()),
        }
        .insert(db)
        .await?;

        info!("User {user_id} enrolled in course {course_id}");
        Ok(enrollment)
    }

    pub async fn find(
        db: &DatabaseConnection,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<enrollments::Model>, DbErr> {
        enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id))
            .filter(enrollments::Column::CourseId.eq(course_id))
            .one(db)
            .await
    }

    /// Records progress; reaching 100 marks the enrollment complete and
    /// dropping below it clears the completion time
    pub async fn update_progress(
        db: &DatabaseConnection,
        user_id: Uuid,
        course_id: Uuid,
        progress: Progress,
    ) -> ServiceResult<enrollments::Model> {
        let enrollment = Self::find(db, user_id, course_id)
            .await?
            .ok_or(ServiceError::NotFound("enrollment"))?;

        let completed_at = match (progress.is_complete(), enrollment.completed_at) {
            (true, Some(already)) => Some(already),
            (true, None) => Some(Utc::now()),
            (false, _) => None,
        };

        let mut active: enrollments::ActiveModel = enrollment.into();
        active.progress = Set(progress.as_i16());
        active.completed_at = Set(completed_at);

        Ok(active.update(db).await?)
    }

    /// All enrollments of a user with their courses, most recent first
    pub async fn list_for_user(
        db: &DatabaseConnection,
        user_id: Uuid,
    ) -> Result<Vec<(enrollments::Model, Option<courses::Model>)>, DbErr> {
        enrollments::Entity::find()
            .filter(enrollments::Column::UserId.eq(user_id))
            .order_by_desc(enrollments::Column::EnrolledAt)
            .find_also_related(courses::Entity)
            .all(db)
            .await
    }
}
