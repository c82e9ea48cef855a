use crate::{
    entities::{courses, reviews},
    error::{ServiceError, ServiceResult},
    services::enrollment::EnrollmentService,
};
use chrono::Utc;
use futures::try_join;
use log::info;
use models::progress::Rating;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::Expr,
};
use uuid::Uuid;

pub struct ReviewService;

impl ReviewService {
    /// Stores a review from an enrolled user and refreshes the course rating
    pub async fn create_review(
        db: &DatabaseConnection,
        user_id: Uuid,
        course_id: Uuid,
        rating: Rating,
        comment: String,
    ) -> ServiceResult<reviews::Model> {
        if courses::Entity::find_by_id(course_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound("course"));
        }

        if EnrollmentService::find(db, user_id, course_id).await?.is_none() {
            return Err(ServiceError::Forbidden(
                "you must be enrolled in this course to review it".to_string(),
            ));
        }

        let txn = db.begin().await?;

        let existing = reviews::Entity::find()
            .filter(reviews::Column::UserId.eq(user_id))
            .filter(reviews::Column::CourseId.eq(course_id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "you have already reviewed this course".to_string(),
            ));
        }

        let review = reviews::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            course_id: Set(course_id),
            rating: Set(rating.as_i16()),
            comment: Set(comment.trim().to_string()),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        Self::refresh_course_rating(&txn, course_id).await?;
        txn.commit().await?;

        info!("User {user_id} reviewed course {course_id} ({} stars)", review.rating);
        Ok(review)
    }

    /// Reviews for a course, newest first
    pub async fn list_for_course(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> ServiceResult<Vec<reviews::Model>> {
        let (course, reviews) = try_join!(
            courses::Entity::find_by_id(course_id).one(db),
            reviews::Entity::find()
                .filter(reviews::Column::CourseId.eq(course_id))
                .order_by_desc(reviews::Column::CreatedAt)
                .all(db)
        )?;

        match course {
            Some(_) => Ok(reviews),
            None => Err(ServiceError::NotFound("course")),
        }
    }

    /// Recomputes a course's average rating and review count from its reviews
    async fn refresh_course_rating<C>(conn: &C, course_id: Uuid) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let ratings: Vec<i16> = reviews::Entity::find()
            .select_only()
            .column(reviews::Column::Rating)
            .filter(reviews::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(conn)
            .await?;

        let review_count = ratings.len() as i32;
        let average = Rating::average(ratings);

        courses::Entity::update_many()
            .col_expr(courses::Column::Rating, Expr::value(average))
            .col_expr(courses::Column::ReviewCount, Expr::value(review_count))
            .col_expr(courses::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(courses::Column::Id.eq(course_id))
            .exec(conn)
            .await?;

        Ok(())
    }
}
