use crate::{
    entities::{courses, enrollments, reviews},
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use log::info;
use models::catalog::{Category, Level};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, sea_query::LikeExpr,
};
use uuid::Uuid;

/// Optional filters for the course listing
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub category: Option<Category>,
    pub level: Option<Level>,
    /// Substring matched against title and description
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub duration_weeks: i32,
    pub level: Level,
    pub instructor: String,
    pub price_cents: i64,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

/// A partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub duration_weeks: Option<i32>,
    pub level: Option<Level>,
    pub instructor: Option<String>,
    pub price_cents: Option<i64>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

pub struct CourseService;

const LIKE_ESCAPE: char = '!';

/// Wraps a search term in `%` so it matches as a literal substring
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl CourseService {
    /// Query courses with pagination and filtering, newest first
    ///
    /// `page` is 1-based. Returns the requested page and the total number of
    /// matching courses.
    pub async fn list_courses(
        db: &DatabaseConnection,
        filter: CourseFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<courses::Model>, u64), DbErr> {
        let mut condition = Condition::all();

        if let Some(category) = filter.category {
            condition = condition.add(courses::Column::Category.eq(category));
        }

        if let Some(level) = filter.level {
            condition = condition.add(courses::Column::Level.eq(level));
        }

        if let Some(search) = filter.search
            && !search.trim().is_empty()
        {
            let pattern = like_pattern(search.trim());
            let search_condition = Condition::any()
                .add(
                    courses::Column::Title.like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
                )
                .add(courses::Column::Description.like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)));
            condition = condition.add(search_condition);
        }

        let query = courses::Entity::find()
            .filter(condition)
            .order_by_desc(courses::Column::CreatedAt)
            .order_by_asc(courses::Column::Id);

        let total_items = query.clone().count(db).await?;

        // Pages past the end, including offsets too large for the driver, are empty
        let offset = page
            .saturating_sub(1)
            .checked_mul(per_page)
            .filter(|offset| *offset < total_items);
        let Some(offset) = offset else {
            return Ok((Vec::new(), total_items));
        };

        let courses = query.offset(offset).limit(per_page).all(db).await?;

        Ok((courses, total_items))
    }

    pub async fn get_course_by_id(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<Option<courses::Model>, DbErr> {
        courses::Entity::find_by_id(course_id).one(db).await
    }

    pub async fn create_course(
        db: &DatabaseConnection,
        new_course: NewCourse,
    ) -> Result<courses::Model, DbErr> {
        let now = Utc::now();
        let course = courses::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(new_course.title),
            description: Set(new_course.description),
            category: Set(new_course.category),
            duration_weeks: Set(new_course.duration_weeks),
            level: Set(new_course.level),
            instructor: Set(new_course.instructor),
            rating: Set(0.0),
            review_count: Set(0),
            price_cents: Set(new_course.price_cents),
            thumbnail_url: Set(new_course.thumbnail_url),
            video_url: Set(new_course.video_url),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        info!("Created course {} ({})", course.id, course.title);
        Ok(course)
    }

    pub async fn update_course(
        db: &DatabaseConnection,
        course_id: Uuid,
        changes: CourseChanges,
    ) -> ServiceResult<courses::Model> {
        let course = courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or(ServiceError::NotFound("course"))?;

        let mut active: courses::ActiveModel = course.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        if let Some(duration_weeks) = changes.duration_weeks {
            active.duration_weeks = Set(duration_weeks);
        }
        if let Some(level) = changes.level {
            active.level = Set(level);
        }
        if let Some(instructor) = changes.instructor {
            active.instructor = Set(instructor);
        }
        if let Some(price_cents) = changes.price_cents {
            active.price_cents = Set(price_cents);
        }
        if let Some(thumbnail_url) = changes.thumbnail_url {
            active.thumbnail_url = Set(Some(thumbnail_url).filter(|url| !url.is_empty()));
        }
        if let Some(video_url) = changes.video_url {
            active.video_url = Set(Some(video_url).filter(|url| !url.is_empty()));
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(db).await?)
    }

    /// Deletes a course together with its enrollments and reviews
    pub async fn delete_course(db: &DatabaseConnection, course_id: Uuid) -> ServiceResult<()> {
        let txn = db.begin().await?;

        let course = courses::Entity::find_by_id(course_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("course"))?;

        reviews::Entity::delete_many()
            .filter(reviews::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await?;
        enrollments::Entity::delete_many()
            .filter(enrollments::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await?;
        course.delete(&txn).await?;

        txn.commit().await?;
        info!("Deleted course {course_id}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Rust"), "%Rust%");
        assert_eq!(like_pattern("100%"), "%100!%%");
        assert_eq!(like_pattern("R_st"), "%R!_st%");
        assert_eq!(like_pattern("Wow!"), "%Wow!!%");
        assert_eq!(like_pattern(r"C:\dir"), r"%C:\dir%");
    }
}
