use database::{
    ServiceError,
    db::create_connection,
    entities::{enrollments, reviews},
    services::{
        course::{CourseChanges, CourseFilter, CourseService, NewCourse},
        enrollment::EnrollmentService,
        review::ReviewService,
        user::{NewUser, ProfileChanges, UserService},
    },
};
use migration::{Migrator, MigratorTrait};
use models::{
    catalog::{Category, Level},
    progress::{Progress, Rating},
    role::Role,
};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use uuid::Uuid;

async fn setup() -> DatabaseConnection {
    let db = create_connection("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn new_user(email: &str, username: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        username: username.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        role: Role::Student,
        display_name: None,
    }
}

fn new_course(title: &str, category: Category, level: Level) -> NewCourse {
    NewCourse {
        title: title.to_string(),
        description: format!("All about {title}"),
        category,
        duration_weeks: 6,
        level,
        instructor: "Grace Hopper".to_string(),
        price_cents: 4900,
        thumbnail_url: None,
        video_url: None,
    }
}

#[tokio::test]
async fn test_create_user_normalizes_email_and_rejects_duplicates() {
    let db = setup().await;

    let user = UserService::create_user(&db, new_user("  Ada@Example.com", "ada"))
        .await
        .unwrap();
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.role, Role::Student);

    let found = UserService::find_by_email(&db, "ADA@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, user.id);

    let duplicate_email = UserService::create_user(&db, new_user("ada@example.com", "other")).await;
    assert!(matches!(duplicate_email, Err(ServiceError::Conflict(_))));

    let duplicate_username = UserService::create_user(&db, new_user("new@example.com", "ada")).await;
    assert!(matches!(duplicate_username, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn test_update_profile() {
    let db = setup().await;
    let ada = UserService::create_user(&db, new_user("ada@example.com", "ada"))
        .await
        .unwrap();
    UserService::create_user(&db, new_user("bob@example.com", "bob"))
        .await
        .unwrap();

    let taken = UserService::update_profile(
        &db,
        ada.id,
        ProfileChanges {
            username: Some("bob".to_string()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(taken, Err(ServiceError::Conflict(_))));

    let updated = UserService::update_profile(
        &db,
        ada.id,
        ProfileChanges {
            display_name: Some("Ada Lovelace".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.display_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(updated.username, "ada");

    let cleared = UserService::update_profile(
        &db,
        ada.id,
        ProfileChanges {
            display_name: Some("   ".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(cleared.display_name, None);

    let missing = UserService::update_profile(&db, Uuid::new_v4(), ProfileChanges::default()).await;
    assert!(matches!(missing, Err(ServiceError::NotFound("user"))));
}

#[tokio::test]
async fn test_list_courses_filters_and_paginates() {
    let db = setup().await;
    CourseService::create_course(&db, new_course("Rust Basics", Category::Student, Level::Beginner))
        .await
        .unwrap();
    CourseService::create_course(&db, new_course("Scratch Games", Category::Kids, Level::Beginner))
        .await
        .unwrap();
    CourseService::create_course(&db, new_course("Async Rust", Category::Student, Level::Advanced))
        .await
        .unwrap();

    let (all, total) = CourseService::list_courses(&db, CourseFilter::default(), 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(all.len(), 3);

    let kids = CourseFilter {
        category: Some(Category::Kids),
        ..Default::default()
    };
    let (courses, total) = CourseService::list_courses(&db, kids, 1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(courses[0].title, "Scratch Games");

    let student_beginner = CourseFilter {
        category: Some(Category::Student),
        level: Some(Level::Beginner),
        ..Default::default()
    };
    let (courses, _) = CourseService::list_courses(&db, student_beginner, 1, 10)
        .await
        .unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].title, "Rust Basics");

    let search = CourseFilter {
        search: Some("Rust".to_string()),
        ..Default::default()
    };
    let (_, total) = CourseService::list_courses(&db, search, 1, 10).await.unwrap();
    assert_eq!(total, 2);

    let (first_page, total) = CourseService::list_courses(&db, CourseFilter::default(), 1, 2)
        .await
        .unwrap();
    let (second_page, _) = CourseService::list_courses(&db, CourseFilter::default(), 2, 2)
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(first_page.len(), 2);
    assert_eq!(second_page.len(), 1);
    assert!(first_page.iter().all(|c| c.id != second_page[0].id));
}

#[tokio::test]
async fn test_update_course_is_partial() {
    let db = setup().await;
    let course = CourseService::create_course(&db, new_course("Rust", Category::Student, Level::Beginner))
        .await
        .unwrap();

    let updated = CourseService::update_course(
        &db,
        course.id,
        CourseChanges {
            level: Some(Level::Intermediate),
            price_cents: Some(0),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.level, Level::Intermediate);
    assert_eq!(updated.price_cents, 0);
    assert_eq!(updated.title, "Rust");
    assert!(updated.updated_at >= course.updated_at);

    let missing = CourseService::update_course(&db, Uuid::new_v4(), CourseChanges::default()).await;
    assert!(matches!(missing, Err(ServiceError::NotFound("course"))));
}

#[tokio::test]
async fn test_list_courses_past_last_page() {
    let db = setup().await;
    CourseService::create_course(&db, new_course("Rust Basics", Category::Student, Level::Beginner))
        .await
        .unwrap();

    for page in [2, 100_000_000_000_000_000, u64::MAX] {
        let (courses, total) = CourseService::list_courses(&db, CourseFilter::default(), page, 100)
            .await
            .unwrap();
        assert!(courses.is_empty(), "page {page} should be empty");
        assert_eq!(total, 1);
    }
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let db = setup().await;
    CourseService::create_course(&db, new_course("Rust", Category::Student, Level::Beginner))
        .await
        .unwrap();
    CourseService::create_course(&db, new_course("100% Python", Category::Student, Level::Beginner))
        .await
        .unwrap();

    let search_for = |term: &str| CourseFilter {
        search: Some(term.to_string()),
        ..Default::default()
    };
    for term in ["%", "_", "R_st", "!"] {
        let (_, total) = CourseService::list_courses(&db, search_for(term), 1, 10).await.unwrap();
        let expected = u64::from(term == "%");
        assert_eq!(total, expected, "search {term:?}");
    }
}

#[tokio::test]
async fn test_progress_is_clamped_and_tracks_completion() {
    let db = setup().await;
    let user = UserService::create_user(&db, new_user("ada@example.com", "ada"))
        .await
        .unwrap();
    let course = CourseService::create_course(&db, new_course("Rust", Category::Student, Level::Beginner))
        .await
        .unwrap();

    let enrollment = EnrollmentService::enroll(&db, user.id, course.id).await.unwrap();
    assert_eq!(enrollment.progress, 0);
    assert!(enrollment.completed_at.is_none());

    let again = EnrollmentService::enroll(&db, user.id, course.id).await;
    assert!(matches!(again, Err(ServiceError::Conflict(_))));

    let done = EnrollmentService::update_progress(&db, user.id, course.id, Progress::clamped(150))
        .await
        .unwrap();
    assert_eq!(done.progress, 100);
    assert!(done.completed_at.is_some());

    let reopened = EnrollmentService::update_progress(&db, user.id, course.id, Progress::clamped(40))
        .await
        .unwrap();
    assert_eq!(reopened.progress, 40);
    assert!(reopened.completed_at.is_none());

    let not_enrolled =
        EnrollmentService::update_progress(&db, Uuid::new_v4(), course.id, Progress::MAX).await;
    assert!(matches!(not_enrolled, Err(ServiceError::NotFound("enrollment"))));

    let listed = EnrollmentService::list_for_user(&db, user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].1.as_ref().map(|c| c.id), Some(course.id));
}

#[tokio::test]
async fn test_reviews_require_enrollment_and_update_rating() {
    let db = setup().await;
    let ada = UserService::create_user(&db, new_user("ada@example.com", "ada"))
        .await
        .unwrap();
    let bob = UserService::create_user(&db, new_user("bob@example.com", "bob"))
        .await
        .unwrap();
    let course = CourseService::create_course(&db, new_course("Rust", Category::Student, Level::Beginner))
        .await
        .unwrap();

    let unenrolled = ReviewService::create_review(
        &db,
        ada.id,
        course.id,
        Rating::new(5).unwrap(),
        "Great".to_string(),
    )
    .await;
    assert!(matches!(unenrolled, Err(ServiceError::Forbidden(_))));

    EnrollmentService::enroll(&db, ada.id, course.id).await.unwrap();
    EnrollmentService::enroll(&db, bob.id, course.id).await.unwrap();

    ReviewService::create_review(&db, ada.id, course.id, Rating::new(5).unwrap(), "Great".to_string())
        .await
        .unwrap();
    ReviewService::create_review(&db, bob.id, course.id, Rating::new(2).unwrap(), "Meh".to_string())
        .await
        .unwrap();

    let twice = ReviewService::create_review(
        &db,
        ada.id,
        course.id,
        Rating::new(1).unwrap(),
        "Changed my mind".to_string(),
    )
    .await;
    assert!(matches!(twice, Err(ServiceError::Conflict(_))));

    let course = CourseService::get_course_by_id(&db, course.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(course.review_count, 2);
    assert_eq!(course.rating, 3.5);

    let listed = ReviewService::list_for_course(&db, course.id).await.unwrap();
    assert_eq!(listed.len(), 2);

    let missing = ReviewService::list_for_course(&db, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(ServiceError::NotFound("course"))));
}

#[tokio::test]
async fn test_delete_course_removes_dependents() {
    let db = setup().await;
    let ada = UserService::create_user(&db, new_user("ada@example.com", "ada"))
        .await
        .unwrap();
    let course = CourseService::create_course(&db, new_course("Rust", Category::Student, Level::Beginner))
        .await
        .unwrap();
    EnrollmentService::enroll(&db, ada.id, course.id).await.unwrap();
    ReviewService::create_review(&db, ada.id, course.id, Rating::new(4).unwrap(), "Good".to_string())
        .await
        .unwrap();

    CourseService::delete_course(&db, course.id).await.unwrap();

    assert!(CourseService::get_course_by_id(&db, course.id).await.unwrap().is_none());
    assert_eq!(enrollments::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(reviews::Entity::find().count(&db).await.unwrap(), 0);

    let again = CourseService::delete_course(&db, course.id).await;
    assert!(matches!(again, Err(ServiceError::NotFound("course"))));
}
