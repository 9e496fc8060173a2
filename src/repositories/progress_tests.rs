use sqlx::PgPool;

use crate::db::models::{ProgressTest, TestSubmission};

const TEST_COLUMNS: &str = "id, course_id, title, name, day";

const SUBMISSION_COLUMNS: &str = "\
    id, test_id, student_id, auto_score, result_status, pass_count, total_count, submitted_at";

/// All queries here run against the delivery pool, never the primary one.
pub(crate) async fn list_for_course(
    pool: &PgPool,
    course_id: &str,
) -> Result<Vec<ProgressTest>, sqlx::Error> {
    sqlx::query_as::<_, ProgressTest>(&format!(
        "SELECT {TEST_COLUMNS} FROM progress_tests WHERE course_id = $1 ORDER BY created_at ASC",
    ))
    .bind(course_id)
    .fetch_all(pool)
    .await
}

/// At most one submission per (test, student): first match wins when
/// duplicates exist.
pub(crate) async fn find_submission_for_student(
    pool: &PgPool,
    test_id: &str,
    student_id: &str,
) -> Result<Option<TestSubmission>, sqlx::Error> {
    sqlx::query_as::<_, TestSubmission>(&format!(
        "SELECT {SUBMISSION_COLUMNS} FROM progress_test_submissions
         WHERE test_id = $1 AND student_id = $2
         ORDER BY submitted_at ASC NULLS LAST, id ASC
         LIMIT 1",
    ))
    .bind(test_id)
    .bind(student_id)
    .fetch_optional(pool)
    .await
}
