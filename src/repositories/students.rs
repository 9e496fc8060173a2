use sqlx::PgPool;

use crate::db::models::StudentProfile;

const PROFILE_COLUMNS: &str = "id, uid, full_name, chapter_access";

pub(crate) async fn find_by_id(
    pool: &PgPool,
    student_id: &str,
) -> Result<Option<StudentProfile>, sqlx::Error> {
    sqlx::query_as::<_, StudentProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM students WHERE id = $1",
    ))
    .bind(student_id)
    .fetch_optional(pool)
    .await
}

/// Legacy fallback: some profiles are keyed by an auto id and carry the auth
/// identity in a separate `uid` column.
pub(crate) async fn find_by_uid(
    pool: &PgPool,
    uid: &str,
) -> Result<Option<StudentProfile>, sqlx::Error> {
    sqlx::query_as::<_, StudentProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM students WHERE uid = $1 ORDER BY id ASC LIMIT 1",
    ))
    .bind(uid)
    .fetch_optional(pool)
    .await
}
