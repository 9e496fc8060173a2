use sqlx::PgPool;

use crate::db::models::EnrolledStudent;

pub(crate) async fn list_for_internship(
    pool: &PgPool,
    internship_id: &str,
) -> Result<Vec<EnrolledStudent>, sqlx::Error> {
    sqlx::query_as::<_, EnrolledStudent>(
        "SELECT id, student_id FROM internship_students
         WHERE internship_id = $1
         ORDER BY joined_at ASC, id ASC",
    )
    .bind(internship_id)
    .fetch_all(pool)
    .await
}
