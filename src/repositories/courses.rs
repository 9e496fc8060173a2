use sqlx::PgPool;

use crate::db::models::{Chapter, InternshipCourse};

const COURSE_COLUMNS: &str = "id, internship_id, title, description, course_code";

const CHAPTER_COLUMNS: &str = "\
    id, title, topics, chapter_order, video_url, ppt_url, pdf_url, \
    live_class_url, recorded_class_url, class_docs_url, reference_doc_url";

pub(crate) async fn find_course(
    pool: &PgPool,
    internship_id: &str,
    course_id: &str,
) -> Result<Option<InternshipCourse>, sqlx::Error> {
    sqlx::query_as::<_, InternshipCourse>(&format!(
        "SELECT {COURSE_COLUMNS} FROM internship_courses
         WHERE internship_id = $1 AND id = $2",
    ))
    .bind(internship_id)
    .bind(course_id)
    .fetch_optional(pool)
    .await
}

/// Chapters in presentation order: explicit order first, then insertion
/// order for rows that never got one.
pub(crate) async fn list_chapters(
    pool: &PgPool,
    internship_id: &str,
    course_id: &str,
) -> Result<Vec<Chapter>, sqlx::Error> {
    sqlx::query_as::<_, Chapter>(&format!(
        "SELECT {CHAPTER_COLUMNS} FROM chapters
         WHERE internship_id = $1 AND course_id = $2
         ORDER BY chapter_order ASC NULLS LAST, created_at ASC, id ASC",
    ))
    .bind(internship_id)
    .bind(course_id)
    .fetch_all(pool)
    .await
}
