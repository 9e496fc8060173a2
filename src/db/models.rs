use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::PrimitiveDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) username: String,
    pub(crate) hashed_password: String,
    pub(crate) full_name: String,
    /// Stored as text; parsed into [`crate::db::types::ViewerRole`] with a
    /// student fallback for unknown values.
    pub(crate) role: String,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct InternshipCourse {
    pub(crate) id: String,
    pub(crate) internship_id: String,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) course_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Chapter {
    pub(crate) id: String,
    pub(crate) title: Option<String>,
    pub(crate) topics: Option<String>,
    pub(crate) chapter_order: Option<i32>,
    pub(crate) video_url: Option<String>,
    pub(crate) ppt_url: Option<String>,
    pub(crate) pdf_url: Option<String>,
    pub(crate) live_class_url: Option<String>,
    pub(crate) recorded_class_url: Option<String>,
    pub(crate) class_docs_url: Option<String>,
    pub(crate) reference_doc_url: Option<String>,
}

/// Enrollment row under an internship. `student_id` may be an empty string in
/// legacy data; callers must skip those.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct EnrolledStudent {
    pub(crate) id: String,
    pub(crate) student_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct StudentProfile {
    pub(crate) id: String,
    pub(crate) uid: Option<String>,
    pub(crate) full_name: String,
    /// Map from course id to the array of unlocked chapter ids. Kept loose
    /// on purpose: malformed entries degrade to "no access".
    pub(crate) chapter_access: Json<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct ProgressTest {
    pub(crate) id: String,
    pub(crate) course_id: String,
    pub(crate) title: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) day: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct TestSubmission {
    pub(crate) id: String,
    pub(crate) test_id: String,
    pub(crate) student_id: String,
    pub(crate) auto_score: Option<f64>,
    pub(crate) result_status: Option<String>,
    pub(crate) pass_count: Option<i32>,
    pub(crate) total_count: Option<i32>,
    pub(crate) submitted_at: Option<PrimitiveDateTime>,
}
