use serde_json::Value;
use sqlx::PgPool;

use crate::db::models::{StudentProfile, User};
use crate::db::types::ViewerRole;
use crate::repositories;

/// Resolve which chapter ids of a course are unlocked for this viewer.
///
/// Students read their own profile; staff mirror the first enrolled student
/// so trainers preview exactly what that student sees. Every failure path
/// degrades to the empty set: the page falls back to "all locked" instead of
/// erroring out.
pub(crate) async fn resolve_access(
    pool: &PgPool,
    viewer: &User,
    internship_id: &str,
    course_id: &str,
) -> Vec<String> {
    let role = ViewerRole::parse(&viewer.role);

    let resolved = if role.is_staff() {
        resolve_for_staff(pool, internship_id, course_id).await
    } else {
        resolve_for_student(pool, &viewer.id, course_id).await
    };

    match resolved {
        Ok(unlocked) => unlocked,
        Err(err) => {
            tracing::warn!(
                error = %err,
                internship_id,
                course_id,
                role = role.as_str(),
                "Failed to load chapter access; treating all chapters as locked"
            );
            Vec::new()
        }
    }
}

async fn resolve_for_staff(
    pool: &PgPool,
    internship_id: &str,
    course_id: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let enrollments = repositories::enrollments::list_for_internship(pool, internship_id).await?;

    let Some(first) = enrollments.iter().find(|record| !record.student_id.trim().is_empty())
    else {
        return Ok(Vec::new());
    };

    let Some(profile) = repositories::students::find_by_id(pool, &first.student_id).await? else {
        return Ok(Vec::new());
    };

    Ok(unlocked_chapters(&profile, course_id))
}

async fn resolve_for_student(
    pool: &PgPool,
    viewer_id: &str,
    course_id: &str,
) -> Result<Vec<String>, sqlx::Error> {
    let profile = match repositories::students::find_by_id(pool, viewer_id).await? {
        Some(profile) => Some(profile),
        None => repositories::students::find_by_uid(pool, viewer_id).await?,
    };

    Ok(profile.map(|profile| unlocked_chapters(&profile, course_id)).unwrap_or_default())
}

/// A proper entry is a JSON array of chapter id strings; anything else
/// (missing key, scalar, object) counts as no access.
fn unlocked_chapters(profile: &StudentProfile, course_id: &str) -> Vec<String> {
    match profile.chapter_access.0.get(course_id) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sqlx::types::Json;

    use super::*;

    fn profile(chapter_access: serde_json::Value) -> StudentProfile {
        StudentProfile {
            id: "s1".to_string(),
            uid: None,
            full_name: "Student One".to_string(),
            chapter_access: Json(chapter_access),
        }
    }

    #[test]
    fn reads_chapter_list_for_course() {
        let profile = profile(json!({ "c1": ["ch2", "ch5"], "c2": ["ch1"] }));
        assert_eq!(unlocked_chapters(&profile, "c1"), vec!["ch2", "ch5"]);
        assert_eq!(unlocked_chapters(&profile, "c2"), vec!["ch1"]);
    }

    #[test]
    fn missing_course_entry_means_locked() {
        let profile = profile(json!({ "c1": ["ch1"] }));
        assert!(unlocked_chapters(&profile, "other-course").is_empty());
    }

    #[test]
    fn malformed_entries_mean_locked() {
        assert!(unlocked_chapters(&profile(json!({ "c1": "ch1" })), "c1").is_empty());
        assert!(unlocked_chapters(&profile(json!({ "c1": 7 })), "c1").is_empty());
        assert!(unlocked_chapters(&profile(json!({ "c1": { "ch1": true } })), "c1").is_empty());
        assert!(unlocked_chapters(&profile(json!(null)), "c1").is_empty());
    }

    #[test]
    fn non_string_items_are_skipped() {
        let profile = profile(json!({ "c1": ["ch1", 3, null, "ch2"] }));
        assert_eq!(unlocked_chapters(&profile, "c1"), vec!["ch1", "ch2"]);
    }
}
