use std::collections::HashMap;

use sqlx::PgPool;

use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::models::{Chapter, InternshipCourse, ProgressTest, TestSubmission};
use crate::repositories;

/// Everything the course page needs, fetched fresh per request. The course
/// and chapters come from the primary store; tests and submissions from the
/// delivery store. `submissions` is keyed by test id and holds at most one
/// record per test.
pub(crate) struct CoursePageData {
    pub(crate) course: InternshipCourse,
    pub(crate) chapters: Vec<Chapter>,
    pub(crate) tests: Vec<ProgressTest>,
    pub(crate) submissions: HashMap<String, TestSubmission>,
}

/// Fetch and merge the course page inputs. `None` means the course does not
/// exist and the caller renders the terminal not-found state.
///
/// Only the course and chapter reads can fail the whole call; the delivery
/// store reads degrade section-by-section so a broken test feed never blanks
/// the chapter list.
pub(crate) async fn aggregate(
    state: &AppState,
    internship_id: &str,
    course_id: &str,
    viewer_id: Option<&str>,
) -> Result<Option<CoursePageData>, sqlx::Error> {
    let Some(course) =
        repositories::courses::find_course(state.db(), internship_id, course_id).await?
    else {
        return Ok(None);
    };

    let chapters =
        repositories::courses::list_chapters(state.db(), internship_id, course_id).await?;

    let tests =
        match repositories::progress_tests::list_for_course(state.delivery_db(), course_id).await {
            Ok(tests) => tests,
            Err(err) => {
                tracing::error!(
                    error = %err,
                    course_id,
                    "Failed to load progress tests; rendering course without them"
                );
                Vec::new()
            }
        };

    let submissions = match viewer_id {
        Some(viewer_id) if !tests.is_empty() => {
            fetch_submissions(state.delivery_db(), &tests, viewer_id).await
        }
        _ => HashMap::new(),
    };

    Ok(Some(CoursePageData { course, chapters, tests, submissions }))
}

/// One lookup per test, launched concurrently with no ordering between them.
/// A failed lookup only loses that test's submission.
async fn fetch_submissions(
    pool: &PgPool,
    tests: &[ProgressTest],
    viewer_id: &str,
) -> HashMap<String, TestSubmission> {
    let mut lookups = Vec::with_capacity(tests.len());

    for test in tests {
        let pool = pool.clone();
        let test_id = test.id.clone();
        let viewer_id = viewer_id.to_string();

        lookups.push(tokio::spawn(async move {
            let found = repositories::progress_tests::find_submission_for_student(
                &pool, &test_id, &viewer_id,
            )
            .await;
            (test_id, found)
        }));
    }

    let mut submissions = HashMap::new();
    for lookup in lookups {
        let Ok((test_id, found)) = lookup.await else {
            continue;
        };

        match found {
            Ok(Some(mut submission)) => {
                // Stored timestamps are sometimes missing; default to now so
                // the view always has a concrete date.
                submission.submitted_at =
                    Some(submission.submitted_at.unwrap_or_else(primitive_now_utc));
                submissions.insert(test_id, submission);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::error!(
                    error = %err,
                    test_id,
                    "Failed to load submission for progress test"
                );
            }
        }
    }

    submissions
}

/// A chapter's effective day number: the explicit order field when present,
/// else its 1-based position in the already-sorted chapter list.
pub(crate) fn resolved_order(chapter: &Chapter, position: usize) -> i64 {
    match chapter.chapter_order {
        Some(order) => i64::from(order),
        None => position as i64 + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(id: &str, order: Option<i32>) -> Chapter {
        Chapter {
            id: id.to_string(),
            title: None,
            topics: None,
            chapter_order: order,
            video_url: None,
            ppt_url: None,
            pdf_url: None,
            live_class_url: None,
            recorded_class_url: None,
            class_docs_url: None,
            reference_doc_url: None,
        }
    }

    #[test]
    fn explicit_order_wins() {
        assert_eq!(resolved_order(&chapter("ch1", Some(7)), 0), 7);
    }

    #[test]
    fn missing_order_falls_back_to_position() {
        assert_eq!(resolved_order(&chapter("ch1", None), 0), 1);
        assert_eq!(resolved_order(&chapter("ch3", None), 2), 3);
    }
}
