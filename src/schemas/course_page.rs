use serde::Serialize;

use crate::core::config::RoutesSettings;
use crate::core::time::{format_primitive, primitive_now_utc};
use crate::db::models::{Chapter, InternshipCourse, ProgressTest, TestSubmission};
use crate::services::course_page::{resolved_order, CoursePageData};
use crate::services::embed::embed_url;
use crate::services::player::{InlinePlayer, VideoKind, VideoSelection};
use crate::services::slugs::course_slug;

#[derive(Debug, Serialize)]
pub(crate) struct CoursePageResponse {
    pub(crate) course: CourseHeader,
    pub(crate) chapters: Vec<ChapterView>,
    pub(crate) active_video: Option<crate::services::player::ActiveVideo>,
    pub(crate) full_practice_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseHeader {
    pub(crate) id: String,
    pub(crate) internship_id: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) course_code: Option<String>,
}

/// One chapter as rendered. For locked chapters `media` is `None` and
/// `tests` is empty, so their URLs never leave the server.
#[derive(Debug, Serialize)]
pub(crate) struct ChapterView {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) topics: Option<String>,
    pub(crate) order: Option<i32>,
    pub(crate) day_number: i64,
    pub(crate) locked: bool,
    pub(crate) media: Option<ChapterMedia>,
    pub(crate) tests: Vec<TestView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChapterMedia {
    pub(crate) topic_video_embed_url: Option<String>,
    pub(crate) ppt: Option<DocViewerIntent>,
    pub(crate) pdf: Option<DocViewerIntent>,
    pub(crate) live_class_url: Option<String>,
    pub(crate) recorded_class_embed_url: Option<String>,
    pub(crate) class_docs: Option<DocViewerIntent>,
    pub(crate) reference_doc: Option<DocViewerIntent>,
}

/// Navigation intent for the sibling document viewer pages. The client picks
/// the route and carries the url and title over itself; no query string is
/// assembled here.
#[derive(Debug, Serialize)]
pub(crate) struct DocViewerIntent {
    pub(crate) route: String,
    pub(crate) url: String,
    pub(crate) title: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TestView {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) attempt_url: Option<String>,
    pub(crate) submission: Option<SubmissionView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmissionView {
    pub(crate) score: Option<f64>,
    pub(crate) score_tier: Option<ScoreTier>,
    pub(crate) status_label: StatusLabel,
    pub(crate) tests_passed: Option<String>,
    pub(crate) submitted_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ScoreTier {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum StatusLabel {
    Completed,
    Partial,
    Failed,
    Submitted,
}

pub(crate) fn score_tier(score: f64) -> ScoreTier {
    if score >= 80.0 {
        ScoreTier::High
    } else if score >= 50.0 {
        ScoreTier::Medium
    } else {
        ScoreTier::Low
    }
}

pub(crate) fn status_label(raw: Option<&str>) -> StatusLabel {
    match raw {
        Some("success") => StatusLabel::Completed,
        Some("partial") => StatusLabel::Partial,
        Some("fail") => StatusLabel::Failed,
        _ => StatusLabel::Submitted,
    }
}

/// Assemble the full page view from the aggregated data and the resolved
/// access list. `open_video` is the viewer's current inline selection; it is
/// honored only when it points at an unlocked chapter.
pub(crate) fn build_page(
    data: CoursePageData,
    unlocked: &[String],
    open_video: Option<&VideoSelection>,
    routes: &RoutesSettings,
) -> CoursePageResponse {
    let CoursePageData { course, chapters, tests, mut submissions } = data;

    let slug = course.title.as_deref().and_then(course_slug);
    let full_practice_url = slug.as_ref().map(|slug| format!("{}/{slug}", routes.practice_base));

    let mut player = InlinePlayer::default();
    let mut chapter_views = Vec::with_capacity(chapters.len());

    for (position, chapter) in chapters.into_iter().enumerate() {
        let locked = !unlocked.iter().any(|id| *id == chapter.id);
        let day_number = resolved_order(&chapter, position);
        let display_title = non_empty(chapter.title.as_deref()).unwrap_or("Untitled Chapter");

        if !locked {
            if let Some(selection) = open_video.filter(|sel| sel.chapter_id == chapter.id) {
                apply_selection(&mut player, selection, &chapter, &course, display_title);
            }
        }

        let day_tests = if locked {
            Vec::new()
        } else {
            tests
                .iter()
                .filter(|test| test.day.map(i64::from) == Some(day_number))
                .map(|test| test_view(test, day_number, slug.as_deref(), &mut submissions, routes))
                .collect()
        };

        let media = if locked { None } else { Some(media_for(&chapter, display_title, routes)) };

        chapter_views.push(ChapterView {
            title: display_title.to_string(),
            id: chapter.id,
            topics: chapter.topics,
            order: chapter.chapter_order,
            day_number,
            locked,
            media,
            tests: day_tests,
        });
    }

    CoursePageResponse {
        course: CourseHeader {
            id: course.id,
            internship_id: course.internship_id,
            title: non_empty(course.title.as_deref()).unwrap_or("Untitled Course").to_string(),
            description: course.description,
            course_code: course.course_code,
        },
        chapters: chapter_views,
        active_video: player.into_active(),
        full_practice_url,
    }
}

fn apply_selection(
    player: &mut InlinePlayer,
    selection: &VideoSelection,
    chapter: &Chapter,
    course: &InternshipCourse,
    display_title: &str,
) {
    match selection.kind {
        VideoKind::Topic => {
            let Some(url) = non_empty(chapter.video_url.as_deref()) else {
                return;
            };
            let title = non_empty(chapter.title.as_deref())
                .or_else(|| non_empty(course.title.as_deref()))
                .unwrap_or("Topic Video");
            player.select(&chapter.id, title, &embed_url(url));
        }
        VideoKind::Recorded => {
            let Some(url) = non_empty(chapter.recorded_class_url.as_deref()) else {
                return;
            };
            player.select(&chapter.id, &format!("{display_title} - Recorded"), &embed_url(url));
        }
    }
}

fn media_for(chapter: &Chapter, display_title: &str, routes: &RoutesSettings) -> ChapterMedia {
    let doc_title = non_empty(chapter.title.as_deref());

    ChapterMedia {
        topic_video_embed_url: non_empty(chapter.video_url.as_deref()).map(embed_url),
        ppt: non_empty(chapter.ppt_url.as_deref()).map(|url| DocViewerIntent {
            route: routes.ppt_viewer_path.clone(),
            url: url.to_string(),
            title: doc_title.unwrap_or("Presentation").to_string(),
        }),
        pdf: non_empty(chapter.pdf_url.as_deref()).map(|url| DocViewerIntent {
            route: routes.pdf_viewer_path.clone(),
            url: url.to_string(),
            title: doc_title.unwrap_or("PDF Document").to_string(),
        }),
        live_class_url: non_empty(chapter.live_class_url.as_deref()).map(str::to_string),
        recorded_class_embed_url: non_empty(chapter.recorded_class_url.as_deref()).map(embed_url),
        class_docs: non_empty(chapter.class_docs_url.as_deref()).map(|url| DocViewerIntent {
            route: routes.ppt_viewer_path.clone(),
            url: url.to_string(),
            title: doc_title.unwrap_or("Class Docs").to_string(),
        }),
        reference_doc: non_empty(chapter.reference_doc_url.as_deref()).map(|url| {
            DocViewerIntent {
                route: routes.pdf_viewer_path.clone(),
                url: url.to_string(),
                title: format!("{display_title} - Reference Document"),
            }
        }),
    }
}

fn test_view(
    test: &ProgressTest,
    day_number: i64,
    slug: Option<&str>,
    submissions: &mut std::collections::HashMap<String, TestSubmission>,
    routes: &RoutesSettings,
) -> TestView {
    let title = non_empty(test.title.as_deref())
        .or_else(|| non_empty(test.name.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Progress Test (Day {day_number})"));

    let attempt_url =
        slug.map(|slug| format!("{}/{slug}/assignments/{}", routes.assignments_base, test.id));

    let submission = submissions.remove(&test.id).map(submission_view);

    TestView { id: test.id.clone(), title, attempt_url, submission }
}

fn submission_view(submission: TestSubmission) -> SubmissionView {
    let tests_passed = match (submission.pass_count, submission.total_count) {
        (Some(passed), Some(total)) => Some(format!("{passed}/{total}")),
        _ => None,
    };

    SubmissionView {
        score: submission.auto_score,
        score_tier: submission.auto_score.map(score_tier),
        status_label: status_label(submission.result_status.as_deref()),
        tests_passed,
        submitted_at: format_primitive(submission.submitted_at.unwrap_or_else(primitive_now_utc)),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use time::{Date, Month, PrimitiveDateTime, Time};

    use super::*;

    fn routes() -> RoutesSettings {
        RoutesSettings {
            ppt_viewer_path: "/view-ppt".to_string(),
            pdf_viewer_path: "/view-pdf-secure".to_string(),
            assignments_base: "/courses".to_string(),
            practice_base: "/practice".to_string(),
        }
    }

    fn course(title: Option<&str>) -> InternshipCourse {
        InternshipCourse {
            id: "c1".to_string(),
            internship_id: "i1".to_string(),
            title: title.map(str::to_string),
            description: Some("Course description".to_string()),
            course_code: Some("CS-101".to_string()),
        }
    }

    fn chapter(id: &str, order: Option<i32>) -> Chapter {
        Chapter {
            id: id.to_string(),
            title: Some(format!("Chapter {id}")),
            topics: Some("Topic list".to_string()),
            chapter_order: order,
            video_url: Some(format!("https://youtu.be/{id}aaaaaaaaa")),
            ppt_url: Some(format!("https://files.example.com/{id}.pptx")),
            pdf_url: Some(format!("https://files.example.com/{id}.pdf")),
            live_class_url: Some(format!("https://meet.example.com/{id}")),
            recorded_class_url: Some(format!("https://drive.google.com/file/d/rec-{id}/view")),
            class_docs_url: Some(format!("https://files.example.com/{id}-docs.pdf")),
            reference_doc_url: Some(format!("https://files.example.com/{id}-ref.pdf")),
        }
    }

    fn test(id: &str, day: Option<i32>) -> ProgressTest {
        ProgressTest {
            id: id.to_string(),
            course_id: "c1".to_string(),
            title: Some(format!("Test {id}")),
            name: None,
            day,
        }
    }

    fn submission(test_id: &str, score: f64, status: &str) -> TestSubmission {
        let date = Date::from_calendar_date(2026, Month::January, 15).unwrap();
        TestSubmission {
            id: format!("sub-{test_id}"),
            test_id: test_id.to_string(),
            student_id: "s1".to_string(),
            auto_score: Some(score),
            result_status: Some(status.to_string()),
            pass_count: Some(9),
            total_count: Some(20),
            submitted_at: Some(PrimitiveDateTime::new(date, Time::from_hms(12, 0, 0).unwrap())),
        }
    }

    fn data(
        chapters: Vec<Chapter>,
        tests: Vec<ProgressTest>,
        submissions: HashMap<String, TestSubmission>,
    ) -> CoursePageData {
        CoursePageData { course: course(Some("Data Structures")), chapters, tests, submissions }
    }

    #[test]
    fn locked_chapters_carry_no_media_or_tests() {
        let page = build_page(
            data(
                vec![chapter("ch1", Some(1)), chapter("ch2", Some(2)), chapter("ch3", Some(3))],
                vec![test("t1", Some(1)), test("t2", Some(2))],
                HashMap::new(),
            ),
            &["ch2".to_string()],
            None,
            &routes(),
        );

        assert!(page.chapters[0].locked);
        assert!(page.chapters[0].media.is_none());
        assert!(page.chapters[0].tests.is_empty());

        assert!(!page.chapters[1].locked);
        assert!(page.chapters[1].media.is_some());
        assert_eq!(page.chapters[1].tests.len(), 1);
        assert_eq!(page.chapters[1].tests[0].id, "t2");

        assert!(page.chapters[2].locked);
        assert!(page.chapters[2].tests.is_empty());
    }

    #[test]
    fn locked_chapter_urls_never_serialize() {
        let page = build_page(
            data(vec![chapter("ch1", Some(1)), chapter("ch2", Some(2))], Vec::new(), HashMap::new()),
            &["ch2".to_string()],
            None,
            &routes(),
        );

        let body = serde_json::to_string(&page).unwrap();
        assert!(!body.contains("ch1aaaaaaaaa"));
        assert!(!body.contains("ch1.pptx"));
        assert!(!body.contains("ch1-ref.pdf"));
        assert!(body.contains("ch2.pptx"));
    }

    #[test]
    fn tests_attach_by_day_and_orphans_drop() {
        let page = build_page(
            data(
                vec![chapter("ch1", Some(2))],
                vec![test("t1", Some(2)), test("t2", Some(9)), test("t3", None)],
                HashMap::new(),
            ),
            &["ch1".to_string()],
            None,
            &routes(),
        );

        let ids: Vec<&str> =
            page.chapters[0].tests.iter().map(|test| test.id.as_str()).collect();
        assert_eq!(ids, vec!["t1"]);
    }

    #[test]
    fn missing_order_uses_list_position_for_day_matching() {
        let mut second = chapter("ch2", None);
        second.chapter_order = None;

        let page = build_page(
            data(vec![chapter("ch1", None), second], vec![test("t1", Some(2))], HashMap::new()),
            &["ch1".to_string(), "ch2".to_string()],
            None,
            &routes(),
        );

        assert_eq!(page.chapters[0].day_number, 1);
        assert_eq!(page.chapters[1].day_number, 2);
        assert!(page.chapters[0].tests.is_empty());
        assert_eq!(page.chapters[1].tests.len(), 1);
    }

    #[test]
    fn submission_view_maps_score_and_status() {
        let mut submissions = HashMap::new();
        submissions.insert("t1".to_string(), submission("t1", 45.0, "fail"));

        let page = build_page(
            data(vec![chapter("ch1", Some(1))], vec![test("t1", Some(1))], submissions),
            &["ch1".to_string()],
            None,
            &routes(),
        );

        let view = page.chapters[0].tests[0].submission.as_ref().unwrap();
        assert_eq!(view.score, Some(45.0));
        assert_eq!(view.score_tier, Some(ScoreTier::Low));
        assert_eq!(view.status_label, StatusLabel::Failed);
        assert_eq!(view.tests_passed.as_deref(), Some("9/20"));
        assert_eq!(view.submitted_at, "2026-01-15T12:00:00Z");
    }

    #[test]
    fn score_tiers_split_at_fifty_and_eighty() {
        assert_eq!(score_tier(80.0), ScoreTier::High);
        assert_eq!(score_tier(92.5), ScoreTier::High);
        assert_eq!(score_tier(50.0), ScoreTier::Medium);
        assert_eq!(score_tier(79.9), ScoreTier::Medium);
        assert_eq!(score_tier(49.9), ScoreTier::Low);
        assert_eq!(score_tier(0.0), ScoreTier::Low);
    }

    #[test]
    fn unknown_status_reads_as_submitted() {
        assert_eq!(status_label(Some("success")), StatusLabel::Completed);
        assert_eq!(status_label(Some("partial")), StatusLabel::Partial);
        assert_eq!(status_label(Some("fail")), StatusLabel::Failed);
        assert_eq!(status_label(Some("weird")), StatusLabel::Submitted);
        assert_eq!(status_label(None), StatusLabel::Submitted);
    }

    #[test]
    fn incomplete_counts_hide_tests_passed() {
        let mut record = submission("t1", 70.0, "partial");
        record.total_count = None;
        let view = submission_view(record);
        assert_eq!(view.tests_passed, None);
        assert_eq!(view.score_tier, Some(ScoreTier::Medium));
    }

    #[test]
    fn blank_course_title_suppresses_links() {
        let mut data = data(vec![chapter("ch1", Some(1))], vec![test("t1", Some(1))], HashMap::new());
        data.course = course(Some("  !!  "));

        let page = build_page(data, &["ch1".to_string()], None, &routes());
        // The title is not blank, only sluggless; it renders as stored.
        assert_eq!(page.course.title, "  !!  ");
        assert_eq!(page.full_practice_url, None);
        assert_eq!(page.chapters[0].tests[0].attempt_url, None);
    }

    #[test]
    fn whitespace_course_title_falls_back_to_untitled() {
        let mut data = data(vec![chapter("ch1", Some(1))], Vec::new(), HashMap::new());
        data.course = course(Some("   "));

        let page = build_page(data, &["ch1".to_string()], None, &routes());
        assert_eq!(page.course.title, "Untitled Course");
        assert_eq!(page.full_practice_url, None);
    }

    #[test]
    fn doc_intents_pick_viewer_routes() {
        let page = build_page(
            data(vec![chapter("ch1", Some(1))], Vec::new(), HashMap::new()),
            &["ch1".to_string()],
            None,
            &routes(),
        );

        let media = page.chapters[0].media.as_ref().unwrap();
        assert_eq!(media.ppt.as_ref().unwrap().route, "/view-ppt");
        assert_eq!(media.class_docs.as_ref().unwrap().route, "/view-ppt");
        assert_eq!(media.pdf.as_ref().unwrap().route, "/view-pdf-secure");
        assert_eq!(media.reference_doc.as_ref().unwrap().route, "/view-pdf-secure");
        assert_eq!(media.reference_doc.as_ref().unwrap().title, "Chapter ch1 - Reference Document");
    }

    #[test]
    fn links_use_course_slug() {
        let page = build_page(
            data(vec![chapter("ch1", Some(1))], vec![test("t1", Some(1))], HashMap::new()),
            &["ch1".to_string()],
            None,
            &routes(),
        );

        assert_eq!(page.full_practice_url.as_deref(), Some("/practice/data-structures"));
        assert_eq!(
            page.chapters[0].tests[0].attempt_url.as_deref(),
            Some("/courses/data-structures/assignments/t1")
        );
    }

    #[test]
    fn topic_selection_opens_embed_on_unlocked_chapter() {
        let selection =
            VideoSelection { chapter_id: "ch1".to_string(), kind: VideoKind::Topic };

        let page = build_page(
            data(vec![chapter("ch1", Some(1))], Vec::new(), HashMap::new()),
            &["ch1".to_string()],
            Some(&selection),
            &routes(),
        );

        let active = page.active_video.unwrap();
        assert_eq!(active.chapter_id, "ch1");
        assert_eq!(active.title, "Chapter ch1");
        assert_eq!(active.embed_url, "https://www.youtube.com/embed/ch1aaaaaaaa");
    }

    #[test]
    fn recorded_selection_uses_drive_preview_and_suffix() {
        let selection =
            VideoSelection { chapter_id: "ch1".to_string(), kind: VideoKind::Recorded };

        let page = build_page(
            data(vec![chapter("ch1", Some(1))], Vec::new(), HashMap::new()),
            &["ch1".to_string()],
            Some(&selection),
            &routes(),
        );

        let active = page.active_video.unwrap();
        assert_eq!(active.title, "Chapter ch1 - Recorded");
        assert_eq!(active.embed_url, "https://drive.google.com/file/d/rec-ch1/preview");
    }

    #[test]
    fn selection_on_locked_chapter_is_ignored() {
        let selection =
            VideoSelection { chapter_id: "ch1".to_string(), kind: VideoKind::Topic };

        let page = build_page(
            data(vec![chapter("ch1", Some(1))], Vec::new(), HashMap::new()),
            &[],
            Some(&selection),
            &routes(),
        );

        assert!(page.active_video.is_none());
    }

    #[test]
    fn untitled_chapter_falls_back_to_course_title_for_topic_video() {
        let mut untitled = chapter("ch1", Some(1));
        untitled.title = None;
        let selection =
            VideoSelection { chapter_id: "ch1".to_string(), kind: VideoKind::Topic };

        let page = build_page(
            data(vec![untitled], Vec::new(), HashMap::new()),
            &["ch1".to_string()],
            Some(&selection),
            &routes(),
        );

        assert_eq!(page.chapters[0].title, "Untitled Chapter");
        assert_eq!(page.active_video.unwrap().title, "Data Structures");
    }
}
