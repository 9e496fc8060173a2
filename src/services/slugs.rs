/// Build the URL slug for a course title: lowercase, runs of anything that is
/// not a letter or digit collapse to a single '-', leading and trailing '-'
/// trimmed. Titles that leave nothing behind produce no slug and callers skip
/// building links for that course.
pub(crate) fn course_slug(title: &str) -> Option<String> {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lowered in ch.to_lowercase() {
                slug.push(lowered);
            }
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_dashes() {
        assert_eq!(course_slug("Data Structures"), Some("data-structures".to_string()));
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(
            course_slug("C++ & Systems -- Programming!"),
            Some("c-systems-programming".to_string())
        );
    }

    #[test]
    fn trims_edge_dashes() {
        assert_eq!(course_slug("  -Intro-  "), Some("intro".to_string()));
    }

    #[test]
    fn blank_titles_have_no_slug() {
        assert_eq!(course_slug(""), None);
        assert_eq!(course_slug("  ---  "), None);
    }
}
