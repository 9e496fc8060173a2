use serde::Serialize;

/// Viewer role as understood by the access resolver. The storage column is
/// free-form text; anything outside the recognized set maps to `Student`,
/// the least-privileged branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ViewerRole {
    Student,
    Trainer,
    Admin,
    Superadmin,
}

impl ViewerRole {
    pub(crate) fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "trainer" => Self::Trainer,
            "admin" => Self::Admin,
            "superadmin" => Self::Superadmin,
            _ => Self::Student,
        }
    }

    pub(crate) fn is_staff(self) -> bool {
        matches!(self, Self::Trainer | Self::Admin | Self::Superadmin)
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Trainer => "trainer",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }
}
