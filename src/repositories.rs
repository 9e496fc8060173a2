pub(crate) mod courses;
pub(crate) mod enrollments;
pub(crate) mod progress_tests;
pub(crate) mod students;
pub(crate) mod users;
