pub(crate) mod access;
pub(crate) mod course_page;
pub(crate) mod embed;
pub(crate) mod player;
pub(crate) mod slugs;
