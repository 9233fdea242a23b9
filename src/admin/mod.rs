pub(crate) mod assign;
pub(crate) mod exams;
pub(crate) mod feedback;
pub(crate) mod form;
pub(crate) mod questions;
pub(crate) mod render;
