use serde::{Deserialize, Serialize};

/// Student as listed by the student-management endpoints; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct Student {
    #[serde(rename = "_id", alias = "id")]
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) email: Option<String>,
}
