use crate::core::config::Settings;

/// Authentication context of the signed-in administrator.
///
/// Handed explicitly to the API client and the console instead of living in a
/// process-wide store.
#[derive(Debug, Clone, Default)]
pub(crate) struct AdminSession {
    token: Option<String>,
    display_name: Option<String>,
}

impl AdminSession {
    pub(crate) fn new(token: Option<String>, display_name: Option<String>) -> Self {
        Self { token, display_name }
    }

    pub(crate) fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.session().token.clone(), settings.session().user.clone())
    }

    pub(crate) fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("admin")
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_admin() {
        let session = AdminSession::new(Some("tok".to_string()), Some("Ada".to_string()));
        assert!(session.is_authenticated());
        assert_eq!(session.bearer(), Some("tok"));
        assert_eq!(session.display_name(), "Ada");

        let anonymous = AdminSession::default();
        assert!(!anonymous.is_authenticated());
        assert_eq!(anonymous.display_name(), "admin");
    }
}
