use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NoticeLevel {
    Success,
    Error,
}

/// A toast shown to the administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notice {
    pub(crate) level: NoticeLevel,
    pub(crate) message: String,
}

impl Notice {
    pub(crate) fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    ExamList,
    Questions(String),
}

/// Everything a screen needs from its host: toasts, confirmation prompts and navigation.
#[async_trait]
pub(crate) trait Feedback: Send {
    fn notify(&mut self, notice: Notice);

    async fn confirm(&mut self, prompt: &str) -> bool;

    fn navigate(&mut self, route: Route);
}
