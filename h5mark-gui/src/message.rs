//! User-facing notices.
//!
//! Every failed user action ends up here: the UI shows the notice as a modal
//! window until it is dismissed.

use log::{error, info};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A modal message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub text: String,
}

impl Notice {
    /// Informational notice, logged at info level.
    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        let notice = Self {
            kind: NoticeKind::Info,
            title: title.into(),
            text: text.into(),
        };
        info!("{}: {}", notice.title, notice.text);
        notice
    }

    /// Failure notice, logged at error level.
    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        let notice = Self {
            kind: NoticeKind::Error,
            title: title.into(),
            text: text.into(),
        };
        error!("{}: {}", notice.title, notice.text);
        notice
    }
}
