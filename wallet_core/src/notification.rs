//! The notification surface.
//!
//! Workflows describe what the user should see as a [`Notice`]; the surface
//! shows one banner at a time and remembers which workflow raised it, so a
//! workflow clearing its own state never wipes another's banner.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Success,
}

/// A user-visible message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Offer a "reload" action next to the message.
    pub reload: bool,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            reload: false,
        }
    }

    pub fn error_with_reload(message: impl Into<String>) -> Self {
        Self {
            reload: true,
            ..Self::error(message)
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            reload: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Error => write!(f, "error: {}", self.message)?,
            NoticeLevel::Success => write!(f, "{}", self.message)?,
        }
        if self.reload {
            write!(f, " [reload]")?;
        }
        Ok(())
    }
}

/// Which workflow a banner came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Session,
    Transfer,
    Contacts,
    History,
}

/// Single-banner notification surface.
#[derive(Debug, Default)]
pub struct NotificationSurface {
    banner: Option<(Channel, Notice)>,
}

impl NotificationSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `notice`, replacing whatever banner is up.
    pub fn show(&mut self, channel: Channel, notice: Notice) {
        tracing::debug!(?channel, %notice, "banner shown");
        self.banner = Some((channel, notice));
    }

    /// Mirror a workflow's current notice: show it, or clear the banner if
    /// the workflow has none and the banner is the workflow's own.
    pub fn publish(&mut self, channel: Channel, notice: Option<&Notice>) {
        match notice {
            Some(n) => {
                if self.banner.as_ref() != Some(&(channel, n.clone())) {
                    self.show(channel, n.clone());
                }
            }
            None => self.clear_channel(channel),
        }
    }

    /// Clear the banner if `channel` raised it.
    pub fn clear_channel(&mut self, channel: Channel) {
        if matches!(self.banner, Some((c, _)) if c == channel) {
            self.banner = None;
        }
    }

    pub fn dismiss(&mut self) {
        self.banner = None;
    }

    pub fn current(&self) -> Option<&Notice> {
        self.banner.as_ref().map(|(_, n)| n)
    }

    pub fn source(&self) -> Option<Channel> {
        self.banner.as_ref().map(|(c, _)| *c)
    }

    /// Whether the banner offers a reload action.
    pub fn offers_reload(&self) -> bool {
        self.current().is_some_and(|n| n.reload)
    }

    /// One-line rendering for terminal front-ends.
    pub fn render(&self) -> Option<String> {
        self.current().map(ToString::to_string)
    }
}
