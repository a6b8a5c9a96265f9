use std::fmt;

/// Icon shown next to a cargo's status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusIcon {
    OnTime,
    Exception,
}

impl StatusIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusIcon::OnTime => "on-time",
            StatusIcon::Exception => "exception",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            StatusIcon::OnTime => "✅",
            StatusIcon::Exception => "⚠️",
        }
    }
}

impl fmt::Display for StatusIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only an explicit `true` counts as on time; unknown is an exception.
pub fn status_icon(on_time: Option<bool>) -> StatusIcon {
    match on_time {
        Some(true) => StatusIcon::OnTime,
        _ => StatusIcon::Exception,
    }
}
