use std::time::Duration;

use crate::escape::escape_html;

pub type AlertId = u64;

/// How long a success banner stays up unless the user closes it first.
pub const SUCCESS_ALERT_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: AlertId,
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    /// Banner markup. The close button carries the alert id so a host can
    /// route clicks back as `Msg::AlertDismissed`.
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"alert alert-{severity}\" role=\"alert\" data-alert-id=\"{id}\">\
             <div class=\"alert-content\"><span class=\"alert-message\">{message}</span></div>\
             <button class=\"alert-close\" data-alert-id=\"{id}\">&times;</button>\
             </div>",
            severity = self.severity.as_str(),
            id = self.id,
            message = escape_html(&self.message),
        )
    }
}

/// Stacked banners, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlertList {
    alerts: Vec<Alert>,
    next_id: AlertId,
}

impl AlertList {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> AlertId {
        self.next_id += 1;
        let id = self.next_id;
        self.alerts.push(Alert {
            id,
            message: message.into(),
            severity,
        });
        id
    }

    /// Returns whether the alert was still present.
    pub fn remove(&mut self, id: AlertId) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        self.alerts.len() != before
    }

    /// Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.alerts.is_empty();
        self.alerts.clear();
        had_any
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn to_html(&self) -> String {
        self.alerts.iter().map(Alert::to_html).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_keep_increasing_after_clear() {
        let mut list = AlertList::default();
        let first = list.push("a", Severity::Info);
        assert!(list.clear());
        let second = list.push("b", Severity::Info);
        assert!(second > first);
    }

    #[test]
    fn remove_only_touches_its_own_banner() {
        let mut list = AlertList::default();
        let a = list.push("a", Severity::Error);
        let b = list.push("b", Severity::Warning);
        assert!(list.remove(a));
        assert!(!list.remove(a));
        let remaining: Vec<_> = list.iter().map(|alert| alert.id).collect();
        assert_eq!(remaining, vec![b]);
    }

    #[test]
    fn banner_markup_escapes_message() {
        let alert = Alert {
            id: 3,
            message: "<b>bad</b>".to_string(),
            severity: Severity::Error,
        };
        let html = alert.to_html();
        assert!(html.starts_with("<div class=\"alert alert-error\" role=\"alert\""));
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert!(html.contains("<button class=\"alert-close\" data-alert-id=\"3\">&times;</button>"));
    }
}
