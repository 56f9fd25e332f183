//! Dashboard page state: search, focus and theme

use crate::protocol::{HostStatus, StatusMap};

/// Colour scheme, applied as the root `data-theme` attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn attribute(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Hosts whose hostname contains `search`, sorted by hostname
pub fn visible_hosts<'a>(status: &'a StatusMap, search: &str) -> Vec<(&'a str, &'a HostStatus)> {
    let mut hosts: Vec<(&str, &HostStatus)> = status
        .iter()
        .filter(|(_, host)| host.hostname.contains(search))
        .map(|(id, host)| (id.as_str(), host))
        .collect();
    hosts.sort_by(|a, b| a.1.hostname.cmp(&b.1.hostname).then_with(|| a.0.cmp(b.0)));
    hosts
}

/// Interactive state of the dashboard page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub search: String,
    /// Host id shown in the focus overlay
    pub focused: Option<String>,
    pub theme: Theme,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_focus(&mut self, host_id: &str) {
        self.focused = Some(host_id.to_string());
    }

    pub fn close_focus(&mut self) {
        self.focused = None;
    }

    /// Keyboard handling; returns whether the key was consumed
    pub fn on_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.focused.is_some() {
            self.close_focus();
            true
        } else {
            false
        }
    }

    /// Close the focus overlay when its host is no longer reported
    pub fn reconcile(&mut self, status: Option<&StatusMap>) {
        let gone = match (&self.focused, status) {
            (Some(id), Some(hosts)) => !hosts.contains_key(id),
            (Some(_), None) => true,
            (None, _) => false,
        };
        if gone {
            tracing::debug!(host = ?self.focused, "Focused host disappeared");
            self.close_focus();
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(hosts: &[(&str, &str)]) -> StatusMap {
        hosts
            .iter()
            .map(|(id, name)| {
                (
                    id.to_string(),
                    HostStatus {
                        hostname: name.to_string(),
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_visible_hosts_sorted_and_filtered() {
        let status = status(&[("1", "zeta"), ("2", "alpha"), ("3", "media-box")]);

        let all: Vec<&str> = visible_hosts(&status, "")
            .into_iter()
            .map(|(_, h)| h.hostname.as_str())
            .collect();
        assert_eq!(all, vec!["alpha", "media-box", "zeta"]);

        let filtered = visible_hosts(&status, "a-b");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].0, "3");

        // Search is case sensitive
        assert!(visible_hosts(&status, "ALPHA").is_empty());
    }

    #[test]
    fn test_escape_closes_focus() {
        let mut state = DashboardState::new();
        assert!(!state.on_key("Escape"));
        state.open_focus("1");
        assert!(!state.on_key("Enter"));
        assert!(state.on_key("Escape"));
        assert!(state.focused.is_none());
    }

    #[test]
    fn test_focus_closes_when_host_disappears() {
        let mut state = DashboardState::new();
        state.open_focus("2");

        state.reconcile(Some(&status(&[("1", "a"), ("2", "b")])));
        assert_eq!(state.focused.as_deref(), Some("2"));

        state.reconcile(Some(&status(&[("1", "a")])));
        assert!(state.focused.is_none());
    }

    #[test]
    fn test_theme_toggle() {
        let mut state = DashboardState::new();
        assert_eq!(state.theme.attribute(), "dark");
        state.toggle_theme();
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.theme.attribute(), "light");
    }
}
