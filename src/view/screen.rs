//! Full-screen gate in front of the dashboard

/// Which top-level screen to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Connecting,
    Error,
    Dashboard,
}

impl Screen {
    /// Pick the screen for the current app and connection state
    ///
    /// A terminal failure takes precedence over `Connecting`.
    pub fn select(ready: bool, connected: bool, terminal: bool) -> Self {
        if !ready {
            Screen::Loading
        } else if terminal {
            Screen::Error
        } else if !connected {
            Screen::Connecting
        } else {
            Screen::Dashboard
        }
    }

    /// Steps shown on the progress indicator
    pub fn steps(&self) -> &'static [&'static str] {
        match self {
            Screen::Loading => &["Loading"],
            Screen::Connecting => &["Loading", "Connecting"],
            Screen::Error => &["Loading", "Connecting", "Error"],
            Screen::Dashboard => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_order() {
        assert_eq!(Screen::select(false, true, true), Screen::Loading);
        assert_eq!(Screen::select(true, false, true), Screen::Error);
        assert_eq!(Screen::select(true, false, false), Screen::Connecting);
        assert_eq!(Screen::select(true, true, false), Screen::Dashboard);
    }

    #[test]
    fn test_steps() {
        assert_eq!(Screen::Error.steps().last(), Some(&"Error"));
        assert!(Screen::Dashboard.steps().is_empty());
    }
}
