//! Page navigation.
//!
//! Press `Y` to toggle between the dashboard and the debug view.

/// Pages of the application.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    /// Orb, terminal, vitals and dock.
    #[default]
    Dashboard,

    /// Frame timing, widget state and the event log.
    Debug,
}

impl Page {
    /// Toggle to the other page.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dashboard => Self::Debug,
            Self::Debug => Self::Dashboard,
        }
    }

    /// Short name used in log lines.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Debug => "Debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default() {
        assert_eq!(Page::default(), Page::Dashboard);
    }

    #[test]
    fn test_page_toggle_cycle() {
        assert_eq!(Page::Dashboard.toggle(), Page::Debug);
        assert_eq!(Page::Dashboard.toggle().toggle(), Page::Dashboard);
    }

    #[test]
    fn test_page_names() {
        assert_eq!(Page::Debug.name(), "Debug");
        assert_eq!(Page::Dashboard.name(), "Dashboard");
    }
}
