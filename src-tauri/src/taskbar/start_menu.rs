use serde::Serialize;

use crate::apps::{descriptor, ApplicationKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartMenuEntry {
    pub kind: ApplicationKind,
    pub label: &'static str,
    pub icon: &'static str,
}

/// The Start button popup
#[derive(Debug)]
pub struct StartMenu {
    open: bool,
    entries: Vec<StartMenuEntry>,
}

impl StartMenu {
    pub fn new() -> Self {
        let entries = ApplicationKind::LAUNCHABLE
            .iter()
            .map(|kind| {
                let app = descriptor(*kind);
                StartMenuEntry {
                    kind: *kind,
                    label: app.name,
                    icon: app.icon,
                }
            })
            .collect();
        Self {
            open: false,
            entries,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the new open state
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn entries(&self) -> &[StartMenuEntry] {
        &self.entries
    }

}

impl Default for StartMenu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut menu = StartMenu::new();
        assert!(!menu.is_open());
        assert!(menu.toggle());
        assert!(!menu.toggle());
        menu.toggle();
        menu.close();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_entries_cover_launchable_apps() {
        let menu = StartMenu::new();
        assert_eq!(menu.entries().len(), ApplicationKind::LAUNCHABLE.len());
        assert_eq!(menu.entries()[0].label, "My Computer");
        assert!(menu.entries().iter().all(|e| e.kind != ApplicationKind::Generic));
        let notepad = menu
            .entries()
            .iter()
            .find(|e| e.kind == ApplicationKind::Notepad)
            .unwrap();
        assert_eq!(notepad.icon, "notepad");
    }
}
