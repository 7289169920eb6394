// Taskbar registry: one tab per open window, kept in sync through window events

pub mod start_menu;

use log::debug;
use serde::Serialize;

use crate::state::events::WindowEvent;
use crate::state::window::{WindowId, WindowRecord};

/// Clickable taskbar entry for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskbarTab {
    pub window_id: WindowId,
    pub title: String,
    pub icon: String,
    pub icon_source: Option<String>,
    /// Drawn pressed: the window is active and not minimized
    pub highlighted: bool,
}

impl TaskbarTab {
    fn from_record(record: &WindowRecord) -> Self {
        Self {
            window_id: record.id,
            title: record.title.clone(),
            icon: record.icon.clone(),
            icon_source: record.icon_source.clone(),
            highlighted: record.is_highlighted(),
        }
    }
}

/// Tabs in the order their windows were opened
#[derive(Debug, Default)]
pub struct Taskbar {
    tabs: Vec<TaskbarTab>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[TaskbarTab] {
        &self.tabs
    }

    pub fn tab(&self, id: WindowId) -> Option<&TaskbarTab> {
        self.tabs.iter().find(|t| t.window_id == id)
    }

    /// The tab currently drawn pressed, if any
    pub fn highlighted(&self) -> Option<&TaskbarTab> {
        self.tabs.iter().find(|t| t.highlighted)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn apply(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Created(record) => {
                if self.tab(record.id).is_some() {
                    debug!("[Taskbar] Tab for {} already exists", record.id);
                    return;
                }
                self.tabs.push(TaskbarTab::from_record(record));
            }
            WindowEvent::Closed(id) => {
                self.tabs.retain(|t| t.window_id != *id);
            }
            WindowEvent::StateChanged(record) => {
                match self.tabs.iter_mut().find(|t| t.window_id == record.id) {
                    Some(tab) => *tab = TaskbarTab::from_record(record),
                    None => debug!("[Taskbar] State change for unknown window {}", record.id),
                }
            }
        }
    }
}
