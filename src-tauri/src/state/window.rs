use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::apps::{ApplicationKind, MatchPolicy};

/// Opaque window handle, serialized as the UUID string.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct WindowId(Uuid);

impl WindowId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for WindowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum WindowState {
    /// Regular floating window, draggable
    Normal,
    /// Hidden from the desktop, only the taskbar tab remains
    Minimized,
    /// Fills the work area (viewport minus taskbar)
    Maximized,
}

/// Window rectangle in layout pixels
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

bitflags! {
    /// Chrome buttons shown in a window's title bar.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ChromeControls: u8 {
        const MINIMIZE = 1 << 0;
        const MAXIMIZE = 1 << 1;
        const CLOSE = 1 << 2;
        const HELP = 1 << 3;
    }
}

impl Default for ChromeControls {
    fn default() -> Self {
        ChromeControls::MINIMIZE | ChromeControls::MAXIMIZE | ChromeControls::CLOSE
    }
}

fn default_width() -> i32 {
    800
}

fn default_height() -> i32 {
    600
}

/// A request to open a window, as sent by an application.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    #[serde(default)]
    pub kind: ApplicationKind,
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default)]
    pub controls: ChromeControls,
    #[serde(default)]
    pub start_maximized: bool,
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: ApplicationKind::default(),
            icon: String::new(),
            width: default_width(),
            height: default_height(),
            controls: ChromeControls::default(),
            start_maximized: false,
            match_policy: MatchPolicy::default(),
        }
    }

    pub fn kind(mut self, kind: ApplicationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn controls(mut self, controls: ChromeControls) -> Self {
        self.controls = controls;
        self
    }

    pub fn start_maximized(mut self, start_maximized: bool) -> Self {
        self.start_maximized = start_maximized;
        self
    }

    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct WindowRecord {
    pub id: WindowId,
    pub kind: ApplicationKind,
    pub title: String,
    pub icon: String,                   // Asset id requested by the app
    pub icon_source: Option<String>,    // Resolved image source, filled in later
    pub geometry: Geometry,
    pub state: WindowState,
    pub is_active: bool,
    pub saved_geometry: Option<Geometry>, // Only while Maximized
    #[serde(default)]
    pub restore_maximized: bool,        // Minimized from Maximized
    pub controls: ChromeControls,
    pub z_order: u32,                   // 1 = bottom of the stack
}

impl WindowRecord {
    /// Whether this window's taskbar tab should be drawn pressed.
    pub fn is_highlighted(&self) -> bool {
        self.is_active && self.state != WindowState::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.state == WindowState::Maximized
    }

    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_from_json() {
        let config: WindowConfig = serde_json::from_str(r#"{"title":"Calendar"}"#).unwrap();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.controls, ChromeControls::default());
        assert!(!config.start_maximized);
        assert_eq!(config.match_policy, MatchPolicy::ExactTitle);
    }

    #[test]
    fn test_window_id_round_trips_as_string() {
        let id = WindowId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        assert_eq!(WindowId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_highlight_requires_active_and_visible() {
        let mut record = WindowRecord {
            id: WindowId::new(),
            kind: ApplicationKind::Generic,
            title: "Test".to_string(),
            icon: String::new(),
            icon_source: None,
            geometry: Geometry::new(0, 0, 100, 100),
            state: WindowState::Normal,
            is_active: true,
            saved_geometry: None,
            restore_maximized: false,
            controls: ChromeControls::default(),
            z_order: 1,
        };
        assert!(record.is_highlighted());
        record.state = WindowState::Minimized;
        assert!(!record.is_highlighted());
        record.state = WindowState::Maximized;
        record.is_active = false;
        assert!(!record.is_highlighted());
    }
}
