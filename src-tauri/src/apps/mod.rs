// Built-in application catalog: window defaults and duplicate-window policy per app

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::UnknownApplication;
use crate::state::window::{ChromeControls, WindowConfig};

/// The application that owns a window
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Default)]
pub enum ApplicationKind {
    Notepad,
    Calendar,
    Messenger,
    Explorer,
    Intranet,
    /// Anything not in the catalog (dialogs, ad-hoc windows)
    #[default]
    Generic,
}

impl ApplicationKind {
    /// Kinds listed in the start menu, in display order
    pub const LAUNCHABLE: [ApplicationKind; 5] = [
        ApplicationKind::Explorer,
        ApplicationKind::Notepad,
        ApplicationKind::Calendar,
        ApplicationKind::Messenger,
        ApplicationKind::Intranet,
    ];

    pub fn descriptor(&self) -> AppDescriptor {
        descriptor(*self)
    }
}

/// Case-insensitive app name, with the start menu's aliases
impl FromStr for ApplicationKind {
    type Err = UnknownApplication;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notepad" => Ok(ApplicationKind::Notepad),
            "calendar" => Ok(ApplicationKind::Calendar),
            "messenger" | "chat" => Ok(ApplicationKind::Messenger),
            "explorer" | "files" => Ok(ApplicationKind::Explorer),
            "intranet" | "mail" => Ok(ApplicationKind::Intranet),
            "generic" => Ok(ApplicationKind::Generic),
            _ => Err(UnknownApplication(s.to_string())),
        }
    }
}

/// How a window request is matched against already-open windows of the same kind.
/// A match focuses the existing window instead of opening a new one.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(tag = "type", content = "suffix")]
pub enum MatchPolicy {
    /// Existing window with the identical title
    #[default]
    ExactTitle,
    /// Any existing window whose title ends with the suffix,
    /// provided the requested title ends with it too
    TitleSuffix(String),
    /// Always open a new window
    Never,
}

impl MatchPolicy {
    pub fn matches(&self, requested: &str, existing: &str) -> bool {
        match self {
            MatchPolicy::ExactTitle => requested == existing,
            MatchPolicy::TitleSuffix(suffix) => {
                requested.ends_with(suffix.as_str()) && existing.ends_with(suffix.as_str())
            }
            MatchPolicy::Never => false,
        }
    }
}

/// Static description of a launchable application
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct AppDescriptor {
    pub kind: ApplicationKind,
    pub name: &'static str,
    pub default_title: &'static str,
    pub icon: &'static str,
    pub width: i32,
    pub height: i32,
    pub controls: ChromeControls,
    pub match_policy: MatchPolicy,
    pub start_maximized: bool,
}

pub fn descriptor(kind: ApplicationKind) -> AppDescriptor {
    let standard = ChromeControls::default();
    match kind {
        ApplicationKind::Notepad => AppDescriptor {
            kind,
            name: "Notepad",
            default_title: "Untitled - Notepad",
            icon: "notepad",
            width: 640,
            height: 480,
            controls: standard,
            // One Notepad per desktop, whatever document it has open
            match_policy: MatchPolicy::TitleSuffix(" - Notepad".to_string()),
            start_maximized: false,
        },
        ApplicationKind::Calendar => AppDescriptor {
            kind,
            name: "Calendar",
            default_title: "Calendar",
            icon: "calendar",
            width: 420,
            height: 360,
            controls: ChromeControls::MINIMIZE | ChromeControls::CLOSE | ChromeControls::HELP,
            match_policy: MatchPolicy::ExactTitle,
            start_maximized: false,
        },
        ApplicationKind::Messenger => AppDescriptor {
            kind,
            name: "Messenger",
            default_title: "Contacts - Messenger",
            icon: "messenger",
            width: 360,
            height: 520,
            controls: standard,
            match_policy: MatchPolicy::TitleSuffix(" - Messenger".to_string()),
            start_maximized: false,
        },
        ApplicationKind::Explorer => AppDescriptor {
            kind,
            name: "My Computer",
            default_title: "My Computer",
            icon: "explorer",
            width: 800,
            height: 600,
            controls: standard,
            match_policy: MatchPolicy::Never,
            start_maximized: false,
        },
        ApplicationKind::Intranet => AppDescriptor {
            kind,
            name: "Intranet Mail",
            default_title: "Intranet Mail",
            icon: "intranet",
            width: 1024,
            height: 768,
            // No maximize button, but it always opens full screen
            controls: ChromeControls::MINIMIZE | ChromeControls::CLOSE,
            match_policy: MatchPolicy::ExactTitle,
            start_maximized: true,
        },
        ApplicationKind::Generic => AppDescriptor {
            kind,
            name: "Window",
            default_title: "Window",
            icon: "window",
            width: 800,
            height: 600,
            controls: standard,
            match_policy: MatchPolicy::ExactTitle,
            start_maximized: false,
        },
    }
}

/// Build the window request an application sends when launched from the shell
pub fn launch_request(kind: ApplicationKind) -> WindowConfig {
    let app = descriptor(kind);
    WindowConfig::new(app.default_title)
        .kind(kind)
        .icon(app.icon)
        .size(app.width, app.height)
        .controls(app.controls)
        .start_maximized(app.start_maximized)
        .match_policy(app.match_policy)
}
