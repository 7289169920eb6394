// Tauri commands: thin wrappers over the desktop service and asset loader.
// Errors cross into the webview as strings.

use log::warn;
use serde::Serialize;
use tauri::{AppHandle, Emitter, State};
use tokio::sync::broadcast::error::RecvError;

use crate::apps::ApplicationKind;
use crate::asset_loader::{AssetInfo, AssetLoader, AssetType};
use crate::desktop::service::DesktopHandle;
use crate::state::events::WindowEvent;
use crate::state::geometry::Viewport;
use crate::state::window::{Geometry, WindowConfig, WindowId, WindowRecord};
use crate::taskbar::start_menu::StartMenuEntry;
use crate::taskbar::TaskbarTab;

// ===== Window Management Commands =====

#[tauri::command]
pub async fn create_window(
    config: WindowConfig,
    desktop: State<'_, DesktopHandle>,
) -> Result<WindowRecord, String> {
    desktop.create_window(config).await.map_err(|e| e.to_string())
}

/// Start menu launch by app name ("notepad", "calendar", ...)
#[tauri::command]
pub async fn launch_app(
    app_name: String,
    desktop: State<'_, DesktopHandle>,
) -> Result<WindowRecord, String> {
    let kind = app_name
        .parse::<ApplicationKind>()
        .map_err(|e| e.to_string())?;
    desktop.launch(kind).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn activate_window(id: WindowId, desktop: State<'_, DesktopHandle>) -> Result<(), String> {
    desktop.activate(id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn deactivate_window(
    id: WindowId,
    desktop: State<'_, DesktopHandle>,
) -> Result<(), String> {
    desktop.deactivate(id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn minimize_window(id: WindowId, desktop: State<'_, DesktopHandle>) -> Result<(), String> {
    desktop.minimize(id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn maximize_window(id: WindowId, desktop: State<'_, DesktopHandle>) -> Result<(), String> {
    desktop.maximize(id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn close_window(
    id: WindowId,
    desktop: State<'_, DesktopHandle>,
) -> Result<WindowRecord, String> {
    desktop.close(id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn begin_drag(id: WindowId, desktop: State<'_, DesktopHandle>) -> Result<(), String> {
    desktop.begin_drag(id).await.map_err(|e| e.to_string())
}

/// `dx`/`dy` are the pointer offset since `begin_drag`
#[tauri::command]
pub async fn drag_window(
    id: WindowId,
    dx: i32,
    dy: i32,
    desktop: State<'_, DesktopHandle>,
) -> Result<Geometry, String> {
    desktop.drag(id, dx, dy).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn end_drag(desktop: State<'_, DesktopHandle>) -> Result<(), String> {
    desktop.end_drag().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn taskbar_tab_clicked(
    id: WindowId,
    desktop: State<'_, DesktopHandle>,
) -> Result<(), String> {
    desktop.tab_clicked(id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn toggle_start_menu(desktop: State<'_, DesktopHandle>) -> Result<bool, String> {
    desktop.toggle_start_menu().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn click_background(desktop: State<'_, DesktopHandle>) -> Result<(), String> {
    desktop.click_background().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_windows(desktop: State<'_, DesktopHandle>) -> Result<Vec<WindowRecord>, String> {
    desktop.list_windows().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_taskbar(desktop: State<'_, DesktopHandle>) -> Result<Vec<TaskbarTab>, String> {
    desktop.list_taskbar().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn list_start_menu(
    desktop: State<'_, DesktopHandle>,
) -> Result<Vec<StartMenuEntry>, String> {
    desktop.list_start_menu().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn set_viewport(
    width: i32,
    height: i32,
    desktop: State<'_, DesktopHandle>,
) -> Result<(), String> {
    if width <= 0 || height <= 0 {
        return Err(format!("Invalid viewport {}x{}", width, height));
    }
    desktop
        .set_viewport(Viewport::new(width, height))
        .await
        .map_err(|e| e.to_string())
}

// ===== Asset Commands =====

#[tauri::command]
pub async fn load_stylesheet(name: String, assets: State<'_, AssetLoader>) -> Result<String, String> {
    assets.load_stylesheet(&name).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn load_asset(
    url: String,
    asset_type: AssetType,
    assets: State<'_, AssetLoader>,
) -> Result<AssetInfo, String> {
    assets.load(&url, asset_type).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_asset_cache(
    asset_type: Option<AssetType>,
    assets: State<'_, AssetLoader>,
) -> Result<String, String> {
    assets.clear_cache(asset_type).await.map_err(|e| e.to_string())
}

// ===== Event forwarding =====

#[derive(Clone, Serialize)]
#[serde(untagged)]
enum EventPayload {
    Window(WindowRecord),
    Closed(WindowId),
}

impl From<WindowEvent> for EventPayload {
    fn from(event: WindowEvent) -> Self {
        match event {
            WindowEvent::Created(record) | WindowEvent::StateChanged(record) => {
                EventPayload::Window(record)
            }
            WindowEvent::Closed(id) => EventPayload::Closed(id),
        }
    }
}

/// Push every window event to the webview until the service stops
pub fn forward_events(app: AppHandle, desktop: &DesktopHandle) {
    let mut events = desktop.subscribe();
    tauri::async_runtime::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    let name = event.name();
                    if let Err(e) = app.emit(name, EventPayload::from(event)) {
                        warn!("[Desktop] Failed to emit {}: {}", name, e);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("[Desktop] Event forwarder lagged, {} events dropped", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}
