// Application catalog: per-app window defaults
pub mod apps;

// Asset loader module for bundled icons, stylesheets and cached downloads
#[path = "assetLoader/mod.rs"]
pub mod asset_loader;

pub mod config;

// Desktop surface and its async service
pub mod desktop;

pub mod error;

// Window state management module
pub mod state;

// Taskbar and start menu
pub mod taskbar;

#[cfg(feature = "desktop")]
mod commands;

pub use asset_loader::AssetLoader;
pub use config::DesktopConfig;
pub use desktop::service::{DesktopHandle, DesktopService};
pub use desktop::Desktop;
pub use state::WindowManager;

#[cfg(feature = "desktop")]
pub fn run() {
    use commands::*;
    use log::{info, warn};
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .setup(|app| {
            let config_path = app.path().app_config_dir()?.join(config::CONFIG_FILE_NAME);
            let mut config = match DesktopConfig::load_or_default(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("[Config] {} ignored: {}", config_path.display(), e);
                    DesktopConfig::default()
                }
            };
            // Relative paths are resolved against the app's own directories
            if config.asset_root.is_relative() {
                config.asset_root = app.path().resource_dir()?.join(&config.asset_root);
            }
            if config.cache_dir.is_relative() {
                config.cache_dir = app.path().app_data_dir()?.join(&config.cache_dir);
            }

            let assets = AssetLoader::from_config(&config);
            let layout = config.layout();
            let service_assets = assets.clone();
            let desktop = tauri::async_runtime::block_on(async move {
                DesktopService::spawn(layout, service_assets)
            });

            forward_events(app.handle().clone(), &desktop);
            app.manage(desktop);
            app.manage(assets);

            info!(
                "Desktop initialized ({}x{}, assets at {})",
                config.viewport.width,
                config.viewport.height,
                config.asset_root.display()
            );
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Window management commands
            create_window,
            launch_app,
            activate_window,
            deactivate_window,
            minimize_window,
            maximize_window,
            close_window,
            begin_drag,
            drag_window,
            end_drag,
            // Taskbar and start menu
            taskbar_tab_clicked,
            toggle_start_menu,
            click_background,
            list_windows,
            list_taskbar,
            list_start_menu,
            set_viewport,
            // Assets
            load_stylesheet,
            load_asset,
            clear_asset_cache,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
