// The shell surface: window manager, taskbar and start menu kept in step

pub mod service;

use log::debug;

use crate::apps::{launch_request, ApplicationKind};
use crate::error::WindowError;
use crate::state::events::{WindowEvent, WindowObserver};
use crate::state::geometry::{Layout, Viewport};
use crate::state::window::{Geometry, WindowConfig, WindowId, WindowRecord};
use crate::state::WindowManager;
use crate::taskbar::start_menu::StartMenu;
use crate::taskbar::Taskbar;

/// User intents go in, window events come out to the taskbar and every
/// subscribed observer, in that order.
pub struct Desktop {
    manager: WindowManager,
    taskbar: Taskbar,
    start_menu: StartMenu,
    observers: Vec<Box<dyn WindowObserver + Send>>,
}

impl Desktop {
    pub fn new(layout: Layout) -> Self {
        Self {
            manager: WindowManager::new(layout),
            taskbar: Taskbar::new(),
            start_menu: StartMenu::new(),
            observers: Vec::new(),
        }
    }

    pub fn manager(&self) -> &WindowManager {
        &self.manager
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn start_menu(&self) -> &StartMenu {
        &self.start_menu
    }

    pub fn subscribe(&mut self, observer: Box<dyn WindowObserver + Send>) {
        self.observers.push(observer);
    }

    pub fn create_window(&mut self, config: WindowConfig) -> Result<WindowRecord, WindowError> {
        let result = self.manager.create_window(config);
        self.dispatch();
        if result.is_ok() {
            self.start_menu.close();
        }
        result
    }

    /// Start menu launch; focuses the existing window for single-instance apps
    pub fn launch(&mut self, kind: ApplicationKind) -> Result<WindowRecord, WindowError> {
        self.create_window(launch_request(kind))
    }

    pub fn activate(&mut self, id: WindowId) -> Result<(), WindowError> {
        let result = self.manager.activate(id);
        self.dispatch();
        if result.is_ok() {
            self.start_menu.close();
        }
        result
    }

    pub fn deactivate(&mut self, id: WindowId) -> Result<(), WindowError> {
        let result = self.manager.deactivate(id);
        self.dispatch();
        result
    }

    /// Click on empty desktop: nothing keeps focus and the start menu closes
    pub fn click_background(&mut self) {
        self.manager.deactivate_all();
        self.manager.end_drag();
        self.start_menu.close();
        self.dispatch();
    }

    pub fn minimize(&mut self, id: WindowId) -> Result<(), WindowError> {
        let result = self.manager.minimize(id);
        self.dispatch();
        result
    }

    pub fn maximize(&mut self, id: WindowId) -> Result<(), WindowError> {
        let result = self.manager.maximize(id);
        self.dispatch();
        result
    }

    pub fn close(&mut self, id: WindowId) -> Result<WindowRecord, WindowError> {
        let result = self.manager.close(id);
        self.dispatch();
        result
    }

    pub fn begin_drag(&mut self, id: WindowId) -> Result<(), WindowError> {
        self.manager.begin_drag(id)
    }

    pub fn drag(&mut self, id: WindowId, dx: i32, dy: i32) -> Result<Geometry, WindowError> {
        let result = self.manager.drag(id, dx, dy);
        self.dispatch();
        result
    }

    pub fn end_drag(&mut self) {
        self.manager.end_drag();
    }

    /// Taskbar tab click: bring a minimized window back, then focus it
    pub fn tab_clicked(&mut self, id: WindowId) -> Result<(), WindowError> {
        let minimized = self
            .manager
            .get(id)
            .ok_or(WindowError::NotFound(id))?
            .is_minimized();
        if minimized {
            self.manager.minimize(id)?;
        } else {
            debug!("[Desktop] Tab {} clicked, window already visible", id);
        }
        self.activate(id)
    }

    /// Returns the new open state
    pub fn toggle_start_menu(&mut self) -> bool {
        self.start_menu.toggle()
    }

    pub fn set_icon_source(&mut self, id: WindowId, source: String) -> Result<(), WindowError> {
        let result = self.manager.set_icon_source(id, source);
        self.dispatch();
        result
    }

    pub fn set_title(&mut self, id: WindowId, title: String) -> Result<(), WindowError> {
        let result = self.manager.set_title(id, title);
        self.dispatch();
        result
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.manager.set_viewport(viewport);
        self.dispatch();
    }

    fn dispatch(&mut self) {
        for event in self.manager.take_events() {
            self.taskbar.apply(&event);
            for observer in self.observers.iter_mut() {
                observer.on_event(&event);
            }
        }
    }
}
