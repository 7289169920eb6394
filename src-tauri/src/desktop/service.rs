// Desktop actor: one task owns the Desktop, callers talk to it through a cloneable handle

use log::{debug, info, warn};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::Desktop;
use crate::apps::ApplicationKind;
use crate::asset_loader::AssetLoader;
use crate::error::{ServiceError, WindowError};
use crate::state::events::{WindowEvent, WindowObserver};
use crate::state::geometry::{Layout, Viewport};
use crate::state::window::{Geometry, WindowConfig, WindowId, WindowRecord};
use crate::taskbar::start_menu::StartMenuEntry;
use crate::taskbar::TaskbarTab;

const COMMAND_BUFFER: usize = 64;
const EVENT_BUFFER: usize = 256;

type Reply<T> = oneshot::Sender<Result<T, WindowError>>;

enum Command {
    CreateWindow { config: WindowConfig, reply: Reply<WindowRecord> },
    Launch { kind: ApplicationKind, reply: Reply<WindowRecord> },
    Activate { id: WindowId, reply: Reply<()> },
    Deactivate { id: WindowId, reply: Reply<()> },
    Minimize { id: WindowId, reply: Reply<()> },
    Maximize { id: WindowId, reply: Reply<()> },
    Close { id: WindowId, reply: Reply<WindowRecord> },
    BeginDrag { id: WindowId, reply: Reply<()> },
    Drag { id: WindowId, dx: i32, dy: i32, reply: Reply<Geometry> },
    EndDrag { reply: oneshot::Sender<()> },
    TabClicked { id: WindowId, reply: Reply<()> },
    ToggleStartMenu { reply: oneshot::Sender<bool> },
    ClickBackground { reply: oneshot::Sender<()> },
    SetTitle { id: WindowId, title: String, reply: Reply<()> },
    SetViewport { viewport: Viewport, reply: oneshot::Sender<()> },
    ListWindows { reply: oneshot::Sender<Vec<WindowRecord>> },
    ListTaskbar { reply: oneshot::Sender<Vec<TaskbarTab>> },
    ListStartMenu { reply: oneshot::Sender<Vec<StartMenuEntry>> },
    Shutdown,
}

/// Re-publishes window events to any number of async listeners
struct BroadcastObserver {
    events: broadcast::Sender<WindowEvent>,
}

impl WindowObserver for BroadcastObserver {
    fn on_event(&mut self, event: &WindowEvent) {
        // No listeners is fine
        let _ = self.events.send(event.clone());
    }
}

/// Kicks off icon resolution for new windows. Results come back on `resolved`.
struct IconResolver {
    assets: AssetLoader,
    resolved: mpsc::UnboundedSender<(WindowId, String)>,
}

impl WindowObserver for IconResolver {
    fn on_event(&mut self, event: &WindowEvent) {
        let WindowEvent::Created(record) = event else {
            return;
        };
        if record.icon.is_empty() {
            return;
        }
        let id = record.id;
        let icon = record.icon.clone();
        let assets = self.assets.clone();
        let resolved = self.resolved.clone();
        tokio::spawn(async move {
            match assets.resolve_icon(&icon).await {
                Ok(source) => {
                    let _ = resolved.send((id, source.into_src()));
                }
                Err(e) => warn!("[Desktop] Icon '{}' for {} not resolved: {}", icon, id, e),
            }
        });
    }
}

pub struct DesktopService;

impl DesktopService {
    /// Spawn the actor on the current tokio runtime
    pub fn spawn(layout: Layout, assets: AssetLoader) -> DesktopHandle {
        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        let (resolved_tx, resolved_rx) = mpsc::unbounded_channel();

        let mut desktop = Desktop::new(layout);
        desktop.subscribe(Box::new(BroadcastObserver {
            events: events.clone(),
        }));
        desktop.subscribe(Box::new(IconResolver {
            assets,
            resolved: resolved_tx,
        }));

        tokio::spawn(run(desktop, command_rx, resolved_rx));
        info!("[Desktop] Service started");

        DesktopHandle { commands, events }
    }
}

async fn run(
    mut desktop: Desktop,
    mut commands: mpsc::Receiver<Command>,
    mut resolved: mpsc::UnboundedReceiver<(WindowId, String)>,
) {
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Shutdown) | None => break,
                Some(command) => handle(&mut desktop, command),
            },
            Some((id, source)) = resolved.recv() => {
                if let Err(e) = desktop.set_icon_source(id, source) {
                    debug!("[Desktop] Dropping late icon: {}", e);
                }
            }
        }
    }
    info!("[Desktop] Service stopped");
}

fn handle(desktop: &mut Desktop, command: Command) {
    // A dropped reply receiver just means the caller stopped waiting
    match command {
        Command::CreateWindow { config, reply } => {
            let _ = reply.send(desktop.create_window(config));
        }
        Command::Launch { kind, reply } => {
            let _ = reply.send(desktop.launch(kind));
        }
        Command::Activate { id, reply } => {
            let _ = reply.send(desktop.activate(id));
        }
        Command::Deactivate { id, reply } => {
            let _ = reply.send(desktop.deactivate(id));
        }
        Command::Minimize { id, reply } => {
            let _ = reply.send(desktop.minimize(id));
        }
        Command::Maximize { id, reply } => {
            let _ = reply.send(desktop.maximize(id));
        }
        Command::Close { id, reply } => {
            let _ = reply.send(desktop.close(id));
        }
        Command::BeginDrag { id, reply } => {
            let _ = reply.send(desktop.begin_drag(id));
        }
        Command::Drag { id, dx, dy, reply } => {
            let _ = reply.send(desktop.drag(id, dx, dy));
        }
        Command::EndDrag { reply } => {
            desktop.end_drag();
            let _ = reply.send(());
        }
        Command::TabClicked { id, reply } => {
            let _ = reply.send(desktop.tab_clicked(id));
        }
        Command::ToggleStartMenu { reply } => {
            let _ = reply.send(desktop.toggle_start_menu());
        }
        Command::ClickBackground { reply } => {
            desktop.click_background();
            let _ = reply.send(());
        }
        Command::SetTitle { id, title, reply } => {
            let _ = reply.send(desktop.set_title(id, title));
        }
        Command::SetViewport { viewport, reply } => {
            desktop.set_viewport(viewport);
            let _ = reply.send(());
        }
        Command::ListWindows { reply } => {
            let _ = reply.send(desktop.manager().get_all_windows());
        }
        Command::ListTaskbar { reply } => {
            let _ = reply.send(desktop.taskbar().tabs().to_vec());
        }
        Command::ListStartMenu { reply } => {
            let _ = reply.send(desktop.start_menu().entries().to_vec());
        }
        Command::Shutdown => {}
    }
}

/// Cloneable client for the desktop actor
#[derive(Clone)]
pub struct DesktopHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<WindowEvent>,
}

impl DesktopHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<WindowEvent> {
        self.events.subscribe()
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, ServiceError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(make(reply))
            .await
            .map_err(|_| ServiceError::Closed)?;
        response.await.map_err(|_| ServiceError::Closed)
    }

    pub async fn create_window(&self, config: WindowConfig) -> Result<WindowRecord, ServiceError> {
        Ok(self
            .request(|reply| Command::CreateWindow { config, reply })
            .await??)
    }

    pub async fn launch(&self, kind: ApplicationKind) -> Result<WindowRecord, ServiceError> {
        Ok(self.request(|reply| Command::Launch { kind, reply }).await??)
    }

    pub async fn activate(&self, id: WindowId) -> Result<(), ServiceError> {
        Ok(self.request(|reply| Command::Activate { id, reply }).await??)
    }

    pub async fn deactivate(&self, id: WindowId) -> Result<(), ServiceError> {
        Ok(self.request(|reply| Command::Deactivate { id, reply }).await??)
    }

    pub async fn minimize(&self, id: WindowId) -> Result<(), ServiceError> {
        Ok(self.request(|reply| Command::Minimize { id, reply }).await??)
    }

    pub async fn maximize(&self, id: WindowId) -> Result<(), ServiceError> {
        Ok(self.request(|reply| Command::Maximize { id, reply }).await??)
    }

    pub async fn close(&self, id: WindowId) -> Result<WindowRecord, ServiceError> {
        Ok(self.request(|reply| Command::Close { id, reply }).await??)
    }

    pub async fn begin_drag(&self, id: WindowId) -> Result<(), ServiceError> {
        Ok(self.request(|reply| Command::BeginDrag { id, reply }).await??)
    }

    pub async fn drag(&self, id: WindowId, dx: i32, dy: i32) -> Result<Geometry, ServiceError> {
        Ok(self
            .request(|reply| Command::Drag { id, dx, dy, reply })
            .await??)
    }

    pub async fn end_drag(&self) -> Result<(), ServiceError> {
        self.request(|reply| Command::EndDrag { reply }).await
    }

    pub async fn tab_clicked(&self, id: WindowId) -> Result<(), ServiceError> {
        Ok(self.request(|reply| Command::TabClicked { id, reply }).await??)
    }

    pub async fn toggle_start_menu(&self) -> Result<bool, ServiceError> {
        self.request(|reply| Command::ToggleStartMenu { reply }).await
    }

    pub async fn click_background(&self) -> Result<(), ServiceError> {
        self.request(|reply| Command::ClickBackground { reply }).await
    }

    pub async fn set_title(&self, id: WindowId, title: String) -> Result<(), ServiceError> {
        Ok(self
            .request(|reply| Command::SetTitle { id, title, reply })
            .await??)
    }

    pub async fn set_viewport(&self, viewport: Viewport) -> Result<(), ServiceError> {
        self.request(|reply| Command::SetViewport { viewport, reply })
            .await
    }

    pub async fn list_windows(&self) -> Result<Vec<WindowRecord>, ServiceError> {
        self.request(|reply| Command::ListWindows { reply }).await
    }

    pub async fn list_taskbar(&self) -> Result<Vec<TaskbarTab>, ServiceError> {
        self.request(|reply| Command::ListTaskbar { reply }).await
    }

    pub async fn list_start_menu(&self) -> Result<Vec<StartMenuEntry>, ServiceError> {
        self.request(|reply| Command::ListStartMenu { reply }).await
    }

    /// Stop the actor; every handle fails with `Closed` afterwards
    pub async fn shutdown(&self) -> Result<(), ServiceError> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| ServiceError::Closed)
    }
}
