use crate::cursor::CycleCursor;
use crate::hypr_client::{HyprClient, HyprctlClient};
use crate::ipc::Command;
use crate::keys::{route_key, KeyAction, KeyEvent};
use crate::presenter::{Presenter, TextPresenter};
use crate::window_list::{parse_clients, WindowRecord};
use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The primary instance's core: owns the window list, the selection cursor
/// and the presenter, and routes commands and key events to them.
///
/// The window snapshot is taken once at startup and never re-fetched.
pub struct Daemon<C: HyprClient = HyprctlClient, P: Presenter = TextPresenter> {
    client: C,
    presenter: P,
    windows: Vec<WindowRecord>,
    cursor: CycleCursor,
    shift_held: bool,
}

impl Daemon<HyprctlClient, TextPresenter> {
    pub fn new() -> Self {
        Self::with_parts(HyprctlClient::new(), TextPresenter::new())
    }
}

impl Default for Daemon<HyprctlClient, TextPresenter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HyprClient, P: Presenter> Daemon<C, P> {
    /// Create a daemon with custom collaborators (for testing)
    pub fn with_parts(client: C, presenter: P) -> Self {
        Daemon {
            client,
            presenter,
            windows: Vec::new(),
            cursor: CycleCursor::new(0),
            shift_held: false,
        }
    }

    /// Fetch and parse the window snapshot.
    ///
    /// A failed query or malformed snapshot leaves the list empty rather
    /// than aborting; cycling and activation are then simply no-ops.
    pub fn load_windows(&mut self) {
        let raw = match self.client.clients_json() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Window query failed, starting with an empty list: {:#}", e);
                String::new()
            }
        };

        self.windows = match parse_clients(&raw) {
            Ok(windows) => windows,
            Err(e) => {
                warn!("Ignoring malformed window snapshot: {}", e);
                Vec::new()
            }
        };
        self.cursor = CycleCursor::new(self.windows.len());

        info!("Loaded {} windows", self.windows.len());
    }

    /// Present the list and apply the initial cue, if any.
    pub fn show(&mut self, cue: Option<Command>) {
        self.presenter.show(&self.windows, self.cursor.index());
        if let Some(cmd) = cue {
            self.handle_command(cmd);
        }
    }

    pub fn current(&self) -> Option<&WindowRecord> {
        self.cursor.index().and_then(|i| self.windows.get(i))
    }

    /// Route a forwarded or seeded command to the cursor.
    pub fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Next => self.cycle(1),
            Command::Back => self.cycle(-1),
        }
    }

    fn cycle(&mut self, step: i64) {
        if let Some(index) = self.cursor.advance(step) {
            debug!("Selection moved to {} of {}", index, self.cursor.count());
            self.presenter.update_selection(index);
        }
    }

    /// Route a key event. Returns true when the event finalized a
    /// selection and the session is over.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        match event {
            KeyEvent::ShiftPressed => self.shift_held = true,
            KeyEvent::ShiftReleased => self.shift_held = false,
            _ => {}
        }

        match route_key(event, self.shift_held) {
            KeyAction::Confirm => self.activate(),
            KeyAction::ConfirmFirst => {
                self.cursor.set_to(0);
                self.activate()
            }
            KeyAction::CycleForward => {
                self.cycle(1);
                false
            }
            KeyAction::CycleBackward => {
                self.cycle(-1);
                false
            }
            KeyAction::Ignore => false,
        }
    }

    /// Activate the highlighted window and end the session.
    ///
    /// Issues the three dispatches in strict order, each fire-and-forget.
    /// Returns false (session continues) when the list is empty.
    fn activate(&mut self) -> bool {
        let Some(record) = self.current().cloned() else {
            debug!("Nothing to activate");
            return false;
        };

        info!(
            "Switching to {} on workspace {}",
            record.address, record.workspace
        );

        // Always focus, then workspace, then to top. Hyprland misbehaves
        // in any other order.
        self.fire(&format!("focuswindow address:{}", record.address));
        self.fire(&format!("workspace {}", record.workspace));
        self.fire("bringactivetotop");

        self.presenter.close();

        true
    }

    fn fire(&mut self, args: &str) {
        if let Err(e) = self.client.dispatch(args) {
            debug!("dispatch {} failed: {:#}", args, e);
        }
    }

    /// Main event loop: multiplexes forwarded commands and key events on a
    /// single task until a selection is finalized.
    pub async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<Command>,
        mut key_rx: mpsc::UnboundedReceiver<KeyEvent>,
    ) -> Result<()> {
        loop {
            // Biased: drain forwarded commands ahead of key events so a
            // burst of next/back repeats lands before a confirm decides.
            tokio::select! {
                biased;
                Some(cmd) = cmd_rx.recv() => {
                    self.handle_command(cmd);
                }
                Some(event) = key_rx.recv() => {
                    if self.handle_key(event) {
                        info!("Selection finalized, shutting down");
                        break;
                    }
                }
                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        Ok(())
    }
}
