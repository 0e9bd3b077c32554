use crate::keys::KeyEvent;
use anyhow::{Context, Result};
use evdev::{Device, InputEventKind, Key};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Key-capture collaborator: reads raw key events from an evdev keyboard
/// and feeds the symbols the switcher understands into a channel.
pub struct KeyboardMonitor {
    device: Device,
}

impl KeyboardMonitor {
    /// Find and open a keyboard device
    pub fn new() -> Result<Self> {
        let device = Self::find_keyboard_device().context("Failed to find keyboard device")?;

        info!("Using keyboard device: {:?}", device.name());

        Ok(KeyboardMonitor { device })
    }

    /// Find a suitable keyboard device from /dev/input/event*
    fn find_keyboard_device() -> Result<Device> {
        let devices = evdev::enumerate();

        // Look for a device that supports the keys we need
        for (_, device) in devices {
            if let Some(keys) = device.supported_keys() {
                if keys.contains(Key::KEY_LEFTALT)
                    && keys.contains(Key::KEY_TAB)
                    && keys.contains(Key::KEY_ESC)
                {
                    debug!("Found suitable keyboard: {:?}", device.name());
                    return Ok(device);
                }
            }
        }

        anyhow::bail!(
            "No suitable keyboard device found. Make sure you have permission \
             to read /dev/input/event* devices (add your user to the 'input' group)."
        )
    }

    /// Start monitoring keyboard events and send them through the channel
    /// This runs in a blocking thread and communicates via the channel
    pub fn monitor_blocking(mut self, tx: mpsc::UnboundedSender<KeyEvent>) -> Result<()> {
        info!("Starting keyboard monitoring");

        loop {
            match self.device.fetch_events() {
                Ok(events) => {
                    for event in events {
                        if let InputEventKind::Key(key) = event.kind() {
                            let key_event = translate(key, event.value());

                            if let Some(ke) = key_event {
                                debug!("Key event: {:?}", ke);
                                if tx.send(ke).is_err() {
                                    warn!("Failed to send key event, receiver dropped");
                                    return Ok(());
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    if e.kind() == std::io::ErrorKind::WouldBlock {
                        // No events available, sleep briefly
                        std::thread::sleep(std::time::Duration::from_millis(10));
                    } else {
                        return Err(e.into());
                    }
                }
            }
        }
    }
}

/// Translate an evdev key transition (value 1 = press, 0 = release) into a
/// switcher key symbol. Keys the switcher does not react to map to `None`.
fn translate(key: Key, value: i32) -> Option<KeyEvent> {
    match (key, value) {
        (Key::KEY_LEFTALT | Key::KEY_RIGHTALT, 1) => Some(KeyEvent::AltPressed),
        (Key::KEY_LEFTALT | Key::KEY_RIGHTALT, 0) => Some(KeyEvent::AltReleased),
        (Key::KEY_LEFTSHIFT | Key::KEY_RIGHTSHIFT, 1) => Some(KeyEvent::ShiftPressed),
        (Key::KEY_LEFTSHIFT | Key::KEY_RIGHTSHIFT, 0) => Some(KeyEvent::ShiftReleased),
        (Key::KEY_TAB, 1) => Some(KeyEvent::TabPressed),
        (Key::KEY_SPACE, 1) => Some(KeyEvent::SpacePressed),
        (Key::KEY_ESC, 1) => Some(KeyEvent::EscapePressed),
        (Key::KEY_UP, 1) => Some(KeyEvent::UpPressed),
        (Key::KEY_DOWN, 1) => Some(KeyEvent::DownPressed),
        _ => None,
    }
}
