use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;

/// Commands sent by the host UI toward the plugin editor surface.
#[derive(Debug, Clone)]
pub enum EditorCommand {
    Close,
    RequestResize { width: u32, height: u32 },
}

/// Events reported by the editor surface back toward the UI host.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    Closed,
    Resized { width: u32, height: u32 },
}

/// Receiver that can be shared between clones of an editor handle.
#[derive(Debug, Clone)]
pub struct SharedReceiver<T> {
    inner: Arc<Mutex<Receiver<T>>>,
}

impl<T> SharedReceiver<T> {
    pub fn new(rx: Receiver<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rx)),
        }
    }

    pub fn try_recv(&self) -> Option<T> {
        self.inner.lock().try_recv().ok()
    }

    pub fn drain(&self) -> Vec<T> {
        let mut guard = self.inner.lock();
        let mut events = Vec::new();
        while let Ok(event) = guard.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Handle to the hosted plugin's editor surface.
///
/// Clones share the surface geometry and the command/event channels, so the
/// window can keep a handle while the instance owns the surface itself.
#[derive(Debug, Clone)]
pub struct EditorHandle {
    size: Arc<Mutex<[u32; 2]>>,
    commands: Sender<EditorCommand>,
    events: SharedReceiver<EditorEvent>,
}

impl EditorHandle {
    /// Current surface size in logical pixels.
    pub fn size(&self) -> [u32; 2] {
        *self.size.lock()
    }

    pub(crate) fn set_size(&self, size: [u32; 2]) {
        *self.size.lock() = size;
    }

    /// Ask the surface to adopt a new size. The instance acknowledges with
    /// an [`EditorEvent::Resized`] the next time it is pumped.
    pub fn request_resize(&self, width: u32, height: u32) {
        let _ = self.commands.send(EditorCommand::RequestResize { width, height });
    }

    pub fn close(&self) {
        let _ = self.commands.send(EditorCommand::Close);
    }

    /// Drain pending surface events without blocking.
    pub fn drain_events(&self) -> Vec<EditorEvent> {
        self.events.drain()
    }
}

pub(crate) fn create_editor_handle(
    initial_size: [u32; 2],
) -> (EditorHandle, Receiver<EditorCommand>, Sender<EditorEvent>) {
    let (command_tx, command_rx) = unbounded();
    let (event_tx, event_rx) = unbounded();

    let handle = EditorHandle {
        size: Arc::new(Mutex::new(initial_size)),
        commands: command_tx,
        events: SharedReceiver::new(event_rx),
    };

    (handle, command_rx, event_tx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_size_updates() {
        let (handle, _commands, _events) = create_editor_handle([480, 320]);
        let clone = handle.clone();
        handle.set_size([800, 600]);
        assert_eq!(clone.size(), [800, 600]);
    }

    #[test]
    fn drain_returns_events_in_order() {
        let (handle, _commands, events) = create_editor_handle([480, 320]);
        events
            .send(EditorEvent::Resized {
                width: 700,
                height: 500,
            })
            .unwrap();
        events.send(EditorEvent::Closed).unwrap();
        let drained = handle.drain_events();
        assert_eq!(drained.len(), 2);
        assert!(matches!(
            drained[0],
            EditorEvent::Resized {
                width: 700,
                height: 500
            }
        ));
        assert!(matches!(drained[1], EditorEvent::Closed));
        assert!(handle.drain_events().is_empty());
    }
}
