use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use eframe::CreationContext;
use solohost_plugin_host::{PluginInstance, PluginSlot, SlotObserver};
use solohost_ui::Theme;
use tracing::debug;

use crate::window::MainWindow;

/// Fixed processing configuration for the startup load.
pub const SAMPLE_RATE: f64 = 44_100.0;
pub const BUFFER_SIZE: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppPhase {
    Uninitialized,
    Running,
    ShutDown,
}

/// Bridges slot lifecycle notifications into the window's editor views.
/// Registered once when the slot is constructed.
struct EditorBridge {
    window: Rc<RefCell<MainWindow>>,
}

impl SlotObserver for EditorBridge {
    fn on_plugin_created(&mut self, instance: &mut PluginInstance) {
        self.window.borrow_mut().install_editor(instance);
    }

    fn on_plugin_removed(&mut self, _instance: &mut PluginInstance) {
        self.window.borrow_mut().uninstall_editor();
    }
}

pub struct SoloHostApp {
    // Declaration order is teardown order: the window is released before
    // the container.
    window: Rc<RefCell<MainWindow>>,
    slot: PluginSlot,
    theme: Theme,
    phase: AppPhase,
}

impl SoloHostApp {
    pub fn new(cc: &CreationContext<'_>, plugin_path: Option<PathBuf>) -> Self {
        let theme = Theme::init(&cc.egui_ctx);
        let window = Rc::new(RefCell::new(MainWindow::new()));
        let mut slot = PluginSlot::new();
        slot.observe(Box::new(EditorBridge {
            window: Rc::clone(&window),
        }));

        let mut app = Self {
            window,
            slot,
            theme,
            phase: AppPhase::Uninitialized,
        };
        app.phase = AppPhase::Running;
        debug!("shell running");

        if let Some(path) = plugin_path {
            // A failed startup load opens the shell empty.
            let _ = app.slot.load_from_file(&path, SAMPLE_RATE, BUFFER_SIZE);
        }
        app
    }
}

impl eframe::App for SoloHostApp {
    fn update(&mut self, ctx: &eframe::egui::Context, _frame: &mut eframe::Frame) {
        if self.phase != AppPhase::Running {
            return;
        }
        self.window.borrow_mut().show(ctx, &mut self.slot, &self.theme);
    }

    fn on_exit(&mut self) {
        self.phase = AppPhase::ShutDown;
        debug!("shell shut down");
        self.window.borrow_mut().uninstall_editor();
        self.slot.unload();
    }
}
