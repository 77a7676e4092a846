//! Single-slot plugin hosting for SoloHost.
//!
//! This crate owns the format registry and at most one hosted plugin
//! instance. Formats are thin wrappers around the dynamic entry points
//! exposed by third-party plugin binaries; the wrappers validate the entry
//! point and keep the library mapped for the lifetime of the instance. The
//! slot raises creation/removal notifications synchronously so the shell's
//! window can install or tear down editor views.

mod editor;
mod error;
pub mod formats;
mod instance;
mod parameters;

use std::path::Path;

use tracing::{debug, info};

pub use editor::{EditorCommand, EditorEvent, EditorHandle, SharedReceiver};
pub use error::HostError;
pub use formats::{default_formats, PluginFormat};
pub use instance::{PluginBinary, PluginInstance, DEFAULT_EDITOR_SIZE};
pub use parameters::PluginParam;

/// Fixed processing configuration a plugin is instantiated with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessConfig {
    pub sample_rate: f64,
    pub buffer_size: usize,
}

/// Observer over the slot's lifecycle. Registered once at construction.
pub trait SlotObserver {
    fn on_plugin_created(&mut self, instance: &mut PluginInstance);
    fn on_plugin_removed(&mut self, instance: &mut PluginInstance);
}

/// Container owning the format registry and at most one plugin instance.
///
/// Loading a new plugin implicitly removes any previously loaded one, so a
/// removal notification (if an instance existed) is always immediately
/// followed by a creation notification.
pub struct PluginSlot {
    formats: Vec<Box<dyn PluginFormat>>,
    observers: Vec<Box<dyn SlotObserver>>,
    instance: Option<PluginInstance>,
}

impl PluginSlot {
    /// Slot with the built-in format registry.
    pub fn new() -> Self {
        Self::with_formats(default_formats())
    }

    /// Slot with an explicit, ordered format registry.
    pub fn with_formats(formats: Vec<Box<dyn PluginFormat>>) -> Self {
        Self {
            formats,
            observers: Vec::new(),
            instance: None,
        }
    }

    /// Register a lifecycle observer.
    pub fn observe(&mut self, observer: Box<dyn SlotObserver>) {
        self.observers.push(observer);
    }

    /// Load a plugin binary, replacing any currently loaded instance.
    ///
    /// Formats are probed in registration order; the first whose detection
    /// rule matches is asked to instantiate. On failure the currently loaded
    /// instance (if any) is left untouched and no notification fires.
    pub fn load_from_file(
        &mut self,
        path: &Path,
        sample_rate: f64,
        buffer_size: usize,
    ) -> Result<(), HostError> {
        let config = ProcessConfig {
            sample_rate,
            buffer_size,
        };

        let Some(format) = self.formats.iter().find(|format| format.recognizes(path)) else {
            return Err(HostError::FormatNotRecognized(path.to_path_buf()));
        };
        debug!(format = format.name(), path = %path.display(), "format matched");

        let instance =
            format
                .instantiate(path, &config)
                .map_err(|source| HostError::InstantiationFailed {
                    path: path.to_path_buf(),
                    source: Box::new(source),
                })?;

        self.unload();

        info!(name = instance.name(), format = instance.format(), "plugin loaded");
        let instance = self.instance.insert(instance);
        for observer in &mut self.observers {
            observer.on_plugin_created(instance);
        }
        Ok(())
    }

    /// Remove the current plugin, if any. Raises a removal notification
    /// before the editor and instance are released.
    pub fn unload(&mut self) {
        let Some(mut instance) = self.instance.take() else {
            return;
        };

        info!(name = instance.name(), "plugin unloaded");
        for observer in &mut self.observers {
            observer.on_plugin_removed(&mut instance);
        }
        instance.release_editor();
    }

    pub fn instance(&self) -> Option<&PluginInstance> {
        self.instance.as_ref()
    }

    pub fn instance_mut(&mut self) -> Option<&mut PluginInstance> {
        self.instance.as_mut()
    }
}

impl Default for PluginSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PluginSlot {
    fn drop(&mut self) {
        self.unload();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use super::*;

    struct StubFormat {
        name: &'static str,
        extension: &'static str,
        fail: bool,
    }

    impl StubFormat {
        fn recognizing(extension: &'static str) -> Self {
            Self {
                name: "Stub",
                extension,
                fail: false,
            }
        }

        fn failing(extension: &'static str) -> Self {
            Self {
                name: "Stub",
                extension,
                fail: true,
            }
        }
    }

    impl PluginFormat for StubFormat {
        fn name(&self) -> &'static str {
            self.name
        }

        fn recognizes(&self, path: &Path) -> bool {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == self.extension)
                .unwrap_or(false)
        }

        fn instantiate(
            &self,
            path: &Path,
            config: &ProcessConfig,
        ) -> Result<PluginInstance, HostError> {
            if self.fail {
                return Err(HostError::MissingBinary(path.to_path_buf()));
            }
            Ok(PluginInstance::new(
                path,
                self.name,
                PluginBinary::Stub,
                *config,
            ))
        }
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Created(String),
        Removed(String),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Event>>>);

    impl Recorder {
        fn events(&self) -> Vec<Event> {
            self.0.borrow_mut().drain(..).collect()
        }
    }

    impl SlotObserver for Recorder {
        fn on_plugin_created(&mut self, instance: &mut PluginInstance) {
            self.0
                .borrow_mut()
                .push(Event::Created(instance.name().to_string()));
        }

        fn on_plugin_removed(&mut self, instance: &mut PluginInstance) {
            self.0
                .borrow_mut()
                .push(Event::Removed(instance.name().to_string()));
        }
    }

    fn slot_with_recorder() -> (PluginSlot, Recorder) {
        let mut slot = PluginSlot::with_formats(vec![Box::new(StubFormat::recognizing("stub"))]);
        let recorder = Recorder::default();
        slot.observe(Box::new(recorder.clone()));
        (slot, recorder)
    }

    fn load(slot: &mut PluginSlot, path: &str) -> Result<(), HostError> {
        slot.load_from_file(&PathBuf::from(path), 44_100.0, 1024)
    }

    #[test]
    fn first_load_raises_one_creation() {
        let (mut slot, recorder) = slot_with_recorder();
        load(&mut slot, "/plugins/alpha.stub").unwrap();
        assert_eq!(recorder.events(), vec![Event::Created("alpha".into())]);
        assert_eq!(slot.instance().unwrap().name(), "alpha");
    }

    #[test]
    fn replacing_load_raises_removal_then_creation() {
        let (mut slot, recorder) = slot_with_recorder();
        load(&mut slot, "/plugins/alpha.stub").unwrap();
        recorder.events();

        load(&mut slot, "/plugins/beta.stub").unwrap();
        assert_eq!(
            recorder.events(),
            vec![
                Event::Removed("alpha".into()),
                Event::Created("beta".into())
            ]
        );
        assert_eq!(slot.instance().unwrap().name(), "beta");
    }

    #[test]
    fn unrecognized_file_leaves_instance_untouched() {
        let (mut slot, recorder) = slot_with_recorder();
        load(&mut slot, "/plugins/alpha.stub").unwrap();
        recorder.events();

        let err = load(&mut slot, "/plugins/beta.unknown").unwrap_err();
        assert!(matches!(err, HostError::FormatNotRecognized(_)));
        assert!(recorder.events().is_empty());
        assert_eq!(slot.instance().unwrap().name(), "alpha");
    }

    #[test]
    fn instantiation_failure_leaves_instance_untouched() {
        let mut slot = PluginSlot::with_formats(vec![
            Box::new(StubFormat::recognizing("stub")),
            Box::new(StubFormat::failing("bad")),
        ]);
        let recorder = Recorder::default();
        slot.observe(Box::new(recorder.clone()));

        load(&mut slot, "/plugins/alpha.stub").unwrap();
        recorder.events();

        let err = load(&mut slot, "/plugins/broken.bad").unwrap_err();
        assert!(matches!(err, HostError::InstantiationFailed { .. }));
        assert!(recorder.events().is_empty());
        assert_eq!(slot.instance().unwrap().name(), "alpha");
    }

    #[test]
    fn registration_order_decides_the_matching_format() {
        let mut slot = PluginSlot::with_formats(vec![
            Box::new(StubFormat {
                name: "First",
                extension: "stub",
                fail: false,
            }),
            Box::new(StubFormat {
                name: "Second",
                extension: "stub",
                fail: true,
            }),
        ]);
        load(&mut slot, "/plugins/alpha.stub").unwrap();
        assert_eq!(slot.instance().unwrap().format(), "First");
    }

    #[test]
    fn unload_twice_raises_a_single_removal() {
        let (mut slot, recorder) = slot_with_recorder();
        load(&mut slot, "/plugins/alpha.stub").unwrap();
        recorder.events();

        slot.unload();
        assert_eq!(recorder.events(), vec![Event::Removed("alpha".into())]);

        slot.unload();
        assert!(recorder.events().is_empty());
        assert!(slot.instance().is_none());
    }
}
