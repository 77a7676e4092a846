use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use crate::editor::{create_editor_handle, EditorCommand, EditorEvent, EditorHandle};
use crate::formats::{ClapModule, Vst2Module, Vst3Module};
use crate::parameters::{placeholder_bank, PluginParam};
use crate::ProcessConfig;

/// Default natural size of a freshly created editor surface.
pub const DEFAULT_EDITOR_SIZE: [u32; 2] = [480, 320];

const PLACEHOLDER_PARAM_COUNT: usize = 8;

/// Loaded plugin binary, keeping the dynamic library mapped for the
/// lifetime of the instance.
#[derive(Debug)]
pub enum PluginBinary {
    Vst3(Vst3Module),
    Clap(ClapModule),
    Vst2(Vst2Module),
    #[cfg(test)]
    Stub,
}

struct EditorState {
    handle: EditorHandle,
    commands: Receiver<EditorCommand>,
    events: Sender<EditorEvent>,
}

/// A single hosted plugin instance together with its optional editor
/// surface.
pub struct PluginInstance {
    name: String,
    format: &'static str,
    path: PathBuf,
    config: ProcessConfig,
    binary: PluginBinary,
    parameters: Vec<PluginParam>,
    editor: Option<EditorState>,
}

impl PluginInstance {
    pub(crate) fn new(
        path: &Path,
        format: &'static str,
        binary: PluginBinary,
        config: ProcessConfig,
    ) -> Self {
        let name = path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("Unknown Plugin")
            .to_string();
        Self {
            name,
            format,
            path: path.to_path_buf(),
            config,
            binary,
            parameters: placeholder_bank(PLACEHOLDER_PARAM_COUNT),
            editor: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label of the format that instantiated this plugin.
    pub fn format(&self) -> &'static str {
        self.format
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> ProcessConfig {
        self.config
    }

    /// The loaded binary. Holding it keeps the plugin library mapped.
    pub fn binary(&self) -> &PluginBinary {
        &self.binary
    }

    pub fn parameters(&self) -> &[PluginParam] {
        &self.parameters
    }

    /// Set a parameter's plain value, clamped to its range.
    pub fn set_parameter(&mut self, index: usize, value: f32) {
        if let Some(param) = self.parameters.get_mut(index) {
            param.value = value.clamp(param.min, param.max);
        }
    }

    /// Create the native editor surface on first call, reuse it afterwards.
    pub fn create_editor_if_needed(&mut self) -> EditorHandle {
        if let Some(editor) = &self.editor {
            return editor.handle.clone();
        }

        let (handle, commands, events) = create_editor_handle(DEFAULT_EDITOR_SIZE);
        debug!(plugin = %self.name, "editor surface created");
        self.editor = Some(EditorState {
            handle: handle.clone(),
            commands,
            events,
        });
        handle
    }

    pub fn editor(&self) -> Option<&EditorHandle> {
        self.editor.as_ref().map(|editor| &editor.handle)
    }

    /// Drop the editor surface, notifying handle holders.
    pub fn release_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            let _ = editor.events.send(EditorEvent::Closed);
        }
    }

    /// Service pending editor commands. Resize requests are applied to the
    /// shared surface geometry and acknowledged with a resize event.
    pub fn pump_editor(&mut self) {
        let Some(editor) = self.editor.as_ref() else {
            return;
        };

        let mut close_requested = false;
        while let Ok(command) = editor.commands.try_recv() {
            match command {
                EditorCommand::RequestResize { width, height } => {
                    editor.handle.set_size([width, height]);
                    let _ = editor.events.send(EditorEvent::Resized { width, height });
                }
                EditorCommand::Close => close_requested = true,
            }
        }

        if close_requested {
            self.release_editor();
        }
    }
}

#[cfg(test)]
impl PluginInstance {
    pub(crate) fn stub(path: &Path, config: ProcessConfig) -> Self {
        PluginInstance::new(path, "Stub", PluginBinary::Stub, config)
    }
}
