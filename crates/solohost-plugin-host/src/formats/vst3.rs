use std::{
    ffi::c_void,
    fmt,
    path::{Path, PathBuf},
};

use libloading::Library;

use crate::formats::PluginFormat;
use crate::instance::{PluginBinary, PluginInstance};
use crate::{HostError, ProcessConfig};

/// Signature of the `GetPluginFactory` export defined by the VST3 SDK.
pub type Vst3FactoryEntry = unsafe extern "C" fn() -> *mut c_void;

/// Loaded VST3 plugin module with its factory entry point resolved.
pub struct Vst3Module {
    library_path: PathBuf,
    library: Library,
    factory: Vst3FactoryEntry,
}

impl Vst3Module {
    /// Load a VST3 plugin module and resolve `GetPluginFactory`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HostError::MissingBinary(path.to_path_buf()));
        }

        let library = unsafe { Library::new(path) }?;
        let factory_symbol = unsafe {
            library
                .get::<Vst3FactoryEntry>(b"GetPluginFactory\0")
                .map_err(|_| HostError::missing_entry(path.to_path_buf(), "GetPluginFactory"))?
        };
        let factory = *factory_symbol;

        Ok(Self {
            library_path: path.to_path_buf(),
            library,
            factory,
        })
    }

    /// Access the resolved factory function pointer.
    pub fn factory(&self) -> Vst3FactoryEntry {
        self.factory
    }

    /// Path to the plugin library.
    pub fn path(&self) -> &Path {
        &self.library_path
    }

    /// Borrow the dynamic library keeping the binary mapped.
    pub fn library(&self) -> &Library {
        &self.library
    }
}

impl fmt::Debug for Vst3Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vst3Module")
            .field("library_path", &self.library_path)
            .finish()
    }
}

/// Registry entry for VST3 modules.
#[derive(Debug, Default)]
pub struct Vst3Format;

impl PluginFormat for Vst3Format {
    fn name(&self) -> &'static str {
        "VST3"
    }

    fn recognizes(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.ends_with(".vst3"))
            .unwrap_or(false)
    }

    fn instantiate(
        &self,
        path: &Path,
        config: &ProcessConfig,
    ) -> Result<PluginInstance, HostError> {
        let module = Vst3Module::load(path)?;
        Ok(PluginInstance::new(
            path,
            self.name(),
            PluginBinary::Vst3(module),
            *config,
        ))
    }
}
