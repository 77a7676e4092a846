use std::{
    ffi::c_void,
    fmt,
    path::{Path, PathBuf},
};

use libloading::Library;

use crate::formats::PluginFormat;
use crate::instance::{PluginBinary, PluginInstance};
use crate::{HostError, ProcessConfig};

/// Signature of the canonical VST2 entry point (`VSTPluginMain`).
pub type Vst2EntryPoint = unsafe extern "C" fn() -> *mut c_void;

/// Loaded VST2 plugin binary with its entry point resolved.
pub struct Vst2Module {
    library_path: PathBuf,
    library: Library,
    entry: Vst2EntryPoint,
}

impl Vst2Module {
    /// Load a VST2 plugin and resolve `VSTPluginMain`, falling back to the
    /// legacy `main` export.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HostError::MissingBinary(path.to_path_buf()));
        }

        let library = unsafe { Library::new(path) }?;
        let entry_symbol = unsafe {
            library
                .get::<Vst2EntryPoint>(b"VSTPluginMain\0")
                .or_else(|_| library.get::<Vst2EntryPoint>(b"main\0"))
                .map_err(|_| HostError::missing_entry(path.to_path_buf(), "VSTPluginMain"))?
        };
        let entry = *entry_symbol;

        Ok(Self {
            library_path: path.to_path_buf(),
            library,
            entry,
        })
    }

    /// Access the plugin entry point function pointer.
    pub fn entry_point(&self) -> Vst2EntryPoint {
        self.entry
    }

    /// Path to the plugin dynamic library.
    pub fn path(&self) -> &Path {
        &self.library_path
    }

    /// Borrow the dynamic library keeping the binary mapped.
    pub fn library(&self) -> &Library {
        &self.library
    }
}

impl fmt::Debug for Vst2Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vst2Module")
            .field("library_path", &self.library_path)
            .finish()
    }
}

/// Registry entry for VST2 binaries.
#[derive(Debug, Default)]
pub struct Vst2Format;

impl PluginFormat for Vst2Format {
    fn name(&self) -> &'static str {
        "VST2"
    }

    fn recognizes(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ext.eq_ignore_ascii_case("so")
                    || ext.eq_ignore_ascii_case("dll")
                    || ext.eq_ignore_ascii_case("vst")
            })
            .unwrap_or(false)
    }

    fn instantiate(
        &self,
        path: &Path,
        config: &ProcessConfig,
    ) -> Result<PluginInstance, HostError> {
        let module = Vst2Module::load(path)?;
        Ok(PluginInstance::new(
            path,
            self.name(),
            PluginBinary::Vst2(module),
            *config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn recognizes_shared_library_extensions() {
        let format = Vst2Format;
        assert!(format.recognizes(Path::new("/plugins/synth.so")));
        assert!(format.recognizes(Path::new("C:/plugins/synth.dll")));
        assert!(format.recognizes(Path::new("/plugins/synth.vst")));
        assert!(!format.recognizes(Path::new("/plugins/synth.clap")));
    }

    #[test]
    fn garbage_binary_fails_to_load() {
        let mut file = tempfile::Builder::new()
            .suffix(".so")
            .tempfile()
            .unwrap();
        file.write_all(b"not a shared library").unwrap();
        let err = Vst2Module::load(file.path()).unwrap_err();
        assert!(matches!(err, HostError::LibraryLoad(_)));
    }
}
