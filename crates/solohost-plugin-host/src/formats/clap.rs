use std::{
    ffi::c_void,
    fmt,
    path::{Path, PathBuf},
};

use libloading::Library;

use crate::formats::PluginFormat;
use crate::instance::{PluginBinary, PluginInstance};
use crate::{HostError, ProcessConfig};

/// Loaded CLAP plugin module with its `clap_entry` descriptor resolved.
pub struct ClapModule {
    library_path: PathBuf,
    library: Library,
    entry: *const c_void,
}

impl ClapModule {
    /// Load a CLAP plugin and resolve the exported `clap_entry` descriptor.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HostError::MissingBinary(path.to_path_buf()));
        }

        let library = unsafe { Library::new(path) }?;
        let entry_symbol = unsafe {
            library
                .get::<*const c_void>(b"clap_entry\0")
                .map_err(|_| HostError::missing_entry(path.to_path_buf(), "clap_entry"))?
        };
        let entry = *entry_symbol;

        Ok(Self {
            library_path: path.to_path_buf(),
            library,
            entry,
        })
    }

    /// Pointer to the plugin's `clap_plugin_entry` descriptor.
    pub fn entry(&self) -> *const c_void {
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

impl fmt::Debug for ClapModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClapModule")
            .field("library_path", &self.library_path)
            .finish()
    }
}

/// Registry entry for CLAP modules.
#[derive(Debug, Default)]
pub struct ClapFormat;

impl PluginFormat for ClapFormat {
    fn name(&self) -> &'static str {
        "CLAP"
    }

    fn recognizes(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("clap"))
            .unwrap_or(false)
    }

    fn instantiate(
        &self,
        path: &Path,
        config: &ProcessConfig,
    ) -> Result<PluginInstance, HostError> {
        let module = ClapModule::load(path)?;
        Ok(PluginInstance::new(
            path,
            self.name(),
            PluginBinary::Clap(module),
            *config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_clap_extension_case_insensitively() {
        let format = ClapFormat;
        assert!(format.recognizes(Path::new("/plugins/synth.clap")));
        assert!(format.recognizes(Path::new("/plugins/synth.CLAP")));
        assert!(!format.recognizes(Path::new("/plugins/synth.vst3")));
        assert!(!format.recognizes(Path::new("/plugins/clap")));
    }
}
