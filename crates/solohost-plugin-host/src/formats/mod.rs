//! Plugin format registry entries.
//!
//! Each format knows how to recognize a binary by its own type-detection
//! rule and how to instantiate it by resolving the canonical entry point of
//! that format's ABI.

pub mod clap;
pub mod vst2;
pub mod vst3;

use std::path::Path;

pub use clap::{ClapFormat, ClapModule};
pub use vst2::{Vst2Format, Vst2Module};
pub use vst3::{Vst3Format, Vst3Module};

use crate::instance::PluginInstance;
use crate::{HostError, ProcessConfig};

/// A plugin format known to the slot's registry.
pub trait PluginFormat {
    /// Short label, e.g. "VST3".
    fn name(&self) -> &'static str;

    /// Format-specific type detection. Purely name-based, no I/O.
    fn recognizes(&self, path: &Path) -> bool;

    /// Load the binary and produce a processing instance.
    fn instantiate(&self, path: &Path, config: &ProcessConfig)
        -> Result<PluginInstance, HostError>;
}

/// Built-in formats in registration order. The first format whose
/// `recognizes` matches a file wins.
pub fn default_formats() -> Vec<Box<dyn PluginFormat>> {
    vec![
        Box::new(Vst3Format),
        Box::new(ClapFormat),
        Box::new(Vst2Format),
    ]
}
