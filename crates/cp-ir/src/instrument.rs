//! Instrument definitions.

use alloc::string::String;

use crate::macros::{MacroKind, MACRO_KIND_COUNT};

/// An instrument as authored: one optional macro reference per kind.
///
/// References are author-local indices into the track's macro lists of the
/// matching kind. `None` means "use the driver default".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instrument {
    /// Display name, kept for the report only
    pub name: String,
    /// Local macro index per kind, in [`MacroKind::ALL`] order
    pub macros: [Option<u8>; MACRO_KIND_COUNT],
}

impl Instrument {
    /// Create an instrument with no macros.
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
            macros: [None; MACRO_KIND_COUNT],
        }
    }

    /// Local macro reference for one kind.
    pub fn macro_ref(&self, kind: MacroKind) -> Option<u8> {
        self.macros[kind.index()]
    }

    /// Builder-style macro assignment.
    pub fn with_macro(mut self, kind: MacroKind, index: u8) -> Self {
        self.macros[kind.index()] = Some(index);
        self
    }
}
