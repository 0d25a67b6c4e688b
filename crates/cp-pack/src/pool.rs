//! Run-wide, append-only dedup tables.
//!
//! Indices are handed out in first-seen order and never change, so the order
//! tracks are packed in decides every index in the output.

use core::fmt;

use cp_ir::{Channel, Macro, MacroKind, MACRO_KIND_COUNT};
use tracing::debug;

use crate::sfx::{PackedSfx, SfxMode};
use crate::tokens::HALT;

/// Pool index of the no-op macro, used for any missing macro reference.
pub const DEFAULT_MACRO: usize = 0;

/// Pool index of the full-volume macro, used for a missing volume macro.
pub const DEFAULT_VOLUME_MACRO: usize = 1;

/// Result of interning: the stable index and whether this call created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interned {
    pub index: usize,
    pub is_new: bool,
}

/// Where a pooled macro first came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MacroOrigin {
    /// One of the seed macros
    Builtin(&'static str),
    /// Local macro `local` of kind `kind` in the track titled `title`
    Track {
        title: String,
        kind: MacroKind,
        local: usize,
    },
}

impl MacroOrigin {
    /// Kind this macro was first defined as, if any.
    pub fn kind(&self) -> Option<MacroKind> {
        match self {
            MacroOrigin::Builtin(_) => None,
            MacroOrigin::Track { kind, .. } => Some(*kind),
        }
    }
}

impl fmt::Display for MacroOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MacroOrigin::Builtin(name) => write!(f, "{} default", name),
            MacroOrigin::Track { title, kind, local } => write!(f, "{} {} {}", title, kind, local),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MacroEntry {
    pub content: Macro,
    pub origin: MacroOrigin,
}

/// A resolved instrument: one global macro index per kind.
#[derive(Clone, Debug)]
pub struct InstrumentEntry {
    pub macros: [u8; MACRO_KIND_COUNT],
    /// Title of the track that first used it
    pub title: String,
    /// Author's instrument name
    pub name: String,
}

/// An encoded pattern and the first (track, channel, slot) that produced it.
#[derive(Clone, Debug)]
pub struct PatternEntry {
    pub bytes: Vec<u8>,
    pub title: String,
    pub channel: Channel,
    pub slot: u8,
}

#[derive(Clone, Debug)]
pub struct SfxEntry {
    pub title: String,
    pub sfx: PackedSfx,
}

/// Final pool contents, in index order.
#[derive(Clone, Debug)]
pub struct PoolTables {
    pub macros: Vec<MacroEntry>,
    pub instruments: Vec<InstrumentEntry>,
    pub patterns: Vec<PatternEntry>,
    pub sfx: Vec<SfxEntry>,
}

/// The dedup pool for one run.
#[derive(Clone, Debug)]
pub struct Pool {
    macros: Vec<MacroEntry>,
    instruments: Vec<InstrumentEntry>,
    patterns: Vec<PatternEntry>,
    sfx: Vec<SfxEntry>,
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear scan for `matches`; append `make()` on a miss.
fn intern_by<E>(
    entries: &mut Vec<E>,
    matches: impl Fn(&E) -> bool,
    make: impl FnOnce() -> E,
) -> Interned {
    if let Some(index) = entries.iter().position(matches) {
        return Interned {
            index,
            is_new: false,
        };
    }
    entries.push(make());
    Interned {
        index: entries.len() - 1,
        is_new: true,
    }
}

impl Pool {
    /// A pool holding only the seed entries: the no-op and full-volume
    /// macros, and the silent sound effect.
    pub fn new() -> Self {
        Self {
            macros: vec![
                MacroEntry {
                    content: Macro::noop(),
                    origin: MacroOrigin::Builtin("no-op"),
                },
                MacroEntry {
                    content: Macro::max_volume(),
                    origin: MacroOrigin::Builtin("volume"),
                },
            ],
            instruments: Vec::new(),
            patterns: Vec::new(),
            sfx: vec![SfxEntry {
                title: "NONE".to_string(),
                sfx: PackedSfx {
                    bytes: vec![HALT],
                    mode: SfxMode::Square,
                },
            }],
        }
    }

    /// Intern a macro by content. `origin` is recorded only for new entries.
    pub fn intern_macro(&mut self, content: &Macro, origin: impl FnOnce() -> MacroOrigin) -> Interned {
        let interned = intern_by(
            &mut self.macros,
            |e| e.content == *content,
            || MacroEntry {
                content: content.clone(),
                origin: origin(),
            },
        );
        if interned.is_new {
            debug!(index = interned.index, "new macro");
        }
        interned
    }

    /// Intern a resolved instrument by its macro indices; the name is not
    /// part of its identity.
    pub fn intern_instrument(
        &mut self,
        macros: [u8; MACRO_KIND_COUNT],
        title: &str,
        name: &str,
    ) -> Interned {
        let interned = intern_by(
            &mut self.instruments,
            |e| e.macros == macros,
            || InstrumentEntry {
                macros,
                title: title.to_string(),
                name: name.to_string(),
            },
        );
        if interned.is_new {
            debug!(index = interned.index, name, "new instrument");
        }
        interned
    }

    /// Intern an encoded pattern by exact bytes.
    pub fn intern_pattern(&mut self, bytes: Vec<u8>, title: &str, channel: Channel, slot: u8) -> Interned {
        let interned = intern_by(
            &mut self.patterns,
            |e| e.bytes == bytes,
            || PatternEntry {
                bytes: bytes.clone(),
                title: title.to_string(),
                channel,
                slot,
            },
        );
        if interned.is_new {
            debug!(index = interned.index, %channel, slot, len = bytes.len(), "new pattern");
        }
        interned
    }

    /// Append a sound effect. Effects are never deduplicated: each one has
    /// its own ID.
    pub fn push_sfx(&mut self, title: &str, sfx: PackedSfx) -> usize {
        self.sfx.push(SfxEntry {
            title: title.to_string(),
            sfx,
        });
        self.sfx.len() - 1
    }

    pub fn macros(&self) -> &[MacroEntry] {
        &self.macros
    }

    pub fn instruments(&self) -> &[InstrumentEntry] {
        &self.instruments
    }

    pub fn patterns(&self) -> &[PatternEntry] {
        &self.patterns
    }

    pub fn sfx(&self) -> &[SfxEntry] {
        &self.sfx
    }

    /// Consume the pool into its ordered tables.
    pub fn finalize(self) -> PoolTables {
        PoolTables {
            macros: self.macros,
            instruments: self.instruments,
            patterns: self.patterns,
            sfx: self.sfx,
        }
    }
}
