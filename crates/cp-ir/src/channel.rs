//! Sound chip channel identities.

use core::fmt;

/// Number of channels in a tracker export.
pub const CHANNEL_COUNT: usize = 5;

/// Number of channels that are packed into byte-code (DPCM is excluded).
pub const ENCODED_CHANNEL_COUNT: usize = 4;

/// One of the five 2A03 channels, in export column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Pulse1,
    Pulse2,
    Triangle,
    Noise,
    /// Sample playback; parsed but never packed
    Dpcm,
}

impl Channel {
    /// All channels in column order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Pulse1,
        Channel::Pulse2,
        Channel::Triangle,
        Channel::Noise,
        Channel::Dpcm,
    ];

    /// Channels that are packed, in column order.
    pub const ENCODED: [Channel; ENCODED_CHANNEL_COUNT] = [
        Channel::Pulse1,
        Channel::Pulse2,
        Channel::Triangle,
        Channel::Noise,
    ];

    /// Column index (0-4).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Channel for a column index.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Channel::Pulse1),
            1 => Some(Channel::Pulse2),
            2 => Some(Channel::Triangle),
            3 => Some(Channel::Noise),
            4 => Some(Channel::Dpcm),
            _ => None,
        }
    }

    /// True for the noise channel, whose notes use the 16-step noise table.
    pub const fn is_noise(self) -> bool {
        matches!(self, Channel::Noise)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Channel::Pulse1 => "pulse 1",
            Channel::Pulse2 => "pulse 2",
            Channel::Triangle => "triangle",
            Channel::Noise => "noise",
            Channel::Dpcm => "dpcm",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.name())
    }
}
