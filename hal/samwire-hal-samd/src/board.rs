//! Compile-time board selection
//!
//! Exactly one board feature (or `custom-board`) must be enabled. Each
//! board feature pulls in its silicon feature.

use samwire_core::board::{BoardConfig, Silicon};

#[cfg(not(any(feature = "samd21", feature = "samd51")))]
compile_error!("select a silicon feature: `samd21` or `samd51` (board features enable one)");

#[cfg(all(feature = "samd21", feature = "samd51"))]
compile_error!("`samd21` and `samd51` are mutually exclusive; enable exactly one board");

const SELECTED: usize = cfg!(feature = "feather-m0") as usize
    + cfg!(feature = "qtpy-m0") as usize
    + cfg!(feature = "trinket-m0") as usize
    + cfg!(feature = "feather-m4") as usize
    + cfg!(feature = "custom-board") as usize;

const _: () = assert!(
    SELECTED == 1,
    "enable exactly one of `feather-m0`, `qtpy-m0`, `trinket-m0`, `feather-m4`, `custom-board`"
);

/// Silicon this crate was built for
#[cfg(feature = "samd21")]
pub const SILICON: Silicon = Silicon::Samd21;
/// Silicon this crate was built for
#[cfg(feature = "samd51")]
pub const SILICON: Silicon = Silicon::Samd51;

/// Board selected by cargo feature
#[cfg(feature = "feather-m0")]
pub const ACTIVE: BoardConfig = samwire_core::board::FEATHER_M0;
/// Board selected by cargo feature
#[cfg(feature = "qtpy-m0")]
pub const ACTIVE: BoardConfig = samwire_core::board::QTPY_M0;
/// Board selected by cargo feature
#[cfg(feature = "trinket-m0")]
pub const ACTIVE: BoardConfig = samwire_core::board::TRINKET_M0;
/// Board selected by cargo feature
#[cfg(feature = "feather-m4")]
pub const ACTIVE: BoardConfig = samwire_core::board::FEATHER_M4_EXPRESS;

/// Whether `board` was laid out for the silicon this crate targets
pub const fn matches_silicon(board: &BoardConfig) -> bool {
    matches!(
        (board.silicon, SILICON),
        (Silicon::Samd21, Silicon::Samd21) | (Silicon::Samd51, Silicon::Samd51)
    )
}

#[cfg(not(feature = "custom-board"))]
const _: () = assert!(
    matches_silicon(&ACTIVE),
    "board feature does not match the enabled silicon feature"
);
