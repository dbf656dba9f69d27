// SPDX-License-Identifier: LGPL-3.0-only
use bitflags::bitflags;

bitflags! {
    /// Tells the host what needs to be redone after an event was handled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Update: u8 {
        /// Repaint the stage.
        const DRAW = 0b0001;
        /// Run a layout pass before painting.
        const LAYOUT = 0b0010;
    }
}
