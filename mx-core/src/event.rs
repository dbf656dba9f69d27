// SPDX-License-Identifier: LGPL-3.0-only
use bitflags::bitflags;
use nalgebra::Point2;

bitflags! {
    /// Keyboard modifiers and held pointer buttons at the time of an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Caps lock.
        const LOCK = 1 << 1;
        /// Control key.
        const CONTROL = 1 << 2;
        /// Alt key.
        const ALT = 1 << 3;
        /// Primary pointer button.
        const BUTTON1 = 1 << 8;
        /// Middle pointer button.
        const BUTTON2 = 1 << 9;
        /// Secondary pointer button.
        const BUTTON3 = 1 << 10;
        /// Super (logo) key.
        const SUPER = 1 << 26;
    }
}

impl Modifiers {
    /// The held-button flag for a pointer button number (1 based).
    pub fn for_button(button: u32) -> Self {
        match button {
            1 => Modifiers::BUTTON1,
            2 => Modifiers::BUTTON2,
            3 => Modifiers::BUTTON3,
            _ => Modifiers::empty(),
        }
    }
}

/// The kind of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// A button was pressed.
    Press,
    /// The pointer moved.
    Motion,
    /// A button was released.
    Release,
}

/// A pointer event in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,
    /// Pointer position in stage coordinates.
    pub position: Point2<f32>,
    /// Button number for press/release, 0 for motion.
    pub button: u32,
    /// Modifier state before this event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// A press of `button` at the position.
    pub fn press(x: f32, y: f32, button: u32) -> Self {
        Self {
            kind: PointerEventKind::Press,
            position: Point2::new(x, y),
            button,
            modifiers: Modifiers::empty(),
        }
    }

    /// A motion to the position with the given modifier state.
    pub fn motion(x: f32, y: f32, modifiers: Modifiers) -> Self {
        Self {
            kind: PointerEventKind::Motion,
            position: Point2::new(x, y),
            button: 0,
            modifiers,
        }
    }

    /// A motion with the primary button held.
    pub fn drag_motion(x: f32, y: f32) -> Self {
        Self::motion(x, y, Modifiers::BUTTON1)
    }

    /// A release of `button` at the position. The button is still part of the modifier state.
    pub fn release(x: f32, y: f32, button: u32) -> Self {
        Self {
            kind: PointerEventKind::Release,
            position: Point2::new(x, y),
            button,
            modifiers: Modifiers::for_button(button),
        }
    }

    /// Add keyboard modifiers to the event.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }
}
