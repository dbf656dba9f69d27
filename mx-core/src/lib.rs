// SPDX-License-Identifier: LGPL-3.0-only
#![warn(missing_docs)]

//! Core library for mx => See `mx` crate.
//!
//! Contains the actor stage, size negotiation and the drag/drop recognizers.

/// Contains the [ActorId](actor::ActorId) handle and the [Actor](actor::Actor) node.
pub mod actor;

/// Contains the [MxConfig](config::MxConfig) struct.
pub mod config;

/// Contains the draggable and droppable roles.
pub mod dnd;

/// Contains the [MxError](error::MxError) type.
pub mod error;

/// Contains pointer events and modifier flags.
pub mod event;

/// Contains boxes, paddings and alignment types.
pub mod geometry;

/// Contains the layout manager trait and the built-in leaf/fixed layouts.
pub mod layout;

/// Contains typed handler lists used for signals.
pub mod signal;

/// Contains the [Stage](stage::Stage) actor arena.
pub mod stage;

/// Contains the [Update](update::Update) flags.
pub mod update;

/// Contains useful types for interacting with 2D geometry.
pub use nalgebra as math;
