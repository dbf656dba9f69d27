// SPDX-License-Identifier: LGPL-3.0-only
//! Services for mx => See the `mx` crate.

pub mod settings;

pub use settings::{Settings, SettingsError, SettingsRegistry};
