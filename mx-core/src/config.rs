// SPDX-License-Identifier: LGPL-3.0-only
use crate::dnd::DragAxis;
use crate::error::MxError;
use nalgebra::Vector2;

/// The mx configuration struct.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MxConfig {
    /// Stage configuration.
    pub stage: StageConfig,
    /// Defaults for newly created draggables.
    pub drag: DragConfig,
}

impl MxConfig {
    /// The default configuration with the `MX_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply the `MX_STAGE_SIZE`, `MX_DRAG_THRESHOLD` and `MX_DRAG_AXIS` overrides.
    ///
    /// Invalid values are reported and ignored.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("MX_STAGE_SIZE") {
            match parse_stage_size(&val) {
                Ok(size) => {
                    log::info!("MX_STAGE_SIZE={} detected", val);
                    self.stage.size = size;
                },
                Err(err) => log::warn!("Ignoring MX_STAGE_SIZE: {}", err),
            }
        }

        if let Ok(val) = std::env::var("MX_DRAG_THRESHOLD") {
            match val.trim().parse::<u32>() {
                Ok(threshold) => {
                    log::info!("MX_DRAG_THRESHOLD={} detected", threshold);
                    self.drag.threshold = threshold;
                },
                Err(_) => log::warn!("Ignoring MX_DRAG_THRESHOLD: {:?} is not a pixel count", val),
            }
        }

        if let Ok(val) = std::env::var("MX_DRAG_AXIS") {
            match val.parse::<DragAxis>() {
                Ok(axis) => self.drag.axis = axis,
                Err(err) => log::warn!("Ignoring MX_DRAG_AXIS: {}", err),
            }
        }
    }
}

/// Stage configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    /// Size of the stage root actor.
    ///
    /// Defaults to 800x600.
    pub size: Vector2<f32>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            size: Vector2::new(800.0, 600.0),
        }
    }
}

/// Defaults applied to draggables when their role is created.
#[derive(Debug, Clone, PartialEq)]
pub struct DragConfig {
    /// Pointer travel in pixels, per axis, before a press turns into a drag.
    ///
    /// Defaults to 8.
    pub threshold: u32,
    /// Axis constraint.
    pub axis: DragAxis,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            threshold: 8,
            axis: DragAxis::None,
        }
    }
}

/// Parse a `WIDTHxHEIGHT` size such as `1024x768`.
pub fn parse_stage_size(value: &str) -> Result<Vector2<f32>, MxError> {
    let invalid = || MxError::Config {
        key: "stage size".to_string(),
        value: value.to_string(),
    };

    let (width, height) = value.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = width.trim().parse::<f32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<f32>().map_err(|_| invalid())?;

    if width < 0.0 || height < 0.0 || !width.is_finite() || !height.is_finite() {
        return Err(invalid());
    }

    Ok(Vector2::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MxConfig::default();
        assert_eq!(config.drag.threshold, 8);
        assert_eq!(config.drag.axis, DragAxis::None);
        assert_eq!(config.stage.size, Vector2::new(800.0, 600.0));
    }

    #[test]
    fn test_parse_stage_size() {
        assert_eq!(parse_stage_size("1024x768").unwrap(), Vector2::new(1024.0, 768.0));
        assert_eq!(parse_stage_size(" 300 X 200 ").unwrap(), Vector2::new(300.0, 200.0));
        assert!(parse_stage_size("300").is_err());
        assert!(parse_stage_size("-1x5").is_err());
        assert!(parse_stage_size("ax5").is_err());
    }
}
