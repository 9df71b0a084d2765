//! Display geometry
//!
//! Maps a channel's sample window onto a canvas of divisions. Nothing here
//! touches pixels; renderers consume the visible range or the projected
//! trace points and draw them however they like.
//!
//! ## Scales
//!
//! - **Horizontal** - samples per division (time per division × sample rate)
//! - **Vertical** - value per division

use crate::error::{Error, Result};
use core::ops::Range;
use serde::{Deserialize, Serialize};

/// Canvas geometry and scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Width of one grid division in pixels
    pub grid_width: f64,
    /// Height of one grid division in pixels
    pub grid_height: f64,
    /// Samples covered by one horizontal division
    pub samples_per_division: f64,
    /// Sample value covered by one vertical division
    pub value_per_division: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            grid_width: 64.0,
            grid_height: 64.0,
            samples_per_division: 64.0,
            value_per_division: 0.1,
        }
    }
}

/// A projected sample, in canvas pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub x: f32,
    pub y: f32,
}

impl Viewport {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("grid_width", self.grid_width),
            ("grid_height", self.grid_height),
            ("samples_per_division", self.samples_per_division),
            ("value_per_division", self.value_per_division),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "viewport {name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Number of samples that fit across the canvas.
    pub fn max_visible_len(&self) -> usize {
        if self.grid_width <= 0.0 {
            return 0;
        }
        let len = (self.width / self.grid_width * self.samples_per_division).ceil();
        if len.is_finite() && len > 0.0 {
            len as usize
        } else {
            0
        }
    }

    /// Indices of the samples shown around `focus`, clamped to `0..len`.
    pub fn visible_range(&self, focus: f64, len: usize) -> Range<usize> {
        let half = self.max_visible_len() as f64 / 2.0;
        let center = focus.round();
        let start = (center - half).floor().clamp(0.0, len as f64) as usize;
        let end = (center + half).ceil().clamp(0.0, len as f64) as usize;
        start..end.max(start)
    }

    /// Project the visible part of `samples` onto the canvas.
    ///
    /// With at least one pixel per sample every visible sample becomes a
    /// point. Otherwise one linearly interpolated point is produced per pixel
    /// column.
    pub fn trace(&self, samples: &[f32], focus: f64) -> Vec<TracePoint> {
        let range = self.visible_range(focus, samples.len());
        if range.is_empty() || !focus.is_finite() {
            return Vec::new();
        }

        let center = focus.round();
        let shift = (center - focus) / self.samples_per_division * self.grid_width;
        let mid_x = self.width / 2.0;

        if self.max_visible_len() as f64 <= self.width {
            range
                .map(|i| {
                    let x = mid_x + (i as f64 - center) / self.samples_per_division * self.grid_width
                        + shift;
                    self.point(x, samples[i] as f64)
                })
                .collect()
        } else {
            let last = samples.len() - 1;
            (0..self.width as usize)
                .filter_map(|column| {
                    let x = column as f64;
                    let position = (x - mid_x - shift) / self.grid_width
                        * self.samples_per_division
                        + center;
                    if position < range.start as f64 || position >= range.end as f64 {
                        return None;
                    }

                    let index = position.floor() as usize;
                    let frac = position - index as f64;
                    let left = samples[index] as f64;
                    let right = samples[(index + 1).min(last)] as f64;
                    Some(self.point(x, left * (1.0 - frac) + right * frac))
                })
                .collect()
        }
    }

    fn point(&self, x: f64, value: f64) -> TracePoint {
        let y = self.height / 2.0 - value / self.value_per_division * self.grid_height;
        TracePoint {
            x: x as f32,
            y: y as f32,
        }
    }
}
