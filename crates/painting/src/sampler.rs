//! Stroke sampler: turns pointer motion into evenly spaced dab placements
//!
//! The first placement of a stroke comes from [`StrokeSampler::begin`] at the
//! pointer-down position. Every later pointer sample is handed to
//! [`StrokeSampler::sample`], which walks the segment from the previous
//! accepted position in steps of `max(1, pressure * size * spacing_factor)`.
//!
//! Placements whose dab could not reach the canvas are never generated, so a
//! far off-canvas sample costs no more than one crossing the canvas.

use gouache_config::PaintConfig;
use tracing::debug;

use crate::types::Dab;

/// Number of placements emitted for a segment
///
/// `ceil(distance / spacing)`; the last placement may overshoot the segment
/// end by less than one spacing. Saturates at `u64::MAX`.
pub fn placement_count(distance: f32, spacing: f32) -> u64 {
    if !(distance > 0.0) || !(spacing > 0.0) {
        return 0;
    }
    (distance as f64 / spacing as f64).ceil() as u64
}

/// Per-stroke resampling state
#[derive(Debug, Clone)]
pub struct StrokeSampler {
    /// Last accepted position (None outside a stroke)
    last_pos: Option<(f32, f32)>,
    /// Last accepted pressure, substituted for missing or too-light samples
    last_pressure: f32,
    /// How far the last placement overshot the last segment end
    leftover_distance: f32,
}

impl StrokeSampler {
    pub fn new(settings: &PaintConfig) -> Self {
        Self {
            last_pos: None,
            last_pressure: settings.default_pressure,
            leftover_distance: 0.0,
        }
    }

    /// Start a stroke and return the dab stamped at the pointer-down position
    ///
    /// A missing pressure reads as full pressure. The first point is never
    /// substituted, so a down below the threshold yields a dab the brush
    /// will skip.
    pub fn begin(&mut self, x: f32, y: f32, pressure: Option<f32>, settings: &PaintConfig) -> Dab {
        let pressure = sanitize_pressure(pressure, settings).unwrap_or(settings.max_pressure);
        self.last_pos = Some((x, y));
        self.last_pressure = pressure;
        self.leftover_distance = 0.0;

        debug!(
            "StrokeSampler::begin: FIRST dab at ({:.1}, {:.1}), pressure={:.2}",
            x, y, pressure
        );
        Dab::new(x, y, pressure)
    }

    /// Resample the segment from the last accepted position to `(x, y)`
    ///
    /// Returns no placements, and leaves the state untouched, when no stroke
    /// is active, when the effective pressure is still below the threshold,
    /// or when the pointer did not move. Of the `ceil(distance / spacing)`
    /// placements, only those whose dab can touch a `canvas`-sized buffer
    /// are returned.
    pub fn sample(
        &mut self,
        x: f32,
        y: f32,
        pressure: Option<f32>,
        brush_size: f32,
        canvas: (u32, u32),
        settings: &PaintConfig,
    ) -> Vec<Dab> {
        let Some((last_x, last_y)) = self.last_pos else {
            return Vec::new();
        };

        let pressure = match sanitize_pressure(pressure, settings) {
            Some(p) if p >= settings.pressure_threshold => p,
            _ => self.last_pressure,
        };
        if !(pressure >= settings.pressure_threshold) {
            debug!("StrokeSampler::sample: pressure {:.2} below threshold, event dropped", pressure);
            return Vec::new();
        }

        let (dx, dy) = (x as f64 - last_x as f64, y as f64 - last_y as f64);
        let distance = (dx * dx + dy * dy).sqrt();
        if !(distance > 0.0) || !distance.is_finite() {
            return Vec::new();
        }

        let spacing = (pressure * brush_size * settings.spacing_factor).max(1.0) as f64;
        let steps = (distance / spacing).ceil();
        let dir = (dx / distance, dy / distance);
        let start = (last_x as f64, last_y as f64);

        // Dab bounds are floored/ceiled, hence the extra pixel
        let margin = (pressure * brush_size).max(0.0) as f64 + 1.0;
        let dabs: Vec<Dab> = match visible_span(start, dir, steps * spacing, canvas, margin) {
            Some((enter, exit)) => {
                let first = (enter / spacing - 1e-9).ceil().max(1.0) as u64;
                let last = (exit / spacing + 1e-9).floor().min(steps) as u64;
                (first..=last)
                    .map(|i| {
                        let t = i as f64 * spacing;
                        Dab::new(
                            (start.0 + dir.0 * t) as f32,
                            (start.1 + dir.1 * t) as f32,
                            pressure,
                        )
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        self.leftover_distance = (steps * spacing - distance) as f32;
        self.last_pos = Some((x, y));
        self.last_pressure = pressure;

        debug!(
            "StrokeSampler::sample: {} dabs from ({:.1}, {:.1}) to ({:.1}, {:.1}), distance={:.1} spacing={:.2} pressure={:.2}",
            dabs.len(),
            last_x,
            last_y,
            x,
            y,
            distance,
            spacing,
            pressure
        );

        dabs
    }

    /// End the current stroke
    pub fn end(&mut self) {
        self.last_pos = None;
        self.leftover_distance = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.last_pos.is_some()
    }

    pub fn last_pressure(&self) -> f32 {
        self.last_pressure
    }

    pub fn leftover_distance(&self) -> f32 {
        self.leftover_distance
    }
}

/// Part of a ray, as distances from `start` within `[0, length]`, that lies in
/// the canvas grown by `margin` on every side
fn visible_span(
    start: (f64, f64),
    dir: (f64, f64),
    length: f64,
    canvas: (u32, u32),
    margin: f64,
) -> Option<(f64, f64)> {
    let mut enter = 0.0_f64;
    let mut exit = length;

    for (origin, d, extent) in [
        (start.0, dir.0, canvas.0 as f64),
        (start.1, dir.1, canvas.1 as f64),
    ] {
        let (lo, hi) = (-margin, extent + margin);
        if d == 0.0 {
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }
        let (a, b) = ((lo - origin) / d, (hi - origin) / d);
        enter = enter.max(a.min(b));
        exit = exit.min(a.max(b));
        if enter > exit {
            return None;
        }
    }
    Some((enter, exit))
}

/// Clamp into `[0, max_pressure]`, treating NaN as absent
fn sanitize_pressure(pressure: Option<f32>, settings: &PaintConfig) -> Option<f32> {
    pressure
        .filter(|p| !p.is_nan())
        .map(|p| p.clamp(0.0, settings.max_pressure))
}
