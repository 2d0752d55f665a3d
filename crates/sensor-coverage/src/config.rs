use serde::{Deserialize, Serialize};

/// Per-sensor calibration parameters.
///
/// The defaults reproduce the layout editor's tuned values exactly; treat
/// them as calibration constants rather than physically derived quantities.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorParams {
    /// Maximum sensing distance in world units.
    pub effect_radius: f32,
    /// Cosine of the half-angle of the field of view.
    ///
    /// `0.5` is cos 60°: a 120° total cone. `-1.0` degenerates to "sees
    /// everything in range".
    pub effect_arc: f32,
    /// Clamp for the facing angle relative to the wall's inward normal,
    /// in radians. A sensor can never face more than this far from
    /// perpendicular.
    pub alpha_max: f32,
    /// Theoretical pixel count an unobstructed sensor could see; used only
    /// to normalize the under-utilization cost term.
    pub max_visible_pixel_count: u32,
}

impl Default for SensorParams {
    fn default() -> Self {
        let effect_radius = 40.0;
        let effect_arc = 0.5;
        Self {
            effect_radius,
            effect_arc,
            alpha_max: 0.786,
            max_visible_pixel_count: ideal_visible_pixel_count(effect_radius, effect_arc, 5.0),
        }
    }
}

/// Pixel count of an unobstructed cone: `half_angle · r² / spacing²`.
///
/// The circular-sector area divided by the area one pixel sample represents.
/// Useful as a default for [`SensorParams::max_visible_pixel_count`] so the
/// ceiling stays consistent when the radius or arc is re-tuned.
pub fn ideal_visible_pixel_count(effect_radius: f32, effect_arc: f32, pixel_spacing: f32) -> u32 {
    let half_angle = effect_arc.clamp(-1.0, 1.0).acos();
    (half_angle * effect_radius * effect_radius / (pixel_spacing * pixel_spacing)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_preserve_editor_calibration() {
        let params = SensorParams::default();
        assert_eq!(params.effect_radius, 40.0);
        assert_eq!(params.effect_arc, 0.5);
        assert_eq!(params.alpha_max, 0.786);
    }

    #[test]
    fn ideal_count_matches_sector_area() {
        // acos(0.5) = π/3; π/3 · 1600 / 25 ≈ 67.02
        assert_eq!(ideal_visible_pixel_count(40.0, 0.5, 5.0), 67);
        // Full half-plane cone at arc = -1: π · r² / spacing².
        assert_eq!(ideal_visible_pixel_count(10.0, -1.0, 5.0), 12);
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = SensorParams::default();
        let text = serde_json::to_string(&params).unwrap();
        let back: SensorParams = serde_json::from_str(&text).unwrap();
        assert_eq!(back, params);
    }
}
