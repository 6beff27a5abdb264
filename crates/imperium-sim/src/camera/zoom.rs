//! Zoom band tables.
//!
//! Pure functions from the zoom scalar to the discrete zoom level, the game
//! phase and the continuous camera values. No camera state here.

use imperium_core::config::CameraConfig;
use imperium_core::constants::*;
use imperium_core::enums::{GamePhase, ZoomLevel};
use serde::{Deserialize, Serialize};

/// Discrete zoom level of a zoom scalar. Each band includes its upper bound.
pub fn zoom_level_at(zoom: f32) -> ZoomLevel {
    if zoom <= ZOOM_WORLD_MAX {
        ZoomLevel::World
    } else if zoom <= ZOOM_TERRITORY_MAX {
        ZoomLevel::Territory
    } else if zoom <= ZOOM_CITY_MAX {
        ZoomLevel::City
    } else if zoom <= ZOOM_GROUND_MAX {
        ZoomLevel::Ground
    } else {
        ZoomLevel::FirstPerson
    }
}

/// Game phase of a zoom scalar. World and Territory both map to Strategic.
pub fn game_phase_at(zoom: f32) -> GamePhase {
    if zoom <= ZOOM_TERRITORY_MAX {
        GamePhase::Strategic
    } else if zoom <= ZOOM_CITY_MAX {
        GamePhase::Tactical
    } else if zoom <= ZOOM_GROUND_MAX {
        GamePhase::Combat
    } else {
        GamePhase::FirstPerson
    }
}

/// UE-style `FInterpTo`: move `current` toward `target` by the fraction
/// `dt * speed` of the remaining distance. A non-positive speed snaps.
pub fn interp_to(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }
    let dist = target - current;
    if dist * dist < 1e-8 {
        return target;
    }
    let alpha = (dt * speed).clamp(0.0, 1.0);
    current + dist * alpha
}

/// A piecewise-linear curve over the five zoom bands.
///
/// `anchors[i]` is the value at band boundary `ZOOM_BANDS[i]`; inside a band
/// the value is interpolated between its two boundary anchors, so adjacent
/// bands always agree at the shared boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandCurve {
    anchors: [f32; 6],
}

impl BandCurve {
    /// One value per zoom level. Band `i` blends from level `i` to level
    /// `i + 1`; the FirstPerson band holds its value.
    pub fn from_levels(levels: [f32; 5]) -> Self {
        Self {
            anchors: [
                levels[0], levels[1], levels[2], levels[3], levels[4], levels[4],
            ],
        }
    }

    /// A straight line from `start` at zoom 0 to `end` at zoom 1.
    pub fn linear(start: f32, end: f32) -> Self {
        let mut anchors = [0.0; 6];
        for (anchor, boundary) in anchors.iter_mut().zip(ZOOM_BANDS) {
            *anchor = start + (end - start) * boundary;
        }
        Self { anchors }
    }

    pub fn anchors(&self) -> [f32; 6] {
        self.anchors
    }

    pub fn sample(&self, zoom: f32) -> f32 {
        let zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        let band = zoom_level_at(zoom).index();
        let lo = ZOOM_BANDS[band];
        let hi = ZOOM_BANDS[band + 1];
        let alpha = (zoom - lo) / (hi - lo);
        let a = self.anchors[band];
        let b = self.anchors[band + 1];
        a + (b - a) * alpha
    }
}

/// Camera pose derived from a zoom scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Spring arm length (cm).
    pub arm_length: f32,
    /// Pitch in degrees, negative looks down.
    pub pitch: f32,
    /// Horizontal field of view in degrees.
    pub fov: f32,
}

/// The four curves that shape the camera across the zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraProfile {
    pub height: BandCurve,
    pub pitch: BandCurve,
    pub fov: BandCurve,
    pub pan_speed: BandCurve,
}

impl CameraProfile {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            height: BandCurve::from_levels(config.heights),
            pitch: BandCurve::from_levels(config.pitches),
            fov: BandCurve::linear(config.world_fov, config.first_person_fov),
            pan_speed: BandCurve::linear(config.world_pan_speed, config.city_pan_speed),
        }
    }

    pub fn pose_at(&self, zoom: f32) -> CameraPose {
        CameraPose {
            arm_length: self.height.sample(zoom),
            pitch: self.pitch.sample(zoom),
            fov: self.fov.sample(zoom),
        }
    }

    pub fn pan_speed_at(&self, zoom: f32) -> f32 {
        self.pan_speed.sample(zoom)
    }
}

impl Default for CameraProfile {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
