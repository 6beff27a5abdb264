//! Seamless zoom camera: one continuous zoom scalar drives the view from the
//! world map down to a soldier's eyes.

pub mod zoom;

use glam::{Vec2, Vec3};
use hecs::Entity;
use imperium_core::config::CameraConfig;
use imperium_core::constants::{ZOOM_MAX, ZOOM_MIN, ZOOM_SNAP_TOLERANCE};
use imperium_core::enums::{GamePhase, ZoomLevel};
use imperium_core::events::CameraEvent;

use self::zoom::{game_phase_at, interp_to, zoom_level_at, CameraPose, CameraProfile};

/// Camera state. `current_zoom` is the single source of truth; the zoom
/// level and game phase are derived from it on demand. `last_level` exists
/// only to detect level transitions between ticks.
#[derive(Debug, Clone)]
pub struct SeamlessZoomCamera {
    profile: CameraProfile,
    interp_speed: f32,
    follow_speed: f32,
    current_zoom: f32,
    target_zoom: f32,
    last_level: ZoomLevel,
    pose: CameraPose,
    location: Vec3,
    focus: Option<Entity>,
    events: Vec<CameraEvent>,
}

impl SeamlessZoomCamera {
    pub fn new(config: &CameraConfig) -> Self {
        let profile = CameraProfile::from_config(config);
        let zoom = clamp_zoom(config.initial_zoom).unwrap_or(ZOOM_MIN);
        Self {
            profile,
            interp_speed: config.zoom_interp_speed,
            follow_speed: config.focus_follow_speed,
            current_zoom: zoom,
            target_zoom: zoom,
            last_level: zoom_level_at(zoom),
            pose: profile.pose_at(zoom),
            location: Vec3::ZERO,
            focus: None,
            events: Vec::new(),
        }
    }

    pub fn zoom(&self) -> f32 {
        self.current_zoom
    }

    pub fn target_zoom(&self) -> f32 {
        self.target_zoom
    }

    pub fn zoom_level(&self) -> ZoomLevel {
        zoom_level_at(self.current_zoom)
    }

    pub fn game_phase(&self) -> GamePhase {
        game_phase_at(self.current_zoom)
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }

    pub fn focus(&self) -> Option<Entity> {
        self.focus
    }

    /// Pan speed at the current zoom: fast zoomed out, slow zoomed in.
    pub fn pan_speed(&self) -> f32 {
        self.profile.pan_speed_at(self.current_zoom)
    }

    /// Jump to a zoom value, snapping the pose with it.
    pub fn set_zoom(&mut self, zoom: f32) {
        let Some(zoom) = clamp_zoom(zoom) else {
            tracing::warn!(zoom, "ignoring non-finite zoom");
            return;
        };
        self.current_zoom = zoom;
        self.target_zoom = zoom;
        self.pose = self.profile.pose_at(zoom);
    }

    /// Set the value the zoom eases toward on subsequent ticks.
    pub fn set_target_zoom(&mut self, zoom: f32) {
        let Some(zoom) = clamp_zoom(zoom) else {
            tracing::warn!(zoom, "ignoring non-finite target zoom");
            return;
        };
        self.target_zoom = zoom;
    }

    /// Move the camera over the ground. `direction.x` is right, `direction.y`
    /// is forward. Ignored at first-person zoom; clears any focus.
    pub fn pan(&mut self, direction: Vec2, dt: f32) {
        if self.zoom_level() == ZoomLevel::FirstPerson {
            return;
        }
        let speed = self.pan_speed();
        self.location += Vec3::new(direction.y, direction.x, 0.0) * speed * dt.max(0.0);
        self.focus = None;
    }

    /// Centre on a ground point, keeping the current height.
    pub fn focus_on(&mut self, point: Vec3) {
        self.focus = None;
        self.location = Vec3::new(point.x, point.y, self.location.z);
    }

    /// Follow a unit on subsequent ticks.
    pub fn focus_on_unit(&mut self, unit: Entity) {
        self.focus = Some(unit);
    }

    /// Advance by `dt` seconds. `locate` resolves the focused unit's position;
    /// a unit that no longer resolves clears the focus.
    pub fn tick(&mut self, dt: f32, locate: impl FnOnce(Entity) -> Option<Vec3>) {
        let dt = dt.max(0.0);

        if (self.current_zoom - self.target_zoom).abs() > ZOOM_SNAP_TOLERANCE {
            self.current_zoom =
                interp_to(self.current_zoom, self.target_zoom, dt, self.interp_speed);
        }
        if (self.current_zoom - self.target_zoom).abs() <= ZOOM_SNAP_TOLERANCE {
            self.current_zoom = self.target_zoom;
        }

        self.update_pose(dt);

        let level = self.zoom_level();
        if level != self.last_level {
            tracing::info!(old = ?self.last_level, new = ?level, zoom = self.current_zoom, "zoom level changed");
            self.events.push(CameraEvent::ZoomLevelChanged {
                old: self.last_level,
                new: level,
            });
            self.last_level = level;
        }

        if let Some(unit) = self.focus {
            match locate(unit) {
                Some(target) => {
                    let goal = Vec3::new(target.x, target.y, self.location.z);
                    let alpha = if self.follow_speed <= 0.0 {
                        1.0
                    } else {
                        (dt * self.follow_speed).clamp(0.0, 1.0)
                    };
                    self.location = self.location.lerp(goal, alpha);
                }
                None => {
                    tracing::debug!(?unit, "focus target gone, clearing focus");
                    self.focus = None;
                }
            }
        }
    }

    /// Take all buffered events.
    pub fn drain_events(&mut self) -> Vec<CameraEvent> {
        std::mem::take(&mut self.events)
    }

    fn update_pose(&mut self, dt: f32) {
        let target = self.profile.pose_at(self.current_zoom);
        if dt > 0.0 {
            let speed = self.interp_speed;
            self.pose = CameraPose {
                arm_length: interp_to(self.pose.arm_length, target.arm_length, dt, speed),
                pitch: interp_to(self.pose.pitch, target.pitch, dt, speed),
                fov: interp_to(self.pose.fov, target.fov, dt, speed),
            };
        } else {
            self.pose = target;
        }
    }
}

impl Default for SeamlessZoomCamera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

fn clamp_zoom(zoom: f32) -> Option<f32> {
    zoom.is_finite().then(|| zoom.clamp(ZOOM_MIN, ZOOM_MAX))
}
