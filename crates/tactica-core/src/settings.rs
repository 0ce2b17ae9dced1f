use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Vector2, VectorExt};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

fn check_size(name: &str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid(format!(
            "{name} must be a finite, non-negative number, got {value}"
        )))
    }
}

/// The field geometry. Static for a session.
///
/// Coordinates have their origin in a corner of the field: `x` runs along the
/// field length in `[0, width]`, `y` across it in `[0, height]`, with `y = 0` being
/// the top wall.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FieldGeometry {
    /// Field length (distance between the goal walls)
    pub width: f64,
    /// Field width (distance between the side walls)
    pub height: f64,
    /// Centre of the goal we defend
    pub own_goal_center: Vector2,
    /// Centre of the goal we attack
    pub opponent_goal_center: Vector2,
    /// Opening of each goal, measured along its wall
    pub goal_height: f64,
    /// Depth of the penalty box, measured from the goal line into the field
    pub penalty_box_width: f64,
    /// Extent of the penalty box along the goal line
    pub penalty_box_height: f64,
}

impl FieldGeometry {
    pub fn contains(&self, p: Vector2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Whether our goal is on the `x = width` side, in which case the field needs to
    /// be mirrored for the attack direction to be `+x`.
    pub fn own_goal_on_right(&self) -> bool {
        self.own_goal_center.x > self.opponent_goal_center.x
    }
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            own_goal_center: Vector2::new(0.0, 300.0),
            opponent_goal_center: Vector2::new(1000.0, 300.0),
            goal_height: 200.0,
            penalty_box_width: 150.0,
            penalty_box_height: 300.0,
        }
    }
}

/// Agent and ball physics constants.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsParams {
    /// Radius of an agent's body
    pub player_radius: f64,
    /// Distance from an agent's centre at which it controls the ball
    pub pickup_radius: f64,
    /// Top speed of an agent, in units/s
    pub player_max_speed: f64,
    /// Constant deceleration of a rolling ball, in units/s²
    pub ball_friction: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            player_radius: 15.0,
            pickup_radius: 20.0,
            player_max_speed: 250.0,
            ball_friction: 150.0,
        }
    }
}

/// Settings for the interception predictor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InterceptSettings {
    /// Below this speed the ball is treated as stationary
    pub still_speed: f64,
    /// Future times (s) to evaluate, must be ascending
    pub candidate_times: Vec<f64>,
    /// Lower bound for the time used to normalize the arrival mismatch
    pub min_normalizing_time: f64,
    /// Best normalized mismatch must be below this for a candidate to be used
    pub feasibility: f64,
    /// Lead time (s) used when no candidate is feasible
    pub fallback_lead: f64,
}

impl Default for InterceptSettings {
    fn default() -> Self {
        Self {
            still_speed: 1e-3,
            candidate_times: vec![0.1, 0.2, 0.3, 0.5, 0.8, 1.0, 1.5, 2.0, 3.0],
            min_normalizing_time: 0.1,
            feasibility: 2.0,
            fallback_lead: 0.5,
        }
    }
}

/// Tunables for the tactical policy. Radii given as `*_factor` are multiples of
/// [`PhysicsParams::player_radius`]; fractions are relative to the field size.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TacticsSettings {
    /// Clearance around a shot line that opponents must keep
    pub shot_clearance_factor: f64,
    /// Clearance around a pass lane that opponents must keep
    pub lane_clearance_factor: f64,
    /// Bank shots off a wall are skipped when the shooter is within this fraction
    /// of the field from that wall
    pub wall_margin: f64,
    /// A receiver is safe when no opponent is closer than this
    pub receiver_safety_radius: f64,
    /// Returned by the pass selector when there is nobody to pass to
    pub fallback_pass_target: u32,
    /// Possession is checked against `pickup_radius * possession_margin`
    pub possession_margin: f64,
    /// Opponents closer than this put the ball carrier under pressure
    pub pressure_radius_factor: f64,
    /// Number of nearby opponents that makes the carrier look for a pass
    pub pressure_count: usize,
    /// An opponent this close to another teammate is already marked
    pub mark_radius_factor: f64,
    /// Supporters step away from opponents closer than this
    pub evade_radius_factor: f64,
    /// Where a marker stands on the ball→opponent segment
    pub mark_ball_fraction: f64,
    /// Speed used when dribbling or running to the ball while defending
    pub dribble_speed: f64,
    /// Past this fraction of the length the carrier stops running straight at goal
    pub shooting_zone: f64,
    /// How far ahead of themselves supporters move, as a fraction of the length
    pub support_advance: f64,
    /// Furthest point up the field supporters move to
    pub support_max_x: f64,
    /// Lane offset from the centre line, as a fraction of the height
    pub support_lane_offset: f64,
    /// Speed cap for the goalkeeper's positioning
    pub keeper_max_movement: f64,
    pub intercept: InterceptSettings,
}

impl Default for TacticsSettings {
    fn default() -> Self {
        Self {
            shot_clearance_factor: 2.5,
            lane_clearance_factor: 2.5,
            wall_margin: 0.3,
            receiver_safety_radius: 80.0,
            fallback_pass_target: 1,
            possession_margin: 1.2,
            pressure_radius_factor: 8.0,
            pressure_count: 2,
            mark_radius_factor: 3.0,
            evade_radius_factor: 4.0,
            mark_ball_fraction: 0.7,
            dribble_speed: 0.8,
            shooting_zone: 0.75,
            support_advance: 0.2,
            support_max_x: 0.8,
            support_lane_offset: 0.3,
            keeper_max_movement: 1.0,
            intercept: InterceptSettings::default(),
        }
    }
}

/// All configuration consumed by the engine. Loaded once per session and passed
/// by reference into every entry point.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub field: FieldGeometry,
    pub physics: PhysicsParams,
    pub tactics: TacticsSettings,
}

impl Settings {
    /// Load the settings from a file, or store the default settings if the file does not
    /// exist.
    pub fn load_or_insert(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let settings: Self = serde_json::from_str(&contents)?;
                settings.validate()?;
                Ok(settings)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!(
                    "Settings file {} not found, writing defaults",
                    path.display()
                );
                let settings = Self::default();
                settings.store(path)?;
                Ok(settings)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Rejects values the engine cannot work with: negative or non-finite sizes
    /// and radii, and interception times that are not positive and ascending.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let field = &self.field;
        for (name, value) in [
            ("field.width", field.width),
            ("field.height", field.height),
            ("field.goal_height", field.goal_height),
            ("field.penalty_box_width", field.penalty_box_width),
            ("field.penalty_box_height", field.penalty_box_height),
            ("physics.player_radius", self.physics.player_radius),
            ("physics.pickup_radius", self.physics.pickup_radius),
            ("physics.player_max_speed", self.physics.player_max_speed),
            ("physics.ball_friction", self.physics.ball_friction),
            ("tactics.receiver_safety_radius", self.tactics.receiver_safety_radius),
        ] {
            check_size(name, value)?;
        }
        if !(field.own_goal_center.all_finite() && field.opponent_goal_center.all_finite()) {
            return Err(SettingsError::Invalid("goal centres must be finite".into()));
        }

        let times = &self.tactics.intercept.candidate_times;
        if times.is_empty() {
            return Err(SettingsError::Invalid(
                "tactics.intercept.candidate_times must not be empty".into(),
            ));
        }
        if !times.iter().all(|t| t.is_finite() && *t > 0.0)
            || times.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(SettingsError::Invalid(format!(
                "tactics.intercept.candidate_times must be positive and ascending, got {times:?}"
            )));
        }
        Ok(())
    }

    /// Store the settings in the given file.
    pub fn store(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Clearance used for shot lines.
    pub fn shot_clearance(&self) -> f64 {
        self.physics.player_radius * self.tactics.shot_clearance_factor
    }

    /// Clearance used for pass lanes.
    pub fn lane_clearance(&self) -> f64 {
        self.physics.player_radius * self.tactics.lane_clearance_factor
    }

    /// Distance within which an agent counts as holding the ball.
    pub fn possession_radius(&self) -> f64 {
        self.physics.pickup_radius * self.tactics.possession_margin
    }
}
