//! Core data models for overswipe tracking.
//! Directions, edge/side maps, settings and the event payload handed to subscribers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OverswipeError;
use crate::util::value_to_progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = OverswipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(OverswipeError::UnknownDirection(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Progress,
    Swipe,
    Cancel,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Progress => "progress",
            EventType::Swipe => "swipe",
            EventType::Cancel => "cancel",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = OverswipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "progress" => Ok(EventType::Progress),
            "swipe" => Ok(EventType::Swipe),
            "cancel" => Ok(EventType::Cancel),
            other => Err(OverswipeError::UnknownEventType(other.to_string())),
        }
    }
}

/// Per-edge values, e.g. signed offsets past a container's edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Edges<T> {
    pub top: T,
    pub left: T,
    pub right: T,
    pub bottom: T,
}

impl<T> Edges<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Edges<U> {
        Edges {
            top: f(self.top),
            left: f(self.left),
            right: f(self.right),
            bottom: f(self.bottom),
        }
    }
}

/// Bounding box in client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

/// Per-direction values. `Sides<bool>` is the set of directions allowed to start a swipe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sides<T> {
    pub up: T,
    pub down: T,
    pub left: T,
    pub right: T,
}

impl<T: Copy> Sides<T> {
    pub fn get(&self, direction: Direction) -> T {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

pub type AllowedSides = Sides<bool>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Distance needed to confirm a swipe.
    pub min_distance: f64,
    /// Delay (ms) before boundaries are re-evaluated after a swipe or touch end.
    pub reset_timeout: u32,
    /// Distance from an edge still considered "at the edge".
    pub bounds_margin: f64,
    /// Touch speed (px/ms) below which movement is treated as noise.
    pub min_speed: f64,
}

pub const DEFAULT_MIN_DISTANCE: f64 = 250.0;
pub const DEFAULT_RESET_TIMEOUT_MS: u32 = 300;
pub const DEFAULT_BOUNDS_MARGIN: f64 = 50.0;
pub const DEFAULT_MIN_SPEED: f64 = 50.0;
/// Touch moves are delivered at most once per this window (20/s).
pub const TOUCH_MOVE_THROTTLE_MS: u32 = 50;

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            reset_timeout: DEFAULT_RESET_TIMEOUT_MS,
            bounds_margin: DEFAULT_BOUNDS_MARGIN,
            min_speed: DEFAULT_MIN_SPEED,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TouchOption {
    Enabled(bool),
    Config {
        #[serde(default, rename = "minSpeed")]
        min_speed: Option<f64>,
    },
}

impl Default for TouchOption {
    fn default() -> Self {
        TouchOption::Enabled(false)
    }
}

/// Caller-facing options; every field is optional and folded into [`Settings`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub touch: TouchOption,
    pub wheel: bool,
    pub min_distance: Option<f64>,
    /// Any JS number; truncated toward zero and floored at 0 like a timer delay.
    pub reset_timeout: Option<f64>,
    pub bounds_margin: Option<f64>,
}

impl Options {
    pub fn from_json(raw: &str) -> Result<Self, OverswipeError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn touch_enabled(&self) -> bool {
        match self.touch {
            TouchOption::Enabled(on) => on,
            TouchOption::Config { .. } => true,
        }
    }

    pub fn settings(&self) -> Settings {
        // A zero minSpeed counts as unset.
        let min_speed = match self.touch {
            TouchOption::Config {
                min_speed: Some(speed),
            } if speed != 0.0 => speed,
            _ => DEFAULT_MIN_SPEED,
        };
        Settings {
            min_distance: self.min_distance.unwrap_or(DEFAULT_MIN_DISTANCE),
            reset_timeout: self
                .reset_timeout
                .map_or(DEFAULT_RESET_TIMEOUT_MS, |ms| ms.max(0.0) as u32),
            bounds_margin: self.bounds_margin.unwrap_or(DEFAULT_BOUNDS_MARGIN),
            min_speed,
        }
    }
}

/// Payload delivered to every subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeEvent {
    #[serde(rename = "type")]
    pub kind: EventType,
    pub direction: Direction,
    pub progress: f64,
    pub distance: f64,
    pub caped_progress: f64,
    pub caped_distance: f64,
}

impl SwipeEvent {
    pub fn new(kind: EventType, direction: Direction, distance: f64, min_distance: f64) -> Self {
        let progress = value_to_progress(distance, 0.0, min_distance);
        Self {
            kind,
            direction,
            progress,
            distance,
            caped_progress: progress.clamp(0.0, 1.0),
            caped_distance: distance.clamp(0.0, min_distance.max(0.0)),
        }
    }
}
