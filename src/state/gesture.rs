//! Overswipe gesture state machine.
//!
//! [`GestureState`] consumes normalized wheel/touch input together with the
//! currently allowed sides and answers with a list of [`Effect`]s. It never
//! calls subscribers or timers itself; the owning tracker executes the effects
//! in order, which keeps every transition testable without a DOM.
//!
//! Phases:
//! - `Idle`: nothing tracked; a direction listed in the allowed sides may start.
//! - `Tracking(d)`: distance accumulates for `d`; allowed sides are zeroed so
//!   no other direction can start until the next re-arm.
//! - `Completed(d)`: the swipe fired; any further progress only resets.

use crate::model::{AllowedSides, Axis, Direction, EventType, Settings, SwipeEvent};
use crate::state::touch::{TouchSample, TouchState, classify_axis};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Tracking(Direction),
    Completed(Direction),
}

impl Phase {
    /// Direction held by a tracked or completed gesture.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Phase::Idle => None,
            Phase::Tracking(d) | Phase::Completed(d) => Some(d),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Emit(SwipeEvent),
    /// The source event should have its default action suppressed.
    PreventDefault,
    /// Boundaries must be re-evaluated after `Settings::reset_timeout`.
    ScheduleRearm,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelInput {
    pub delta_y: f64,
    /// Whether the tracked element is in the event's composed path.
    pub in_path: bool,
    pub cancelable: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchInput {
    pub sample: TouchSample,
    pub in_path: bool,
    pub cancelable: bool,
}

#[derive(Debug, Clone)]
pub struct GestureState {
    settings: Settings,
    allowed: AllowedSides,
    allow_swipe: bool,
    distance: f64,
    phase: Phase,
    touch: TouchState,
}

impl GestureState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            allowed: AllowedSides::default(),
            allow_swipe: false,
            distance: 0.0,
            phase: Phase::Idle,
            touch: TouchState::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn allowed_sides(&self) -> AllowedSides {
        self.allowed
    }

    fn event(&self, kind: EventType, direction: Direction) -> Effect {
        Effect::Emit(SwipeEvent::new(
            kind,
            direction,
            self.distance,
            self.settings.min_distance,
        ))
    }

    /// Drops the current gesture. Only an unfinished (tracking) gesture reports `cancel`.
    pub fn reset(&mut self) -> Vec<Effect> {
        let previous = std::mem::take(&mut self.phase);
        self.distance = 0.0;
        match previous {
            Phase::Tracking(direction) => vec![self.event(EventType::Cancel, direction)],
            Phase::Idle | Phase::Completed(_) => Vec::new(),
        }
    }

    pub fn arm(&mut self, allowed: AllowedSides) {
        self.allowed = allowed;
    }

    pub fn try_progress(&mut self, direction: Direction, delta: f64, cancelable: bool) -> Vec<Effect> {
        let blocked = match self.phase {
            Phase::Completed(_) => true,
            Phase::Tracking(current) => current != direction && !self.allowed.get(direction),
            Phase::Idle => !self.allowed.get(direction),
        };
        if blocked || !self.allow_swipe {
            return self.reset();
        }

        let mut effects = Vec::with_capacity(4);
        self.distance += delta;
        if self.phase == Phase::Idle {
            self.phase = Phase::Tracking(direction);
            self.allowed = AllowedSides::default();
        }
        if cancelable {
            effects.push(Effect::PreventDefault);
        }
        effects.push(self.event(EventType::Progress, direction));
        self.complete_if_reached(&mut effects);
        effects
    }

    fn complete_if_reached(&mut self, effects: &mut Vec<Effect>) {
        if let Phase::Tracking(direction) = self.phase {
            if self.distance >= self.settings.min_distance {
                self.phase = Phase::Completed(direction);
                effects.push(self.event(EventType::Swipe, direction));
                effects.push(Effect::ScheduleRearm);
            }
        }
    }

    pub fn check_completion(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.complete_if_reached(&mut effects);
        effects
    }

    /// One wheel tick. Each tick is its own interaction for the path gate.
    pub fn wheel(&mut self, input: WheelInput) -> Vec<Effect> {
        self.allow_swipe = input.in_path;
        let direction = self.phase.direction().unwrap_or(if input.delta_y > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        });
        let mut effects = self.try_progress(direction, input.delta_y.abs(), input.cancelable);
        effects.extend(self.check_completion());
        effects
    }

    pub fn touch_start(&mut self, input: TouchInput) {
        self.touch.start(input.sample);
        self.allow_swipe = input.in_path;
    }

    pub fn touch_move(&mut self, input: TouchInput) -> Vec<Effect> {
        let delta = self.touch.advance(input.sample);
        let min_speed = self.settings.min_speed;
        if delta.x_velocity.abs() < min_speed && delta.y_velocity.abs() < min_speed {
            return self.reset();
        }

        let (direction, distance) = match classify_axis(delta.x_velocity, delta.y_velocity) {
            Some(Axis::Horizontal) => {
                let direction = self.phase.direction().unwrap_or(if delta.x_velocity < 0.0 {
                    Direction::Left
                } else {
                    Direction::Right
                });
                let distance = if direction == Direction::Left {
                    -delta.x_delta
                } else {
                    delta.x_delta
                };
                if direction.axis() != Axis::Horizontal {
                    return Vec::new();
                }
                (direction, distance)
            }
            Some(Axis::Vertical) => {
                let direction = self.phase.direction().unwrap_or(if delta.y_velocity > 0.0 {
                    Direction::Down
                } else {
                    Direction::Up
                });
                let distance = if direction == Direction::Up {
                    -delta.y_delta
                } else {
                    delta.y_delta
                };
                if direction.axis() != Axis::Vertical {
                    return Vec::new();
                }
                (direction, distance)
            }
            None => return Vec::new(),
        };
        self.try_progress(direction, distance, input.cancelable)
    }

    pub fn touch_end(&mut self) -> Vec<Effect> {
        let mut effects = self.check_completion();
        effects.push(Effect::ScheduleRearm);
        effects
    }
}
