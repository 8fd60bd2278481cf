use super::BodyID;

/// Which way a rate knob is turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Faster,
    Slower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

/// One discrete input, already stripped of whatever window library produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Spin { body: BodyID, change: Change },
    Orbit { body: BodyID, change: Change },
    Fly(Direction),
    Look { dx: f32, dy: f32 },
    TogglePause,
    ToggleOrbitPaths,
    Exit,
}

/// How much a single Faster/Slower event moves a rate, in rad/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSteps {
    pub spin: f32,
    pub orbit: f32,
}

impl Default for RateSteps {
    fn default() -> Self {
        RateSteps {
            spin: 0.01,
            orbit: 0.01,
        }
    }
}

impl RateSteps {
    pub fn spin_delta(&self, change: Change) -> f32 {
        signed(self.spin, change)
    }

    pub fn orbit_delta(&self, change: Change) -> f32 {
        signed(self.orbit, change)
    }
}

fn signed(step: f32, change: Change) -> f32 {
    match change {
        Change::Faster => step.abs(),
        Change::Slower => -step.abs(),
    }
}

/// The camera, as far as the scene is concerned.
pub trait CameraRig {
    /// Moves the camera for `elapsed` seconds in the given direction.
    fn fly(&mut self, direction: Direction, elapsed: f32);
    /// Turns the camera by a cursor delta, in pixels.
    fn look(&mut self, dx: f32, dy: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Closing,
}
