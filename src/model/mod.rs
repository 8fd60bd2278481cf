pub mod body;
pub mod control;
pub mod lighting;
pub mod scene;

pub use body::{Body, BodyID, BodyInfo, Orbit};
pub use control::{CameraRig, Change, Control, Direction, RateSteps, RunState};
pub use lighting::{DirectionalLight, Lighting, PointLight};
pub use scene::{RenderBackend, Scene};
