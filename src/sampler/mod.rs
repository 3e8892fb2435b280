mod error;
mod grid;
mod sample;
mod sampler;

pub use error::SampleError;
pub use grid::time_grid;
pub use sample::{GroundPath, PositionSample};
pub use sampler::sample_ground_path;
