pub mod export;
pub mod plan;
pub mod propagate;
pub mod sampler;
