pub mod noise;
pub mod pipeline;
pub mod resize;
pub mod spectrum;

pub use noise::inject_noise;
pub use pipeline::{FilterPipeline, Slot};
pub use resize::resize;
pub use spectrum::{apply_mask, forward_and_center, generate_mask, inverse_and_normalize, mask_radius};
