//! Boundary to the image-source collaborator and the slot type the pipeline
//! stores its matrices in.

pub mod slot;
pub mod source;

pub use slot::{MatrixAccess, MatrixLoader, MatrixSlot, Resettable};
pub use source::{load_matrix, luminance, save_matrix};
