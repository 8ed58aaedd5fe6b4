use crate::imaging::source::{load_matrix, save_matrix};
use crate::prelude::StageResult;
use ndarray::Array2;
use std::path::Path;

/// Something that can be emptied.
pub trait Resettable {
    fn reset(&mut self);
}

/// Read/write access to a held matrix.
pub trait MatrixAccess<T> {
    fn matrix(&self) -> &Array2<T>;
    fn set_matrix(&mut self, matrix: Array2<T>);

    fn is_empty(&self) -> bool {
        self.matrix().is_empty()
    }
}

/// File-backed population of a held matrix.
pub trait MatrixLoader {
    fn load_from_file(&mut self, path: &Path) -> StageResult<()>;
    fn save_as_file(&self, path: &Path) -> StageResult<()>;
}

/// Named, exclusively owned matrix storage. An unset slot holds a 0x0 matrix.
#[derive(Debug, Clone)]
pub struct MatrixSlot<T> {
    name: &'static str,
    data: Array2<T>,
}

impl<T: Default> MatrixSlot<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            data: Array2::default((0, 0)),
        }
    }
}

impl<T> MatrixSlot<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Default> Resettable for MatrixSlot<T> {
    fn reset(&mut self) {
        *self = Self::new(self.name);
    }
}

impl<T> MatrixAccess<T> for MatrixSlot<T> {
    fn matrix(&self) -> &Array2<T> {
        &self.data
    }

    fn set_matrix(&mut self, matrix: Array2<T>) {
        self.data = matrix;
    }
}

impl MatrixLoader for MatrixSlot<f64> {
    fn load_from_file(&mut self, path: &Path) -> StageResult<()> {
        // Leave the slot untouched on failure.
        let matrix = load_matrix(path)?;
        self.data = matrix;
        Ok(())
    }

    fn save_as_file(&self, path: &Path) -> StageResult<()> {
        save_matrix(&self.data, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn new_slot_is_empty() {
        let slot = MatrixSlot::<f64>::new("resized");
        assert!(slot.is_empty());
        assert_eq!(slot.name(), "resized");
    }

    #[test]
    fn reset_clears_contents_but_keeps_name() {
        let mut slot = MatrixSlot::new("noisy");
        slot.set_matrix(array![[1.0, 2.0]]);
        assert!(!slot.is_empty());
        slot.reset();
        assert!(slot.is_empty());
        assert_eq!(slot.name(), "noisy");
    }

    #[test]
    fn failed_load_keeps_previous_contents() {
        let mut slot = MatrixSlot::new("source");
        slot.set_matrix(array![[7.0]]);
        assert!(slot
            .load_from_file(Path::new("definitely/missing/image.png"))
            .is_err());
        assert_eq!(slot.matrix(), &array![[7.0]]);
    }
}
