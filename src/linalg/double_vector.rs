//! Dense `f64` vector used as the right-hand side and unknown of a sparse system.

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshError;

/// Dense vector of doubles with the handful of BLAS-1 operations solvers need.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DoubleVector {
    values: Vec<f64>,
}

impl DoubleVector {
    /// Zero vector of length `n`.
    pub fn new(n: usize) -> Self {
        Self {
            values: vec![0.0; n],
        }
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    pub fn fill(&mut self, value: f64) {
        self.values.fill(value);
    }

    pub fn dot(&self, other: &DoubleVector) -> Result<f64, MeshError> {
        self.check_len(other)?;
        Ok(self.values.iter().zip(&other.values).map(|(a, b)| a * b).sum())
    }

    pub fn l2_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    pub fn linf_norm(&self) -> f64 {
        self.values.iter().fold(0.0, |m, v| m.max(v.abs()))
    }

    /// `self += other`.
    pub fn add(&mut self, other: &DoubleVector) -> Result<(), MeshError> {
        self.check_len(other)?;
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a += b;
        }
        Ok(())
    }

    /// `self -= other`.
    pub fn subtract(&mut self, other: &DoubleVector) -> Result<(), MeshError> {
        self.check_len(other)?;
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a -= b;
        }
        Ok(())
    }

    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.values {
            *v *= factor;
        }
    }

    /// Overwrite with `src`, resizing if needed.
    pub fn copy_from(&mut self, src: &DoubleVector) {
        self.values.clone_from(&src.values);
    }

    fn check_len(&self, other: &DoubleVector) -> Result<(), MeshError> {
        if self.values.len() == other.values.len() {
            Ok(())
        } else {
            Err(MeshError::DimensionMismatch {
                expected: self.values.len(),
                found: other.values.len(),
            })
        }
    }
}

impl Deref for DoubleVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl DerefMut for DoubleVector {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

impl From<Vec<f64>> for DoubleVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}
