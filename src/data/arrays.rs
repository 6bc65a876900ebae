//! Named point/cell data arrays.
//!
//! A [`DataArrays`] store maps array names to tagged value buffers with a fixed
//! number of components per tuple. Algorithms in this crate use it to hand
//! auxiliary per-point and per-cell values (marks, radii, topology tags,
//! original point ids) to downstream consumers alongside the geometry.

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshError;

/// Per-point mark written by network extraction.
pub const MARKS_ARRAY: &str = "Marks";
/// Per-point (or per-cell) radius.
pub const RADIUS_ARRAY: &str = "Radius";
/// Per-cell `(start, end)` bifurcation indices of a network segment.
pub const TOPOLOGY_ARRAY: &str = "Topology";
/// Per-cell topological dimension.
pub const CELL_DIMENSION_ARRAY: &str = "CellDimensionArray";
/// Per-point id of the corresponding input point.
pub const ORIGINAL_POINT_IDS_ARRAY: &str = "OriginalPointIds";

/// Scalar type tag for a data array.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ScalarType {
    I64,
    F64,
}

/// Tagged value buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ArrayValues {
    I64(Vec<i64>),
    F64(Vec<f64>),
}

impl ArrayValues {
    /// Return the scalar type tag for this buffer.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ArrayValues::I64(_) => ScalarType::I64,
            ArrayValues::F64(_) => ScalarType::F64,
        }
    }

    fn len(&self) -> usize {
        match self {
            ArrayValues::I64(v) => v.len(),
            ArrayValues::F64(v) => v.len(),
        }
    }
}

/// A named array of `components`-wide tuples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataArray {
    name: String,
    components: usize,
    values: ArrayValues,
}

impl DataArray {
    /// Integer array. `values.len()` must be a multiple of `components`.
    pub fn from_i64(
        name: impl Into<String>,
        components: usize,
        values: Vec<i64>,
    ) -> Result<Self, MeshError> {
        Self::new(name.into(), components, ArrayValues::I64(values))
    }

    /// Floating-point array. `values.len()` must be a multiple of `components`.
    pub fn from_f64(
        name: impl Into<String>,
        components: usize,
        values: Vec<f64>,
    ) -> Result<Self, MeshError> {
        Self::new(name.into(), components, ArrayValues::F64(values))
    }

    fn new(name: String, components: usize, values: ArrayValues) -> Result<Self, MeshError> {
        if components == 0 {
            return Err(MeshError::InvalidGeometry(format!(
                "data array `{name}` needs at least one component"
            )));
        }
        if values.len() % components != 0 {
            return Err(MeshError::ArrayLengthMismatch {
                expected: values.len().next_multiple_of(components),
                found: values.len(),
                name,
            });
        }
        Ok(Self {
            name,
            components,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> usize {
        self.components
    }

    /// Number of tuples.
    pub fn len(&self) -> usize {
        self.values.len() / self.components
    }

    pub fn is_empty(&self) -> bool {
        self.values.len() == 0
    }

    pub fn values(&self) -> &ArrayValues {
        &self.values
    }

    pub fn as_i64(&self) -> Option<&[i64]> {
        match &self.values {
            ArrayValues::I64(v) => Some(v),
            ArrayValues::F64(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.values {
            ArrayValues::F64(v) => Some(v),
            ArrayValues::I64(_) => None,
        }
    }

    /// Component `c` of tuple `i`, widened to `f64`.
    pub fn component(&self, i: usize, c: usize) -> Option<f64> {
        if c >= self.components {
            return None;
        }
        let k = i * self.components + c;
        match &self.values {
            ArrayValues::I64(v) => v.get(k).map(|&x| x as f64),
            ArrayValues::F64(v) => v.get(k).copied(),
        }
    }
}

/// Ordered collection of named arrays. Names are unique.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataArrays {
    arrays: Vec<DataArray>,
}

impl DataArrays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `array`, replacing any array with the same name.
    ///
    /// Returns the replaced array, if any.
    pub fn add_array(&mut self, array: DataArray) -> Option<DataArray> {
        match self.arrays.iter().position(|a| a.name == array.name) {
            Some(pos) => Some(std::mem::replace(&mut self.arrays[pos], array)),
            None => {
                self.arrays.push(array);
                None
            }
        }
    }

    pub fn array(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|a| a.name == name)
    }

    /// Like [`DataArrays::array`], reporting a missing name as an error.
    pub fn try_array(&self, name: &str) -> Result<&DataArray, MeshError> {
        self.array(name)
            .ok_or_else(|| MeshError::MissingArray(name.to_string()))
    }

    pub fn remove_array(&mut self, name: &str) -> Option<DataArray> {
        let pos = self.arrays.iter().position(|a| a.name == name)?;
        Some(self.arrays.remove(pos))
    }

    /// Array names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.iter().map(|a| a.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataArray> {
        self.arrays.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_replaces_by_name() {
        let mut arrays = DataArrays::new();
        let a = DataArray::from_i64(MARKS_ARRAY, 1, vec![0, 1, 2]).unwrap();
        assert!(arrays.add_array(a).is_none());
        let b = DataArray::from_i64(MARKS_ARRAY, 1, vec![5]).unwrap();
        let old = arrays.add_array(b).unwrap();
        assert_eq!(old.len(), 3);
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays.array(MARKS_ARRAY).unwrap().as_i64(), Some(&[5][..]));
    }

    #[test]
    fn tuple_access_widens_integers() {
        let topo = DataArray::from_i64(TOPOLOGY_ARRAY, 2, vec![0, -1, 1, 2]).unwrap();
        assert_eq!(topo.len(), 2);
        assert_eq!(topo.component(0, 1), Some(-1.0));
        assert_eq!(topo.component(1, 0), Some(1.0));
        assert_eq!(topo.component(1, 2), None);
        assert!(topo.as_f64().is_none());
    }

    #[test]
    fn ragged_array_is_rejected() {
        let err = DataArray::from_f64(RADIUS_ARRAY, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, MeshError::ArrayLengthMismatch { found: 3, .. }));
        assert!(DataArray::from_f64(RADIUS_ARRAY, 0, vec![]).is_err());
    }

    #[test]
    fn missing_array_is_an_error() {
        let arrays = DataArrays::new();
        assert_eq!(
            arrays.try_array(RADIUS_ARRAY),
            Err(MeshError::MissingArray(RADIUS_ARRAY.to_string()))
        );
    }
}
