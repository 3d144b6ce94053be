//! Named layer storage for the grid map.
//!
//! Keeps the insertion order of layer names as an observable contract
//! (consumers iterate layers in the order they were added) and a
//! name-only subset of "basic" layers that drives validity checks and
//! the partial invalidation on window shifts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::Matrix;
use crate::error::{GridError, Result};

/// Insertion-ordered mapping from layer name to cell matrix.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LayerStore {
    layers: Vec<String>,
    basic_layers: Vec<String>,
    data: HashMap<String, Matrix>,
}

impl LayerStore {
    /// Create a store with the given layer names and empty matrices.
    pub fn new(layers: Vec<String>) -> Self {
        let data = layers
            .iter()
            .map(|name| (name.clone(), Matrix::default()))
            .collect();
        Self {
            layers,
            basic_layers: Vec::new(),
            data,
        }
    }

    /// Insert a layer, overwriting its data if the name already exists,
    /// otherwise appending it to the layer order.
    pub fn insert(&mut self, name: &str, matrix: Matrix) {
        if let Some(existing) = self.data.get_mut(name) {
            *existing = matrix;
        } else {
            self.layers.push(name.to_string());
            self.data.insert(name.to_string(), matrix);
        }
    }

    /// True if a layer with this name exists.
    #[inline]
    pub fn exists(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// The layer's matrix.
    pub fn get(&self, name: &str) -> Result<&Matrix> {
        self.data
            .get(name)
            .ok_or_else(|| GridError::LayerNotFound(name.to_string()))
    }

    /// The layer's matrix, mutably.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Matrix> {
        self.data
            .get_mut(name)
            .ok_or_else(|| GridError::LayerNotFound(name.to_string()))
    }

    /// Remove a layer from the data, the layer order, and the basic set.
    ///
    /// Returns whether the layer existed; removing an absent layer is an
    /// expected no-op, not a failure.
    pub fn erase(&mut self, name: &str) -> bool {
        if self.data.remove(name).is_none() {
            return false;
        }
        self.layers.retain(|l| l != name);
        self.basic_layers.retain(|l| l != name);
        true
    }

    /// Layer names in insertion order.
    #[inline]
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Replace the basic-layer subset.
    ///
    /// Callers keep this a subset of the existing layers; the store does
    /// not validate membership at call time.
    pub fn set_basic_layers(&mut self, basic_layers: Vec<String>) {
        self.basic_layers = basic_layers;
    }

    /// Names of the basic layers.
    #[inline]
    pub fn basic_layers(&self) -> &[String] {
        &self.basic_layers
    }

    /// All matrices, mutably, in arbitrary order.
    pub fn matrices_mut(&mut self) -> impl Iterator<Item = &mut Matrix> {
        self.data.values_mut()
    }

    /// Matrices of the basic layers, mutably, in arbitrary order.
    pub fn basic_matrices_mut(&mut self) -> impl Iterator<Item = &mut Matrix> {
        let basic = &self.basic_layers;
        self.data
            .iter_mut()
            .filter(move |(name, _)| basic.contains(name))
            .map(|(_, matrix)| matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridSize;

    fn store() -> LayerStore {
        LayerStore::new(vec!["elevation".to_string(), "variance".to_string()])
    }

    #[test]
    fn layer_order_follows_insertion() {
        let mut s = store();
        s.insert("color", Matrix::default());
        assert_eq!(s.layers(), ["elevation", "variance", "color"]);
    }

    #[test]
    fn insert_existing_overwrites_without_reordering() {
        let mut s = store();
        s.insert("elevation", Matrix::constant(GridSize::new(2, 2), 1.0));
        assert_eq!(s.layers(), ["elevation", "variance"]);
        assert_eq!(s.get("elevation").unwrap().rows(), 2);
    }

    #[test]
    fn get_missing_layer_is_an_error() {
        let s = store();
        assert_eq!(
            s.get("slope").unwrap_err(),
            GridError::LayerNotFound("slope".to_string())
        );
    }

    #[test]
    fn erase_removes_everywhere() {
        let mut s = store();
        s.set_basic_layers(vec!["elevation".to_string()]);
        assert!(s.erase("elevation"));
        assert!(!s.exists("elevation"));
        assert_eq!(s.layers(), ["variance"]);
        assert!(s.basic_layers().is_empty());
    }

    #[test]
    fn erase_unknown_layer_is_a_no_op() {
        let mut s = store();
        assert!(!s.erase("slope"));
        assert_eq!(s.layers(), ["elevation", "variance"]);
    }

    #[test]
    fn basic_matrices_are_the_named_subset() {
        let mut s = store();
        s.set_basic_layers(vec!["variance".to_string()]);
        assert_eq!(s.basic_matrices_mut().count(), 1);
        assert_eq!(s.matrices_mut().count(), 2);
    }
}
