use std::fmt;

/// A tensor shape, wrapping a vector of dimension sizes.
///
/// Dimensions are `usize`, so every size is non-negative by construction. A
/// shape with any zero dimension describes an empty tensor; a rank-0 shape
/// describes a scalar holding exactly one element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a new shape from a vector of dimensions.
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    /// Create a shape from a slice of dimensions.
    pub fn from_slice(dims: &[usize]) -> Self {
        Shape {
            dims: dims.to_vec(),
        }
    }

    /// The rank-0 shape.
    pub fn scalar() -> Self {
        Shape { dims: Vec::new() }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements (product of all dimension sizes).
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns a reference to the underlying dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns `(rows, cols)` of a rank-2 shape as seen after an optional
    /// transpose, or `None` if the shape is not rank 2.
    pub fn matrix_dims(&self, transpose: bool) -> Option<(usize, usize)> {
        match self.dims.as_slice() {
            &[rows, cols] if transpose => Some((cols, rows)),
            &[rows, cols] => Some((rows, cols)),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_shape() {
        let s = Shape::new(vec![2, 3, 4]);
        assert_eq!(s.ndim(), 3);
        assert_eq!(s.numel(), 24);
        assert_eq!(s.dims(), &[2, 3, 4]);
    }

    #[test]
    fn test_scalar_shape() {
        let s = Shape::scalar();
        assert_eq!(s.ndim(), 0);
        assert_eq!(s.numel(), 1); // product of empty = 1
    }

    #[test]
    fn test_empty_shape() {
        assert_eq!(Shape::new(vec![3, 0]).numel(), 0);
    }

    #[test]
    fn test_matrix_dims() {
        let s = Shape::new(vec![2, 3]);
        assert_eq!(s.matrix_dims(false), Some((2, 3)));
        assert_eq!(s.matrix_dims(true), Some((3, 2)));
        assert_eq!(Shape::new(vec![6]).matrix_dims(false), None);
        assert_eq!(Shape::new(vec![1, 2, 3]).matrix_dims(true), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::new(vec![2, 3]).to_string(), "[2, 3]");
        assert_eq!(Shape::scalar().to_string(), "[]");
    }
}
