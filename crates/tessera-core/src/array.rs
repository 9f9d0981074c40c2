//! Dtype-tagged observation arrays.

use std::fmt;

use indexmap::IndexMap;
use ndarray::ArrayD;

/// Element type of an array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    /// Unsigned 8-bit integer (character boards, binary feature planes).
    U8,
    /// Signed 32-bit integer.
    I32,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8 => write!(f, "uint8"),
            Self::I32 => write!(f, "int32"),
            Self::F32 => write!(f, "float32"),
            Self::F64 => write!(f, "float64"),
        }
    }
}

/// An n-dimensional array with a runtime element type.
#[derive(Clone, Debug, PartialEq)]
pub enum ObsArray {
    /// `u8` elements.
    U8(ArrayD<u8>),
    /// `i32` elements.
    I32(ArrayD<i32>),
    /// `f32` elements.
    F32(ArrayD<f32>),
    /// `f64` elements.
    F64(ArrayD<f64>),
}

impl ObsArray {
    /// Array dimensions.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::U8(a) => a.shape(),
            Self::I32(a) => a.shape(),
            Self::F32(a) => a.shape(),
            Self::F64(a) => a.shape(),
        }
    }

    /// Element type.
    pub fn dtype(&self) -> DType {
        match self {
            Self::U8(_) => DType::U8,
            Self::I32(_) => DType::I32,
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
        }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements widened to `f64`, in logical (row-major) order.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            Self::U8(a) => a.iter().map(|&v| f64::from(v)).collect(),
            Self::I32(a) => a.iter().map(|&v| f64::from(v)).collect(),
            Self::F32(a) => a.iter().map(|&v| f64::from(v)).collect(),
            Self::F64(a) => a.iter().copied().collect(),
        }
    }
}

impl From<ArrayD<u8>> for ObsArray {
    fn from(a: ArrayD<u8>) -> Self {
        Self::U8(a)
    }
}

impl From<ArrayD<i32>> for ObsArray {
    fn from(a: ArrayD<i32>) -> Self {
        Self::I32(a)
    }
}

impl From<ArrayD<f32>> for ObsArray {
    fn from(a: ArrayD<f32>) -> Self {
        Self::F32(a)
    }
}

impl From<ArrayD<f64>> for ObsArray {
    fn from(a: ArrayD<f64>) -> Self {
        Self::F64(a)
    }
}

/// Named observation arrays, in the order the distiller produced them.
pub type Observations = IndexMap<String, ObsArray>;

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;

    #[test]
    fn shape_and_dtype_follow_variant() {
        let a = ObsArray::from(ArrayD::<u8>::zeros(IxDyn(&[3, 4])));
        assert_eq!(a.shape(), &[3, 4]);
        assert_eq!(a.dtype(), DType::U8);
        assert_eq!(a.len(), 12);
        assert!(!a.is_empty());
    }

    #[test]
    fn widening_preserves_order() {
        let a = ObsArray::from(
            ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![1i32, 2, 3, 4]).unwrap(),
        );
        assert_eq!(a.to_f64_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn dtype_display_uses_numpy_names() {
        assert_eq!(DType::I32.to_string(), "int32");
        assert_eq!(DType::F32.to_string(), "float32");
    }
}
