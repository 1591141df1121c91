use std::fmt;

/// Element types a tensor may declare.
///
/// Only `F32` is computable. `F16` is recognised so that hosts handing over
/// half-precision buffers get a typed rejection instead of garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating point.
    F32,
    /// 16-bit floating point (IEEE 754 half-precision).
    F16,
}

impl DType {
    /// Maps an ONNX `TensorProto.DataType` id to a `DType`.
    ///
    /// - 1 => F32 (FLOAT)
    /// - 10 => F16 (FLOAT16)
    pub fn from_onnx_type(id: i32) -> Option<DType> {
        match id {
            1 => Some(DType::F32),
            10 => Some(DType::F16),
            _ => None,
        }
    }

    /// Returns the ONNX `TensorProto.DataType` id for this `DType`.
    pub fn to_onnx_type(&self) -> i32 {
        match self {
            DType::F32 => 1,
            DType::F16 => 10,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::F32 => write!(f, "f32"),
            DType::F16 => write!(f, "f16"),
        }
    }
}
