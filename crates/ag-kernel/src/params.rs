use std::collections::HashMap;

use crate::error::{GemmError, Result};

/// A node attribute value as handed over by a graph runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Float(f32),
    Int(i64),
}

/// Per-operator gemm configuration.
///
/// Fixed when the operator instance is created and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineParams {
    /// Scale applied to op(A) * op(B).
    pub alpha: f32,
    /// Scale applied to the broadcast bias C.
    pub beta: f32,
    /// Transpose A before multiplying.
    pub trans_a: bool,
    /// Transpose B before multiplying.
    pub trans_b: bool,
}

impl Default for AffineParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
            trans_a: false,
            trans_b: false,
        }
    }
}

impl AffineParams {
    pub fn new(alpha: f32, beta: f32, trans_a: bool, trans_b: bool) -> Self {
        Self {
            alpha,
            beta,
            trans_a,
            trans_b,
        }
    }

    /// Parse gemm node attributes.
    ///
    /// Recognised keys, each optional:
    /// - `alpha` (float, default 1.0)
    /// - `beta` (float, default 1.0)
    /// - `transA` (int 0 or 1, default 0)
    /// - `transB` (int 0 or 1, default 0)
    ///
    /// Unknown keys and wrongly typed values are rejected.
    pub fn from_attributes(attrs: &HashMap<String, AttributeValue>) -> Result<AffineParams> {
        let mut params = AffineParams::default();
        for (name, value) in attrs {
            match name.as_str() {
                "alpha" => params.alpha = float_attr(name, value)?,
                "beta" => params.beta = float_attr(name, value)?,
                "transA" => params.trans_a = flag_attr(name, value)?,
                "transB" => params.trans_b = flag_attr(name, value)?,
                _ => {
                    return Err(GemmError::InvalidAttribute {
                        name: name.clone(),
                        reason: "unknown attribute".to_string(),
                    })
                }
            }
        }
        Ok(params)
    }
}

fn float_attr(name: &str, value: &AttributeValue) -> Result<f32> {
    match value {
        AttributeValue::Float(v) => Ok(*v),
        AttributeValue::Int(_) => Err(GemmError::InvalidAttribute {
            name: name.to_string(),
            reason: "expected a float".to_string(),
        }),
    }
}

fn flag_attr(name: &str, value: &AttributeValue) -> Result<bool> {
    match value {
        AttributeValue::Int(0) => Ok(false),
        AttributeValue::Int(1) => Ok(true),
        AttributeValue::Int(other) => Err(GemmError::InvalidAttribute {
            name: name.to_string(),
            reason: format!("expected 0 or 1, got {}", other),
        }),
        AttributeValue::Float(_) => Err(GemmError::InvalidAttribute {
            name: name.to_string(),
            reason: "expected an int".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, AttributeValue)]) -> HashMap<String, AttributeValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let p = AffineParams::from_attributes(&HashMap::new()).unwrap();
        assert_eq!(p, AffineParams::default());
        assert_eq!(p, AffineParams::new(1.0, 1.0, false, false));
    }

    #[test]
    fn test_all_attributes() {
        let p = AffineParams::from_attributes(&attrs(&[
            ("alpha", AttributeValue::Float(0.5)),
            ("beta", AttributeValue::Float(0.0)),
            ("transA", AttributeValue::Int(1)),
            ("transB", AttributeValue::Int(0)),
        ]))
        .unwrap();
        assert_eq!(p, AffineParams::new(0.5, 0.0, true, false));
    }

    #[test]
    fn test_unknown_attribute() {
        let err = AffineParams::from_attributes(&attrs(&[("gamma", AttributeValue::Float(1.0))]))
            .unwrap_err();
        assert!(matches!(err, GemmError::InvalidAttribute { ref name, .. } if name == "gamma"));
    }

    #[test]
    fn test_wrong_types() {
        assert!(AffineParams::from_attributes(&attrs(&[("alpha", AttributeValue::Int(1))])).is_err());
        assert!(
            AffineParams::from_attributes(&attrs(&[("transA", AttributeValue::Float(1.0))])).is_err()
        );
    }

    #[test]
    fn test_flag_out_of_range() {
        let err = AffineParams::from_attributes(&attrs(&[("transB", AttributeValue::Int(2))]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid attribute 'transB': expected 0 or 1, got 2"
        );
    }
}
