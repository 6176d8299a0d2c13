//! Built-in mathematical functions for expression evaluation.
//!
//! Every built-in is a unary function on [`Real`]. Inputs outside a function's real
//! domain return NaN (or infinity for poles) rather than panicking; the evaluator turns
//! those values into [`crate::EvaluationError::NonFinite`].
//!
//! All functions use the `libm` crate for their implementations. Depending on the
//! selected floating-point precision (controlled by the "f32" feature), different
//! versions of the math functions are used.

#[cfg(feature = "f32")]
use libm::{
    acosf as libm_acos, asinf as libm_asin, atanf as libm_atan, cbrtf as libm_cbrt,
    ceilf as libm_ceil, cosf as libm_cos, coshf as libm_cosh, expf as libm_exp,
    fabsf as libm_fabs, floorf as libm_floor, log10f as libm_log10, log2f as libm_log2,
    logf as libm_ln, powf as libm_pow, roundf as libm_round, sinf as libm_sin,
    sinhf as libm_sinh, sqrtf as libm_sqrt, tanf as libm_tan, tanhf as libm_tanh,
};

#[cfg(not(feature = "f32"))]
use libm::{
    acos as libm_acos, asin as libm_asin, atan as libm_atan, cbrt as libm_cbrt,
    ceil as libm_ceil, cos as libm_cos, cosh as libm_cosh, exp as libm_exp, fabs as libm_fabs,
    floor as libm_floor, log as libm_ln, log10 as libm_log10, log2 as libm_log2, pow as libm_pow,
    round as libm_round, sin as libm_sin, sinh as libm_sinh, sqrt as libm_sqrt, tan as libm_tan,
    tanh as libm_tanh,
};

use crate::Real;

/// Signature shared by all built-in functions.
pub type BuiltinFn = fn(Real) -> Real;

/// Name and implementation of every built-in function, in registration order.
pub const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("sin", sin),
    ("cos", cos),
    ("tan", tan),
    ("asin", asin),
    ("acos", acos),
    ("atan", atan),
    ("sinh", sinh),
    ("cosh", cosh),
    ("tanh", tanh),
    ("sqrt", sqrt),
    ("cbrt", cbrt),
    ("abs", abs),
    ("exp", exp),
    ("ln", ln),
    ("log", log),
    ("log10", log10),
    ("log2", log2),
    ("floor", floor),
    ("ceil", ceil),
    ("round", round),
    ("sign", sign),
];

/// Names of the functions the domain analyzer treats as logarithms.
pub const LOGARITHMS: &[&str] = &["ln", "log", "log10", "log2"];

pub fn sin(a: Real) -> Real {
    libm_sin(a)
}
pub fn cos(a: Real) -> Real {
    libm_cos(a)
}
pub fn tan(a: Real) -> Real {
    libm_tan(a)
}
pub fn asin(a: Real) -> Real {
    if !(-1.0..=1.0).contains(&a) {
        return Real::NAN; // asin is only defined for inputs between -1 and 1
    }
    libm_asin(a)
}
pub fn acos(a: Real) -> Real {
    if !(-1.0..=1.0).contains(&a) {
        return Real::NAN; // acos is only defined for inputs between -1 and 1
    }
    libm_acos(a)
}
pub fn atan(a: Real) -> Real {
    libm_atan(a)
}
pub fn sinh(a: Real) -> Real {
    libm_sinh(a)
}
pub fn cosh(a: Real) -> Real {
    libm_cosh(a)
}
pub fn tanh(a: Real) -> Real {
    libm_tanh(a)
}
pub fn sqrt(a: Real) -> Real {
    if a < 0.0 {
        return Real::NAN;
    }
    libm_sqrt(a)
}
pub fn cbrt(a: Real) -> Real {
    libm_cbrt(a)
}
pub fn abs(a: Real) -> Real {
    libm_fabs(a)
}
pub fn exp(a: Real) -> Real {
    libm_exp(a)
}

/// Natural logarithm. Zero and negative inputs are undefined and return NaN.
pub fn ln(a: Real) -> Real {
    if a <= 0.0 {
        return Real::NAN;
    }
    libm_ln(a)
}

/// Base 10 logarithm, the calculator convention for `log`.
pub fn log(a: Real) -> Real {
    log10(a)
}
pub fn log10(a: Real) -> Real {
    if a <= 0.0 {
        return Real::NAN;
    }
    libm_log10(a)
}
pub fn log2(a: Real) -> Real {
    if a <= 0.0 {
        return Real::NAN;
    }
    libm_log2(a)
}
pub fn floor(a: Real) -> Real {
    libm_floor(a)
}
pub fn ceil(a: Real) -> Real {
    libm_ceil(a)
}
pub fn round(a: Real) -> Real {
    libm_round(a)
}
pub fn sign(a: Real) -> Real {
    if a > 0.0 {
        1.0
    } else if a < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Raises a value to a power.
///
/// Special cases:
///
/// - 0^0 = 1 (by mathematical convention)
/// - Negative base with a non-integer exponent returns NaN
/// - Otherwise defers to `libm::pow`, which may overflow to infinity
pub fn pow(a: Real, b: Real) -> Real {
    if a == 0.0 && b == 0.0 {
        return 1.0;
    }
    if a < 0.0 && b != libm_floor(b) {
        // Negative base with non-integer exponent is not a real number
        return Real::NAN;
    }
    libm_pow(a, b)
}
