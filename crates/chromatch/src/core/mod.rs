mod conversion;
mod difference;
mod string;

pub use difference::{delta_e_2000, delta_e_76};

pub(crate) use conversion::rgb_to_lab;
pub(crate) use string::parse_hex_color;

/// Test macro for asserting that two floating point quantities are within
/// the given tolerance of each other.
///
/// # Panics
///
/// This macro panics if the absolute difference exceeds the tolerance. Its
/// message places the numbers below each other at the beginning of
/// subsequent lines for easy comparability.
#[cfg(test)]
macro_rules! assert_close_enough {
    ($f1:expr, $f2:expr, $tolerance:expr $(,)?) => {
        let (f1, f2, tolerance) = ($f1, $f2, $tolerance);
        assert!(
            (f1 - f2).abs() <= tolerance,
            "quantities differ by more than {:?}:\n{:?}\n{:?}",
            tolerance,
            f1,
            f2
        );
    };
}

#[cfg(test)]
pub(crate) use assert_close_enough;
