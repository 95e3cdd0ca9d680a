//! # Chromatch
//!
//! Chromatch answers one question: given an arbitrary color, which named
//! reference color does a human see? It classifies sRGB colors against a
//! small, user-editable palette of named reference colors, using the CIELAB
//! color space and perceptual color difference metrics.
//!
//!
//! ## 1. Overview
//!
//! Chromatch's main abstractions are:
//!
//!   * [`Palette`] is an insertion-ordered collection of named
//!     [`ColorCategory`] values, each holding one or more [`PaletteColor`]
//!     reference colors with cached CIELAB coordinates. Palettes are plain
//!     values: they are built from the [builtin defaults](Palette::builtin),
//!     edited through the palette's operations, and exchanged as JSON
//!     documents with [`Palette::from_json`] and [`Palette::to_json`].
//!   * [`Metric`] selects one of two interchangeable color difference
//!     strategies, the Euclidian [`delta_e_76`] or the perceptually refined
//!     [`delta_e_2000`].
//!   * [`classify`] ties the two together: it parses a hex color, converts
//!     it to CIELAB, scans the palette with the chosen metric, and returns
//!     the closest reference color as a [`MatchedColor`].
//!
//! The classification engine is stateless and purely functional. It borrows
//! the palette for the duration of a call and never mutates it, so sharing a
//! palette snapshot across threads is safe.
//!
//!
//! ## 2. Example
//!
//! ```
//! use chromatch::{classify, Metric, Palette};
//!
//! # fn main() -> Result<(), chromatch::ClassifyError> {
//! let palette = Palette::builtin();
//! let matched = classify("#FF0000", &palette, Metric::Ciede2000)?;
//!
//! assert_eq!(matched.key, "RED");
//! assert_eq!(matched.name, "Red");
//! assert!(matched.distance < 1.0);
//! # Ok(())
//! # }
//! ```
//!
//!
//! ## 3. Optional Features
//!
//! Chromatch supports one feature flag:
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     instead of `f32`. This feature is enabled by default.

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

mod classify;
mod core;
pub mod error;
mod palette;

pub use classify::{classify, MatchedColor, Metric};
pub use core::{delta_e_2000, delta_e_76};
pub use error::{ClassifyError, ColorFormatError, ImportError, PaletteError};
pub use palette::{ColorCategory, Palette, PaletteColor, PaletteColors};

/// Parse a color in hexadecimal notation into its 24-bit sRGB coordinates.
///
/// This function recognizes the six digit form as well as the three digit
/// shorthand, whose digits are doubled, with or without the leading `#`.
/// Digits are case-insensitive.
///
/// # Examples
///
/// ```
/// # use chromatch::{parse_hex_color, ColorFormatError};
/// assert_eq!(parse_hex_color("#ff0000")?, [255, 0, 0]);
/// assert_eq!(parse_hex_color("f00")?, [255, 0, 0]);
/// assert!(parse_hex_color("#f0").is_err());
/// # Ok::<(), ColorFormatError>(())
/// ```
pub fn parse_hex_color(s: &str) -> Result<[u8; 3], ColorFormatError> {
    core::parse_hex_color(s)
}

/// Convert the given 24-bit sRGB coordinates to CIELAB.
///
/// The conversion undoes the sRGB gamma, applies the D65 sRGB-to-XYZ matrix,
/// and normalizes against the D65 white point. Lightness L ranges `0..=100`;
/// the chroma axes a and b are unbounded in theory but stay within roughly
/// `-130..=130` for sRGB inputs.
///
/// # Examples
///
/// ```
/// # use chromatch::rgb_to_lab;
/// let [l, a, b] = rgb_to_lab(255, 255, 255);
/// assert!((l - 100.0).abs() < 0.1);
/// assert!(a.abs() < 0.1 && b.abs() < 0.1);
/// ```
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> [Float; 3] {
    core::rgb_to_lab(r, g, b)
}
