//! Utility module implementing the classification engine.
//!
//! Classification is a pure function of its inputs: it parses the color to
//! classify, converts it to CIELAB, and linearly scans all palette colors
//! with the chosen [`Metric`], keeping the running minimum. Palettes hold
//! tens of colors, so no spatial index is warranted. The engine holds no
//! state across calls and never mutates the palette.

use tracing::debug;

use crate::core::{delta_e_2000, delta_e_76, parse_hex_color, rgb_to_lab};
use crate::error::ClassifyError;
use crate::palette::Palette;
use crate::Float;

/// A choice of color difference metric.
///
/// Both metrics operate on CIELAB coordinates. [`Metric::Euclidean`] is the
/// 1976 Delta E, the plain Euclidian distance; [`Metric::Ciede2000`] is the
/// 2000 revision, which weighs lightness, chroma, and hue differences to
/// better track human perception and is the default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// The Euclidian distance in CIELAB, also known as Delta E 1976.
    Euclidean,
    /// The CIEDE2000 color difference.
    #[default]
    Ciede2000,
}

impl Metric {
    /// Compute the color difference between two CIELAB coordinates with this
    /// metric.
    ///
    /// The result is non-negative and zero exactly when the coordinates are
    /// identical.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chromatch::Metric;
    /// let gray = [53.59, 0.0, 0.0];
    /// assert_eq!(Metric::Euclidean.distance(&gray, &gray), 0.0);
    /// assert_eq!(Metric::Ciede2000.distance(&gray, &gray), 0.0);
    /// ```
    pub fn distance(&self, coordinates1: &[Float; 3], coordinates2: &[Float; 3]) -> Float {
        match *self {
            Self::Euclidean => delta_e_76(coordinates1, coordinates2),
            Self::Ciede2000 => delta_e_2000(coordinates1, coordinates2),
        }
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// The palette color closest to a classified input.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchedColor {
    /// The winning category's stable key.
    pub key: String,
    /// The winning category's display name.
    pub name: String,
    /// The winning reference color's hex notation, as stored in the palette.
    pub hex: String,
    /// The winning reference color's CIELAB coordinates.
    pub lab: [Float; 3],
    /// The difference between the input and the winning reference color
    /// under the chosen metric. Zero exactly for an identical CIELAB value.
    pub distance: Float,
}

/// Classify a color against a palette.
///
/// This function parses the hex color, converts it to CIELAB, and returns
/// the palette color with the smallest difference under the given metric.
/// Candidates are scanned in category insertion order and then color
/// insertion order, and a candidate replaces the running minimum only when
/// it is strictly closer — so the first candidate encountered wins ties.
///
/// The palette is only read. Callers editing a palette concurrently must
/// hand the engine a stable snapshot, e.g., a clone.
///
/// # Errors
///
/// Fails if the input is not a well-formed hex color or if the palette has
/// no colors at all.
///
/// # Examples
///
/// ```
/// # use chromatch::{classify, ClassifyError, Metric, Palette};
/// let palette = Palette::builtin();
///
/// let matched = classify("#FF6B9D", &palette, Metric::Ciede2000)?;
/// assert_eq!(matched.key, "PINK");
/// assert_eq!(matched.hex, "#FF69B4");
///
/// assert!(classify("no-color", &palette, Metric::Ciede2000).is_err());
/// # Ok::<(), ClassifyError>(())
/// ```
pub fn classify(
    hex: &str,
    palette: &Palette,
    metric: Metric,
) -> Result<MatchedColor, ClassifyError> {
    let [r, g, b] = parse_hex_color(hex)?;
    let lab = rgb_to_lab(r, g, b);

    let mut min_distance = Float::INFINITY;
    let mut closest = None;

    for (key, name, candidate) in palette.colors() {
        let distance = metric.distance(&lab, &candidate.lab);
        if distance < min_distance {
            min_distance = distance;
            closest = Some((key, name, candidate));
        }
    }

    let (key, name, color) = closest.ok_or(ClassifyError::EmptyPalette)?;
    debug!(input = hex, key, distance = min_distance, "classified color");

    Ok(MatchedColor {
        key: key.to_string(),
        name: name.to_string(),
        hex: color.hex.clone(),
        lab: color.lab,
        distance: min_distance,
    })
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{classify, Metric};
    use crate::core::assert_close_enough;
    use crate::error::{ClassifyError, ColorFormatError, PaletteError};
    use crate::palette::{ColorCategory, Palette, PaletteColor};

    fn black_and_white() -> Palette {
        let mut palette = Palette::new();
        for (name, hex) in [("Black", "#000000"), ("White", "#FFFFFF")] {
            let key = palette.add_category(name).expect("fresh key");
            palette.update_color(&key, 0, hex).expect("valid hex");
        }
        palette
    }

    #[test]
    fn test_exact_match() -> Result<(), ClassifyError> {
        let palette = black_and_white();

        for metric in [Metric::Euclidean, Metric::Ciede2000] {
            let matched = classify("#000000", &palette, metric)?;
            assert_eq!(matched.key, "BLACK");
            assert_eq!(matched.name, "Black");
            assert_eq!(matched.hex, "#000000");
            assert_close_enough!(matched.distance, 0.0, 1e-9);
        }

        Ok(())
    }

    #[test]
    fn test_invalid_input() {
        let palette = black_and_white();

        assert_eq!(
            classify("zzzzzz", &palette, Metric::Euclidean),
            Err(ClassifyError::InvalidHex(ColorFormatError::MalformedDigit))
        );
        assert_eq!(
            classify("#12345", &palette, Metric::Ciede2000),
            Err(ClassifyError::InvalidHex(ColorFormatError::UnexpectedLength))
        );
    }

    #[test]
    fn test_empty_palette() {
        assert_eq!(
            classify("#123456", &Palette::new(), Metric::Ciede2000),
            Err(ClassifyError::EmptyPalette)
        );
    }

    #[test]
    fn test_red_beats_blue() -> Result<(), ClassifyError> {
        let red = PaletteColor::new("#FF0000", [53.24, 80.09, 67.2]);
        let blue = PaletteColor::new("#0000FF", [32.3, 79.19, -107.86]);

        let mut palette = Palette::new();
        for (key, name, color) in [("RED", "Red", &red), ("BLUE", "Blue", &blue)] {
            palette
                .insert_category(
                    key,
                    ColorCategory {
                        name: name.to_string(),
                        colors: vec![color.clone()],
                    },
                )
                .expect("fresh key");
        }

        let input = crate::rgb_to_lab(255, 0, 0);
        for metric in [Metric::Euclidean, Metric::Ciede2000] {
            let matched = classify("#FF0000", &palette, metric)?;
            assert_eq!(matched.key, "RED", "{:?} picks red", metric);

            // The winning distance must be strictly below the independently
            // computed distance to the blue reference.
            let to_blue = metric.distance(&input, &blue.lab);
            assert!(
                matched.distance < to_blue,
                "{:?}: {} < {}",
                metric,
                matched.distance,
                to_blue
            );
        }

        Ok(())
    }

    #[test]
    fn test_first_candidate_wins_ties() -> Result<(), PaletteError> {
        let mut palette = Palette::new();
        for name in ["First", "Second"] {
            let key = palette.add_category(name)?;
            palette.update_color(&key, 0, "#123456")?;
        }

        for metric in [Metric::Euclidean, Metric::Ciede2000] {
            let matched = classify("#123456", &palette, metric).expect("palette is not empty");
            assert_eq!(matched.key, "FIRST", "{:?} breaks ties in scan order", metric);
        }

        Ok(())
    }

    #[test]
    fn test_shorthand_input() -> Result<(), ClassifyError> {
        let palette = Palette::builtin();

        let shorthand = classify("f00", &palette, Metric::Ciede2000)?;
        let full = classify("#ff0000", &palette, Metric::Ciede2000)?;
        assert_eq!(shorthand.key, full.key);
        assert_eq!(shorthand.distance, full.distance, "same input, same distance");

        Ok(())
    }

    #[test]
    fn test_builtin_primaries() -> Result<(), ClassifyError> {
        let palette = Palette::builtin();

        assert_eq!(classify("#FF0000", &palette, Metric::default())?.key, "RED");
        assert_eq!(classify("#FFFFFF", &palette, Metric::default())?.key, "WHITE");
        assert_eq!(classify("#000000", &palette, Metric::default())?.key, "BLACK");

        Ok(())
    }
}
