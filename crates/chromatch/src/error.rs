//! Utility module with chromatch's errors.
//!
//! Every error in this crate is local and recoverable. Classification,
//! parsing, and palette editing all return `Result`s; nothing panics outside
//! of tests.

use thiserror::Error;

/// An erroneous color format.
///
/// Hex colors have six hexadecimal digits, or three digits as a shorthand
/// with every digit doubled, optionally preceded by `#`. Anything else is an
/// error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColorFormatError {
    /// A hex color with an unexpected number of digits. For example, `#ff00`
    /// has one digit too many for the shorthand form and two too few for the
    /// full form.
    #[error("hex color should have 3 or 6 digits after the optional '#'")]
    UnexpectedLength,

    /// A hex color containing a character that is not a hexadecimal digit.
    /// For example, `#0g0000` has a malformed second digit.
    #[error("hex color should contain only hexadecimal digits")]
    MalformedDigit,
}

// --------------------------------------------------------------------------------------------------------------------

/// An error while classifying a color against a palette.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The input was not a well-formed hex color.
    #[error("cannot classify input: {0}")]
    InvalidHex(#[from] ColorFormatError),

    /// The palette has no colors at all, hence no closest one.
    #[error("palette contains no colors")]
    EmptyPalette,
}

// --------------------------------------------------------------------------------------------------------------------

/// An error while editing a palette.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No category is stored under the given key.
    #[error("palette has no category with key {0:?}")]
    UnknownCategory(String),

    /// A color index past the end of a category's color list.
    #[error("color index {index} is out of bounds for category with {len} colors")]
    OutOfBounds { index: usize, len: usize },

    /// A category display name that is empty or all whitespace.
    #[error("category name should not be empty")]
    EmptyName,

    /// A new category whose derived key collides with an existing one.
    #[error("palette already has a category with key {0:?}")]
    DuplicateCategory(String),

    /// Removing the only color of a category. Categories always keep at
    /// least one color; remove the category instead.
    #[error("cannot remove the last color of a category")]
    LastColor,

    /// Inserting a category without any colors.
    #[error("category should have at least one color")]
    EmptyCategory,

    /// A hex color that does not parse.
    #[error(transparent)]
    BadColor(#[from] ColorFormatError),
}

// --------------------------------------------------------------------------------------------------------------------

/// An error while importing a palette from JSON.
///
/// Imports are all-or-nothing: any malformed category rejects the entire
/// document, and the palette value previously in use remains untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document is not valid JSON, its root is not an object, or a
    /// category is missing `name` or has a `colors` value that is not a
    /// sequence of colors.
    #[error("malformed palette document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A category with an empty display name.
    #[error("category {0:?} has an empty name")]
    EmptyName(String),
}
