//! Utility module implementing user-editable color palettes.
//!
//! A [`Palette`] is an insertion-ordered mapping from stable category keys to
//! named [`ColorCategory`] values. The ordering matters: classification
//! breaks distance ties in favor of the color encountered first, so two
//! palettes with the same entries in different orders are different palettes.
//!
//! The palette owns all mutation. Whenever an editing operation changes a
//! color's hex value, it also recomputes the cached CIELAB coordinates; the
//! classification engine itself never recomputes or mutates palette data.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::core::{parse_hex_color, rgb_to_lab};
use crate::error::{ColorFormatError, ImportError, PaletteError};
use crate::Float;

/// A reference color: a hex string and its cached CIELAB coordinates.
///
/// The coordinates are a trusted cache. They are either derived from the hex
/// string by this crate's converter or supplied directly, e.g., when a
/// palette document ships precomputed values. The editing operations on
/// [`Palette`] keep the cache consistent; code mutating fields directly is
/// responsible for doing the same.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteColor {
    /// The hex notation for the color, with or without the leading `#`.
    pub hex: String,
    /// The CIELAB coordinates matching `hex`.
    pub lab: [Float; 3],
}

impl PaletteColor {
    /// Create a new palette color from its parts. The coordinates are
    /// trusted, not validated against the hex string.
    pub fn new(hex: impl Into<String>, lab: [Float; 3]) -> Self {
        Self {
            hex: hex.into(),
            lab,
        }
    }

    /// Create a new palette color by parsing the hex string and deriving the
    /// CIELAB coordinates from it.
    pub fn from_hex(hex: &str) -> Result<Self, ColorFormatError> {
        let [r, g, b] = parse_hex_color(hex)?;
        Ok(Self {
            hex: hex.to_string(),
            lab: rgb_to_lab(r, g, b),
        })
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// A named category of reference colors.
///
/// The display name is presentation only; the category's identity is the key
/// it is stored under in a [`Palette`]. Color order is insertion order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorCategory {
    /// The human-readable display name.
    pub name: String,
    /// The category's reference colors, in insertion order.
    pub colors: Vec<PaletteColor>,
}

// ====================================================================================================================

/// An ordered palette of named reference colors.
///
/// Categories iterate in insertion order and keys are unique. Categories are
/// addressed by their stable key, which [`Palette::add_category`] derives
/// from the display name once; renaming a category later does not change its
/// key.
///
/// # Examples
///
/// ```
/// # use chromatch::{Palette, PaletteError};
/// let mut palette = Palette::new();
/// let key = palette.add_category("Deep Blue")?;
/// assert_eq!(key, "DEEP_BLUE");
///
/// palette.add_color(&key, "#000080")?;
/// assert_eq!(palette.color_count(), 2); // the seed color plus navy
/// # Ok::<(), PaletteError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Palette {
    entries: Vec<(String, ColorCategory)>,
}

/// The neutral gray seeding newly added categories.
const SEED_GRAY: (&str, [Float; 3]) = ("#808080", [53.59, 0.0, 0.0]);

impl Palette {
    /// Create a new, empty palette.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create the builtin reference palette.
    ///
    /// The builtin palette has fifteen categories from `BLACK` to
    /// `DARK_BLUE`, each with three reference colors and precomputed CIELAB
    /// coordinates.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(key, name, colors)| {
                let colors = colors
                    .iter()
                    .map(|(hex, lab)| PaletteColor::new(*hex, *lab))
                    .collect();
                (
                    (*key).to_string(),
                    ColorCategory {
                        name: (*name).to_string(),
                        colors,
                    },
                )
            })
            .collect();

        Self { entries }
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Get the number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Determine whether this palette has no categories.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the total number of colors across all categories.
    pub fn color_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, category)| category.colors.len())
            .sum()
    }

    /// Determine whether this palette has a category with the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Get the category with the given key.
    pub fn get(&self, key: &str) -> Option<&ColorCategory> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, category)| category)
    }

    /// Get an iterator over the categories in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &ColorCategory)> {
        self.entries
            .iter()
            .map(|(key, category)| (key.as_str(), category))
    }

    /// Get an iterator over all colors of this palette, in category insertion
    /// order and then color insertion order within each category.
    ///
    /// This flattened view is the order the classification engine scans, and
    /// hence the order that decides distance ties.
    pub fn colors(&self) -> PaletteColors<'_> {
        PaletteColors {
            categories: self.entries.iter(),
            current: None,
        }
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Add a new category with the given display name.
    ///
    /// The category's stable key is the display name uppercased, with runs of
    /// whitespace replaced by underscores. The new category starts out with
    /// one neutral gray color, maintaining the invariant that categories are
    /// never empty. Returns the derived key.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty or all whitespace, or if the derived key
    /// already exists.
    pub fn add_category(&mut self, name: &str) -> Result<String, PaletteError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PaletteError::EmptyName);
        }

        let key: String = name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_uppercase();
        if self.contains_key(&key) {
            return Err(PaletteError::DuplicateCategory(key));
        }

        let (hex, lab) = SEED_GRAY;
        self.entries.push((
            key.clone(),
            ColorCategory {
                name: name.to_string(),
                colors: vec![PaletteColor::new(hex, lab)],
            },
        ));

        Ok(key)
    }

    /// Insert a fully formed category under the given explicit key.
    ///
    /// Unlike [`Palette::add_category`], this operation does not derive the
    /// key and trusts the category's cached CIELAB coordinates as they are.
    /// It is the programmatic counterpart of importing a palette document.
    ///
    /// # Errors
    ///
    /// Fails if the key is already taken, the display name is empty, or the
    /// category has no colors.
    pub fn insert_category(
        &mut self,
        key: impl Into<String>,
        category: ColorCategory,
    ) -> Result<(), PaletteError> {
        let key = key.into();
        if category.name.trim().is_empty() {
            return Err(PaletteError::EmptyName);
        } else if category.colors.is_empty() {
            return Err(PaletteError::EmptyCategory);
        } else if self.contains_key(&key) {
            return Err(PaletteError::DuplicateCategory(key));
        }

        self.entries.push((key, category));
        Ok(())
    }

    /// Change the display name of the category with the given key. The key
    /// itself is stable and remains unchanged.
    pub fn rename_category(&mut self, key: &str, name: &str) -> Result<(), PaletteError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PaletteError::EmptyName);
        }

        let category = self.category_mut(key)?;
        category.name = name.to_string();
        Ok(())
    }

    /// Remove the category with the given key, returning it.
    pub fn remove_category(&mut self, key: &str) -> Result<ColorCategory, PaletteError> {
        let index = self
            .entries
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| PaletteError::UnknownCategory(key.to_string()))?;
        Ok(self.entries.remove(index).1)
    }

    /// Append a color to the category with the given key. The color's CIELAB
    /// coordinates are derived from the hex string.
    pub fn add_color(&mut self, key: &str, hex: &str) -> Result<(), PaletteError> {
        let color = PaletteColor::from_hex(hex)?;
        self.category_mut(key)?.colors.push(color);
        Ok(())
    }

    /// Replace the color at the given index of the category with the given
    /// key. The replacement's CIELAB coordinates are derived from the hex
    /// string, never carried over from the replaced color.
    pub fn update_color(&mut self, key: &str, index: usize, hex: &str) -> Result<(), PaletteError> {
        let color = PaletteColor::from_hex(hex)?;
        let category = self.category_mut(key)?;
        let len = category.colors.len();
        let slot = category
            .colors
            .get_mut(index)
            .ok_or(PaletteError::OutOfBounds { index, len })?;
        *slot = color;
        Ok(())
    }

    /// Remove the color at the given index of the category with the given
    /// key, returning it.
    ///
    /// # Errors
    ///
    /// In addition to the usual key and index errors, this operation refuses
    /// to remove a category's only color. Remove the category instead.
    pub fn remove_color(&mut self, key: &str, index: usize) -> Result<PaletteColor, PaletteError> {
        let category = self.category_mut(key)?;
        let len = category.colors.len();
        if len == 1 && index == 0 {
            return Err(PaletteError::LastColor);
        } else if index >= len {
            return Err(PaletteError::OutOfBounds { index, len });
        }

        Ok(category.colors.remove(index))
    }

    fn category_mut(&mut self, key: &str) -> Result<&mut ColorCategory, PaletteError> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, category)| category)
            .ok_or_else(|| PaletteError::UnknownCategory(key.to_string()))
    }

    // ----------------------------------------------------------------------------------------------------------------

    /// Parse a palette from its JSON document representation.
    ///
    /// The document must be a JSON object mapping category keys to objects
    /// with a `name` string and a `colors` sequence of `{ "hex", "lab" }`
    /// objects. Validation is all-or-nothing: a single malformed category, an
    /// empty display name, or a duplicate key rejects the entire document,
    /// and whatever palette the caller was using before remains in effect.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let palette: Self = serde_json::from_str(text)?;
        for (key, category) in &palette.entries {
            if category.name.trim().is_empty() {
                return Err(ImportError::EmptyName(key.clone()));
            }
        }

        debug!(
            categories = palette.len(),
            colors = palette.color_count(),
            "imported palette"
        );
        Ok(palette)
    }

    /// Serialize this palette to its JSON document representation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize this palette to its JSON document representation, formatted
    /// for human consumption.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// --------------------------------------------------------------------------------------------------------------------

impl Serialize for Palette {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, category) in &self.entries {
            map.serialize_entry(key, category)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PaletteVisitor;

        impl<'de> Visitor<'de> for PaletteVisitor {
            type Value = Palette;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map from category keys to color categories")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Palette, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<(String, ColorCategory)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));

                while let Some((key, category)) = access.next_entry::<String, ColorCategory>()? {
                    if entries.iter().any(|(k, _)| *k == key) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate category key {:?}",
                            key
                        )));
                    }
                    entries.push((key, category));
                }

                Ok(Palette { entries })
            }
        }

        deserializer.deserialize_map(PaletteVisitor)
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// An iterator over all colors of a palette.
///
/// The iterator yields `(key, name, color)` items in category insertion
/// order and then color insertion order, i.e., the order that decides
/// distance ties during classification. It is created by
/// [`Palette::colors`].
#[derive(Clone, Debug)]
pub struct PaletteColors<'a> {
    categories: std::slice::Iter<'a, (String, ColorCategory)>,
    current: Option<(&'a str, &'a str, std::slice::Iter<'a, PaletteColor>)>,
}

impl<'a> Iterator for PaletteColors<'a> {
    type Item = (&'a str, &'a str, &'a PaletteColor);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, name, colors)) = &mut self.current {
                if let Some(color) = colors.next() {
                    return Some((*key, *name, color));
                }
            }

            let (key, category) = self.categories.next()?;
            self.current = Some((key.as_str(), category.name.as_str(), category.colors.iter()));
        }
    }
}

// ====================================================================================================================

/// The builtin reference palette: key, display name, and colors with their
/// precomputed CIELAB coordinates.
#[rustfmt::skip]
const BUILTIN: &[(&str, &str, &[(&str, [Float; 3])])] = &[
    ("BLACK", "Black", &[
        ("#000000", [0.0, 0.0, 0.0]),
        ("#1a1a1a", [10.0, 0.0, 0.0]),
        ("#333333", [21.0, 0.0, 0.0]),
    ]),
    ("WHITE", "White", &[
        ("#FFFFFF", [100.0, 0.0, 0.0]),
        ("#F8F8F8", [97.5, 0.0, 0.0]),
        ("#F0F0F0", [94.5, 0.0, 0.0]),
    ]),
    ("GRAY", "Gray", &[
        ("#808080", [53.59, 0.0, 0.0]),
        ("#A0A0A0", [65.0, 0.0, 0.0]),
        ("#606060", [41.0, 0.0, 0.0]),
    ]),
    ("RED", "Red", &[
        ("#FF0000", [53.24, 80.09, 67.2]),
        ("#DC143C", [47.48, 68.76, 48.23]),
        ("#B22222", [38.28, 57.43, 41.91]),
    ]),
    ("PINK", "Pink", &[
        ("#FFC0CB", [83.26, 24.39, 3.76]),
        ("#FF69B4", [62.66, 62.42, -7.9]),
        ("#FFB6C1", [80.42, 28.34, 5.12]),
    ]),
    ("ORANGE", "Orange", &[
        ("#FFA500", [74.93, 23.93, 78.95]),
        ("#FF8C00", [67.54, 32.62, 76.93]),
        ("#FF7F50", [67.29, 43.97, 51.43]),
    ]),
    ("YELLOW", "Yellow", &[
        ("#FFFF00", [97.14, -21.55, 94.48]),
        ("#FFD700", [86.93, -4.88, 86.02]),
        ("#FFEB3B", [94.45, -15.69, 90.35]),
    ]),
    ("GREEN", "Green", &[
        ("#008000", [46.23, -51.7, 49.9]),
        ("#00FF00", [87.73, -86.18, 83.18]),
        ("#228B22", [50.59, -51.39, 49.9]),
    ]),
    ("BLUE", "Blue", &[
        ("#0000FF", [32.3, 79.19, -107.86]),
        ("#1E90FF", [61.11, 18.86, -60.69]),
        ("#4169E1", [53.24, 36.86, -71.55]),
    ]),
    ("PURPLE", "Purple", &[
        ("#800080", [29.78, 58.94, -36.5]),
        ("#9370DB", [59.39, 32.66, -45.68]),
        ("#8B008B", [28.57, 62.84, -40.5]),
    ]),
    ("CYAN", "Cyan", &[
        ("#00FFFF", [91.11, -48.09, -14.14]),
        ("#00CED1", [61.01, -34.89, -8.48]),
        ("#48D1CC", [73.95, -31.08, -6.71]),
    ]),
    ("BROWN", "Brown", &[
        ("#A52A2A", [36.05, 45.43, 38.15]),
        ("#8B4513", [35.64, 31.79, 28.24]),
        ("#D2691E", [49.86, 31.37, 38.61]),
    ]),
    ("GOLD", "Gold", &[
        ("#FFD700", [86.93, -4.88, 86.02]),
        ("#DAA520", [66.77, 2.86, 56.91]),
        ("#B8860B", [56.58, 6.45, 49.6]),
    ]),
    ("BEIGE", "Beige", &[
        ("#F5F5DC", [91.73, -0.96, 9.44]),
        ("#FFE4B5", [91.37, 2.23, 29.97]),
        ("#FAEBD7", [92.16, 0.21, 14.18]),
    ]),
    ("DARK_BLUE", "Dark Blue", &[
        ("#00008B", [18.43, 31.36, -56.98]),
        ("#000080", [17.73, 32.3, -79.19]),
        ("#191970", [12.92, 21.24, -50.87]),
    ]),
];

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{Palette, PaletteColor};
    use crate::core::assert_close_enough;
    use crate::error::{ImportError, PaletteError};

    #[test]
    fn test_builtin_palette() {
        let palette = Palette::builtin();
        assert_eq!(palette.len(), 15, "builtin category count");
        assert_eq!(palette.color_count(), 45, "builtin color count");

        for (key, category) in palette.categories() {
            assert!(!category.name.is_empty(), "category {} has a name", key);
            assert!(!category.colors.is_empty(), "category {} has colors", key);
        }

        // First and last of the flattened, tie-deciding order.
        let mut colors = palette.colors();
        assert_eq!(colors.next().map(|(key, _, c)| (key, c.hex.as_str())),
            Some(("BLACK", "#000000")));
        assert_eq!(colors.last().map(|(key, _, c)| (key, c.hex.as_str())),
            Some(("DARK_BLUE", "#191970")));
    }

    #[test]
    fn test_from_hex_derives_lab() -> Result<(), crate::error::ColorFormatError> {
        let color = PaletteColor::from_hex("#FF0000")?;
        assert_eq!(color.hex, "#FF0000");
        assert_close_enough!(color.lab[0], 53.2408, 0.001);
        assert_close_enough!(color.lab[1], 80.0925, 0.001);
        assert_close_enough!(color.lab[2], 67.2032, 0.001);
        Ok(())
    }

    #[test]
    fn test_category_lifecycle() -> Result<(), PaletteError> {
        let mut palette = Palette::new();
        assert!(palette.is_empty(), "new palette is empty");

        let key = palette.add_category("deep   blue")?;
        assert_eq!(key, "DEEP_BLUE");
        assert_eq!(palette.get(&key).map(|c| c.name.as_str()), Some("deep   blue"));
        assert_eq!(palette.color_count(), 1, "new category is seeded");

        assert_eq!(
            palette.add_category("Deep Blue"),
            Err(PaletteError::DuplicateCategory("DEEP_BLUE".to_string()))
        );
        assert_eq!(palette.add_category("   "), Err(PaletteError::EmptyName));

        palette.rename_category(&key, "Navy")?;
        assert_eq!(palette.get(&key).map(|c| c.name.as_str()), Some("Navy"));
        assert!(palette.contains_key(&key), "rename keeps the key stable");

        let removed = palette.remove_category(&key)?;
        assert_eq!(removed.name, "Navy");
        assert!(palette.is_empty(), "palette is empty again");
        assert_eq!(
            palette.remove_category(&key),
            Err(PaletteError::UnknownCategory("DEEP_BLUE".to_string()))
        );

        Ok(())
    }

    #[test]
    fn test_color_lifecycle() -> Result<(), PaletteError> {
        let mut palette = Palette::new();
        let key = palette.add_category("Accent")?;

        palette.add_color(&key, "#ff0080")?;
        assert_eq!(palette.get(&key).map(|c| c.colors.len()), Some(2));

        // Updating a color recomputes the cached coordinates.
        palette.update_color(&key, 0, "#000000")?;
        let updated = &palette.get(&key).expect("category exists").colors[0];
        assert_eq!(updated.hex, "#000000");
        assert_close_enough!(updated.lab[0], 0.0, 1e-6);
        assert_close_enough!(updated.lab[1], 0.0, 1e-6);
        assert_close_enough!(updated.lab[2], 0.0, 1e-6);

        assert_eq!(
            palette.update_color(&key, 7, "#123456"),
            Err(PaletteError::OutOfBounds { index: 7, len: 2 })
        );
        assert!(
            matches!(palette.add_color(&key, "#bogus0"), Err(PaletteError::BadColor(_))),
            "malformed hex is rejected"
        );

        let removed = palette.remove_color(&key, 1)?;
        assert_eq!(removed.hex, "#ff0080");
        assert_eq!(
            palette.remove_color(&key, 0),
            Err(PaletteError::LastColor)
        );

        Ok(())
    }

    #[test]
    fn test_json_round_trip() {
        let palette = Palette::builtin();
        let json = palette.to_json().expect("palette serializes");
        let restored = Palette::from_json(&json).expect("palette deserializes");
        assert_eq!(palette, restored, "round trip preserves the palette");

        let pretty = palette.to_json_pretty().expect("palette serializes");
        let restored = Palette::from_json(&pretty).expect("palette deserializes");
        assert_eq!(palette, restored, "pretty round trip preserves the palette");
    }

    #[test]
    fn test_import_preserves_order() {
        let json = r##"{
            "ZULU": { "name": "Zulu", "colors": [ { "hex": "#010101", "lab": [0.3, 0.0, 0.0] } ] },
            "ALFA": { "name": "Alfa", "colors": [ { "hex": "#020202", "lab": [0.6, 0.0, 0.0] } ] }
        }"##;

        let palette = Palette::from_json(json).expect("palette deserializes");
        let keys: Vec<&str> = palette.categories().map(|(key, _)| key).collect();
        assert_eq!(keys, ["ZULU", "ALFA"], "document order is preserved");
    }

    #[test]
    fn test_import_is_all_or_nothing() {
        let active = Palette::builtin();

        // Missing name
        let result = Palette::from_json(r##"{ "A": { "colors": [] } }"##);
        assert!(matches!(result, Err(ImportError::Malformed(_))), "missing name rejected");

        // Colors is not a sequence
        let result = Palette::from_json(r##"{ "A": { "name": "A", "colors": 3 } }"##);
        assert!(matches!(result, Err(ImportError::Malformed(_))), "non-sequence rejected");

        // Root is not an object
        let result = Palette::from_json("[1, 2, 3]");
        assert!(matches!(result, Err(ImportError::Malformed(_))), "non-object rejected");

        // Empty display name
        let result = Palette::from_json(r##"{ "A": { "name": " ", "colors": [] } }"##);
        assert!(
            matches!(result, Err(ImportError::EmptyName(key)) if key == "A"),
            "empty name rejected"
        );

        // Duplicate category key
        let result = Palette::from_json(
            r##"{ "A": { "name": "A", "colors": [] }, "A": { "name": "B", "colors": [] } }"##,
        );
        assert!(matches!(result, Err(ImportError::Malformed(_))), "duplicate key rejected");

        // The palette in use is untouched by any of the failures above.
        assert_eq!(active, Palette::builtin(), "active palette unchanged");
    }
}
