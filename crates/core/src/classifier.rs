//! Keyword classifier: free text to a primitive shape and palette color.
//!
//! Both lookups are first-match-wins over an ordered table, so the order of
//! [`SHAPE_KEYWORDS`] and [`COLOR_KEYWORDS`] is part of the contract. An
//! entry that can never win (e.g. `sports car`, shadowed by `car`) is kept so
//! the table stays identical to the one the studio has always shipped.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

/// Built-in parametric shapes a descriptor can fall back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Box,
    Sphere,
    Torus,
    Cylinder,
}

impl Shape {
    /// All shapes, in declaration order.
    pub const ALL: [Shape; 4] = [Shape::Box, Shape::Sphere, Shape::Torus, Shape::Cylinder];

    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::Sphere => "sphere",
            Shape::Torus => "torus",
            Shape::Cylinder => "cylinder",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape used when no keyword matches.
pub const DEFAULT_SHAPE: Shape = Shape::Sphere;

/// Color used when no keyword matches.
pub const DEFAULT_COLOR: &str = "#1976D2";

/// Ordered `keyword -> shape` table.
pub const SHAPE_KEYWORDS: &[(&str, Shape)] = &[
    // Animals
    ("cat", Shape::Sphere),
    ("dog", Shape::Box),
    ("animal", Shape::Sphere),
    // Vehicles
    ("car", Shape::Box),
    ("sports car", Shape::Box),
    ("vehicle", Shape::Box),
    ("truck", Shape::Box),
    ("spaceship", Shape::Cylinder),
    // Furniture
    ("chair", Shape::Box),
    ("table", Shape::Box),
    ("desk", Shape::Box),
    ("furniture", Shape::Box),
    // Nature
    ("tree", Shape::Cylinder),
    ("plant", Shape::Cylinder),
    ("mountain", Shape::Cylinder),
    ("rock", Shape::Torus),
    // Buildings
    ("house", Shape::Box),
    ("building", Shape::Box),
    ("castle", Shape::Cylinder),
    ("tower", Shape::Cylinder),
    // Geometric hints
    ("ball", Shape::Sphere),
    ("planet", Shape::Sphere),
    ("round", Shape::Sphere),
    ("sphere", Shape::Sphere),
    ("donut", Shape::Torus),
    ("ring", Shape::Torus),
    ("wheel", Shape::Torus),
    ("column", Shape::Cylinder),
];

/// Ordered `keyword -> color` table.
pub const COLOR_KEYWORDS: &[(&str, &str)] = &[
    ("red", "#E53935"),
    ("blue", "#1E88E5"),
    ("green", "#43A047"),
    ("yellow", "#FDD835"),
    ("purple", "#8E24AA"),
    ("pink", "#D81B60"),
    ("orange", "#FB8C00"),
    ("black", "#212121"),
    ("white", "#FAFAFA"),
    ("grey", "#757575"),
    ("gold", "#FFD700"),
    ("silver", "#C0C0C0"),
];

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Shape and color chosen for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub shape: Shape,
    pub color: String,
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            shape: DEFAULT_SHAPE,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Classify free text by keyword.
///
/// Shape and color are looked up independently; each takes the first table
/// entry whose keyword occurs anywhere in the lowercased input.
pub fn classify(text: &str) -> Classification {
    let normalized = text.to_lowercase();

    let shape = first_match(&normalized, SHAPE_KEYWORDS).unwrap_or(DEFAULT_SHAPE);
    let color = first_match(&normalized, COLOR_KEYWORDS).unwrap_or(DEFAULT_COLOR);

    Classification {
        shape,
        color: color.to_string(),
    }
}

fn first_match<T: Copy>(haystack: &str, table: &[(&str, T)]) -> Option<T> {
    table
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map(|&(_, value)| value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
