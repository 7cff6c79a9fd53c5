//! Records exchanged with the backend
//!
//! The backend owns these schemas. Fields are optional or defaulted so partial
//! records still deserialize, and an explicit `null` reads the same as a
//! missing field. Only the user id is required, since every user-scoped
//! request is routed on it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Image used by the "Add demo" action
pub const DEMO_IMAGE_URL: &str = "https://images.unsplash.com/photo-1520975916090-3105956dac38?q=80&w=1200&auto=format&fit=crop";

/// Treat an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub style_preferences: Vec<String>,
}

/// Payload for `POST /users`; the backend creates or updates by email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub style_preferences: Vec<String>,
}

impl NewUser {
    /// Seed identity so the dashboard works without auth wiring
    pub fn demo() -> Self {
        Self {
            email: "demo@stylesage.ai".to_string(),
            name: "Demo User".to_string(),
            height_cm: 180.0,
            weight_kg: 75.0,
            style_preferences: vec!["classic".to_string(), "minimalist".to_string()],
        }
    }
}

/// A garment the backend extracted from a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardrobeItem {
    /// Backend id; nothing on the client keys on it
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub specific_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
}

/// One piece of a recommended outfit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutfitItem {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub specific_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Outfit suggestion; held exactly as returned, including unknown fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub outfit_name: Option<String>,
    #[serde(default)]
    pub justification: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<OutfitItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_favorite: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for `POST /wardrobe/analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub user_id: String,
    pub image_url: String,
}

/// Body for `POST /recommendations`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub user_id: String,
    pub occasion: String,
    pub weather: String,
}

/// Body shape categories understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    #[default]
    Rectangle,
    Triangle,
    InvertedTriangle,
    Hourglass,
    Oval,
}

impl BodyType {
    pub const ALL: [BodyType; 5] = [
        BodyType::Rectangle,
        BodyType::Triangle,
        BodyType::InvertedTriangle,
        BodyType::Hourglass,
        BodyType::Oval,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Rectangle => "rectangle",
            BodyType::Triangle => "triangle",
            BodyType::InvertedTriangle => "inverted_triangle",
            BodyType::Hourglass => "hourglass",
            BodyType::Oval => "oval",
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        BodyType::ALL
            .into_iter()
            .find(|b| b.as_str() == normalized)
            .ok_or_else(|| format!("Unknown body type: {}", s))
    }
}

/// Inputs for a recommendation that ignores the wardrobe.
///
/// Serializes directly as the `POST /recommendations/without-wardrobe` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub body_type: BodyType,
    pub style_choice: String,
}

impl Default for BodyProfile {
    fn default() -> Self {
        Self {
            height_cm: 180.0,
            weight_kg: 75.0,
            body_type: BodyType::Rectangle,
            style_choice: "classic".to_string(),
        }
    }
}

/// Category chips offered by the dashboard. `All` is the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Upper,
    TShirt,
    Shirt,
    Jacket,
    Outerwear,
    Dress,
    Pants,
    Jeans,
    Skirt,
    Shorts,
    Shoes,
    Accessory,
}

impl CategoryFilter {
    /// Chip order as shown in the dashboard
    pub const ALL: [CategoryFilter; 13] = [
        CategoryFilter::All,
        CategoryFilter::Upper,
        CategoryFilter::TShirt,
        CategoryFilter::Shirt,
        CategoryFilter::Jacket,
        CategoryFilter::Outerwear,
        CategoryFilter::Dress,
        CategoryFilter::Pants,
        CategoryFilter::Jeans,
        CategoryFilter::Skirt,
        CategoryFilter::Shorts,
        CategoryFilter::Shoes,
        CategoryFilter::Accessory,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Upper => "upper",
            CategoryFilter::TShirt => "t-shirt",
            CategoryFilter::Shirt => "shirt",
            CategoryFilter::Jacket => "jacket",
            CategoryFilter::Outerwear => "outerwear",
            CategoryFilter::Dress => "dress",
            CategoryFilter::Pants => "pants",
            CategoryFilter::Jeans => "jeans",
            CategoryFilter::Skirt => "skirt",
            CategoryFilter::Shorts => "shorts",
            CategoryFilter::Shoes => "shoes",
            CategoryFilter::Accessory => "accessory",
        }
    }

    /// Case-insensitive category match; `All` matches every item.
    pub fn matches(&self, item: &WardrobeItem) -> bool {
        match self {
            CategoryFilter::All => true,
            tag => item
                .category
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                == tag.tag(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CategoryFilter::ALL
            .into_iter()
            .find(|c| c.tag() == wanted)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}
