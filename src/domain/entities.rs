use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// The builder caps a moodboard at this many reference images.
pub const MOODBOARD_IMAGE_LIMIT: usize = 5;

// Signed-in user as returned by the profile and login endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(rename = "isPro", default)]
    pub is_pro: bool,
    // Fields the client does not model are kept so the body round-trips as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Catalog item. Search hits carry a similarity score, detail views a description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retailer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodboardImage {
    pub id: String,
    pub url: String,
}

// User-curated, ordered collage. The first image carries the most weight in search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Moodboard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<MoodboardImage>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Moodboard {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            images: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Appends images in order until the board is full.
    ///
    /// Returns how many were actually added; the overflow is dropped.
    pub fn add_images(&mut self, images: impl IntoIterator<Item = MoodboardImage>) -> usize {
        let room = MOODBOARD_IMAGE_LIMIT.saturating_sub(self.images.len());
        let before = self.images.len();
        self.images.extend(images.into_iter().take(room));
        self.images.len() - before
    }

    pub fn remove_image(&mut self, image_id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|image| image.id != image_id);
        self.images.len() != before
    }

    /// Moves the image at `from` to position `to`, shifting the others.
    pub fn move_image(&mut self, from: usize, to: usize) -> bool {
        if from >= self.images.len() || to >= self.images.len() {
            return false;
        }
        let image = self.images.remove(from);
        self.images.insert(to, image);
        true
    }

    pub fn is_full(&self) -> bool {
        self.images.len() >= MOODBOARD_IMAGE_LIMIT
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Text,
    Image,
    Pinterest,
    Combined,
}
