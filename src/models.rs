use reqwest::Url;
use serde::{Deserialize, Serialize};

const PREVIEW_IMAGE_BASE: &str = "https://picsum.photos/seed/";

/// One suggestion as returned by the model. Field names follow the response
/// schema, so this type decodes the model payload directly.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Recipe {
    #[serde(rename = "recipeName")]
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Placeholder photo seeded by the recipe name.
    pub fn image_url(&self) -> Option<String> {
        let mut url = Url::parse(PREVIEW_IMAGE_BASE).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend([self.name.as_str(), "600", "400"]);
        Some(url.into())
    }
}

/// Recipe as handed to the presentation layer.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCard {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub image_url: Option<String>,
}

impl From<&Recipe> for RecipeCard {
    fn from(recipe: &Recipe) -> Self {
        Self {
            image_url: recipe.image_url(),
            recipe: recipe.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AddIngredientRequest {
    pub name: String,
}
