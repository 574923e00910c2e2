use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::GenerationSettings;
use crate::error::GenerationError;
use crate::gemini::{ContentGenerator, ContentRequest};
use crate::ingredients::IngredientList;
use crate::models::Recipe;
use crate::prompt::{build_prompt, response_schema, REQUESTED_RECIPES};

/// Turns an ingredient list into recipe suggestions via a schema-constrained model call.
pub struct RecipeClient {
    generator: Arc<dyn ContentGenerator>,
    settings: GenerationSettings,
    schema: Value,
}

impl RecipeClient {
    pub fn new(generator: Arc<dyn ContentGenerator>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
            schema: response_schema(),
        }
    }

    pub async fn generate(&self, ingredients: &IngredientList) -> Result<Vec<Recipe>, GenerationError> {
        if ingredients.is_empty() {
            return Err(GenerationError::Validation);
        }

        let prompt = build_prompt(ingredients);
        info!(
            "🎯 Generating recipes for {} ingredients with {}",
            ingredients.len(),
            self.settings.model
        );

        let result = self.request(&prompt).await;

        match &result {
            Ok(recipes) => {
                if recipes.len() != REQUESTED_RECIPES {
                    warn!(
                        "⚠️ Asked for {} recipes, model returned {}",
                        REQUESTED_RECIPES,
                        recipes.len()
                    );
                }
                info!("✅ Generated {} recipes", recipes.len());
            }
            Err(e) => error!("❌ Error generating recipes: {:?}", e),
        }
        result
    }

    async fn request(&self, prompt: &str) -> Result<Vec<Recipe>, GenerationError> {
        let text = self
            .generator
            .generate_content(ContentRequest {
                prompt,
                response_schema: &self.schema,
                settings: &self.settings,
            })
            .await?;
        parse_recipes(&text)
    }
}

/// Decode the model payload. Blank text is `EmptyResponse`; anything that is
/// not an array of complete recipe objects is `Parse`.
pub fn parse_recipes(text: &str) -> Result<Vec<Recipe>, GenerationError> {
    let json = text.trim();
    if json.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    serde_json::from_str(json).map_err(GenerationError::Parse)
}
