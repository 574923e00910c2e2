//! Prompt template and response schema for recipe generation.

use serde_json::{json, Value};

use crate::ingredients::IngredientList;

/// Number of recipes the prompt asks for. Not enforced on the response.
pub const REQUESTED_RECIPES: usize = 3;

/// Pantry items the model may assume without the user listing them.
pub const BASIC_STAPLES: [&str; 4] = ["salt", "pepper", "oil", "water"];

pub fn build_prompt(ingredients: &IngredientList) -> String {
    let available = ingredients.iter().collect::<Vec<_>>().join(", ");
    format!(
        "You are a creative and experienced chef. Using the ingredients below, create {REQUESTED_RECIPES} distinct and delicious recipes. \
        Assume the cook already has basic staples such as {staples}; they do not need to be listed as available. \
        For each recipe give a catchy name, the complete list of required ingredients (the available ones plus any staples used) \
        with quantities and servings, and clear step-by-step instructions.\n\n\
        Available ingredients: {available}",
        staples = BASIC_STAPLES.join(", "),
    )
}

/// Schema for one recipe object, in the Gemini `responseSchema` dialect.
pub fn recipe_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipeName": {
                "type": "STRING",
                "description": "The name of the recipe."
            },
            "ingredients": {
                "type": "ARRAY",
                "description": "A list of all ingredients needed for the recipe, including quantities and number of servings per person or container.",
                "items": { "type": "STRING" }
            },
            "instructions": {
                "type": "ARRAY",
                "description": "Step-by-step instructions to prepare the dish.",
                "items": { "type": "STRING" }
            }
        },
        "required": ["recipeName", "ingredients", "instructions"]
    })
}

pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "description": "A list of three unique recipes.",
        "items": recipe_schema()
    })
}
