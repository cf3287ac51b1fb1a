use std::fmt;

use restamp_core::{DispatchError, RenderError, RestampConfig, TypeDispatcher};

use crate::instructions::InstructionRecipe;
use crate::structured::StructuredRecipe;

/// Finished Dockerfile text, ready to be piped into `docker build`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRecipe(String);

impl RenderedRecipe {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Produces recipe text on top of a base image.
pub trait RecipeGenerator {
    fn render(
        &self,
        image_id: &str,
        dispatcher: &TypeDispatcher<'_>,
    ) -> Result<RenderedRecipe, RecipeError>;
}

/// The strategy selected by a configuration.
#[derive(Debug, Clone, Copy)]
pub enum RecipeSource<'a> {
    Structured(StructuredRecipe<'a>),
    Instructions(InstructionRecipe<'a>),
}

impl<'a> RecipeSource<'a> {
    /// Raw instructions win when present; `RestampConfig::validate` rejects
    /// configurations that also set structured fields.
    pub fn from_config(config: &'a RestampConfig) -> Self {
        match &config.instructions {
            Some(lines) => Self::Instructions(InstructionRecipe::new(lines)),
            None => Self::Structured(StructuredRecipe::new(&config.image)),
        }
    }
}

impl RecipeGenerator for RecipeSource<'_> {
    fn render(
        &self,
        image_id: &str,
        dispatcher: &TypeDispatcher<'_>,
    ) -> Result<RenderedRecipe, RecipeError> {
        match self {
            Self::Structured(recipe) => recipe.render(image_id, dispatcher),
            Self::Instructions(recipe) => recipe.render(image_id, dispatcher),
        }
    }
}

/// A single structured field that failed to render.
#[derive(Debug, thiserror::Error)]
#[error("{field}: {source}")]
pub struct FieldError {
    pub field: String,
    pub source: DispatchError,
}

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("cannot render recipe: base image id is empty")]
    EmptyImageId,

    #[error(
        "failed to render recipe fields:\n{}",
        errors.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n")
    )]
    Fields { errors: Vec<FieldError> },

    #[error("failed to render instruction {index} ({instruction:?}): {source}")]
    Instruction {
        index: usize,
        instruction: String,
        source: RenderError,
    },
}

impl RecipeError {
    /// Names of the failing fields, in emission order.
    pub fn failed_fields(&self) -> Vec<&str> {
        match self {
            Self::Fields { errors } => errors.iter().map(|e| e.field.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}
