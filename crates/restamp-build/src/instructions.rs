use restamp_core::TypeDispatcher;

use crate::recipe::{RecipeError, RecipeGenerator, RenderedRecipe};

/// Generates a Dockerfile from raw instruction lines.
///
/// Each line is rendered as a template and emitted verbatim after `FROM`;
/// the line carries its own directive keyword.
#[derive(Debug, Clone, Copy)]
pub struct InstructionRecipe<'a> {
    instructions: &'a [String],
}

impl<'a> InstructionRecipe<'a> {
    pub fn new(instructions: &'a [String]) -> Self {
        Self { instructions }
    }
}

impl RecipeGenerator for InstructionRecipe<'_> {
    /// Stops at the first instruction that fails to render.
    fn render(
        &self,
        image_id: &str,
        dispatcher: &TypeDispatcher<'_>,
    ) -> Result<RenderedRecipe, RecipeError> {
        if image_id.is_empty() {
            return Err(RecipeError::EmptyImageId);
        }

        let rendered = self
            .instructions
            .iter()
            .enumerate()
            .map(|(index, instruction)| {
                dispatcher
                    .render(instruction)
                    .map_err(|source| RecipeError::Instruction {
                        index,
                        instruction: instruction.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut out = format!("FROM {image_id}\n");
        for line in &rendered {
            out.push_str(line);
            out.push('\n');
        }

        tracing::debug!(
            image_id,
            instructions = rendered.len(),
            "rendered instruction recipe"
        );
        Ok(RenderedRecipe::new(out))
    }
}
