use restamp_core::{DispatchError, DynamicValue, ImageConfig, TypeDispatcher};

use crate::recipe::{FieldError, RecipeError, RecipeGenerator, RenderedRecipe};

/// Generates a Dockerfile from the structured `[image]` fields.
#[derive(Debug, Clone, Copy)]
pub struct StructuredRecipe<'a> {
    config: &'a ImageConfig,
}

impl<'a> StructuredRecipe<'a> {
    pub fn new(config: &'a ImageConfig) -> Self {
        Self { config }
    }
}

impl RecipeGenerator for StructuredRecipe<'_> {
    /// Every field is attempted; all failures are reported together.
    fn render(
        &self,
        image_id: &str,
        dispatcher: &TypeDispatcher<'_>,
    ) -> Result<RenderedRecipe, RecipeError> {
        if image_id.is_empty() {
            return Err(RecipeError::EmptyImageId);
        }

        let config = self.config;
        let mut out = format!("FROM {image_id}\n");
        let mut errors = Vec::new();

        if !config.volume.is_empty() {
            match dispatcher.resolve_list(&config.volume) {
                Ok(volumes) => out.push_str(&format!("VOLUME {volumes}\n")),
                Err(source) => errors.push(field_error("volume", source)),
            }
        }

        if !config.expose.is_empty() {
            out.push_str(&format!("EXPOSE {}\n", config.expose.join(" ")));
        }

        if let Some(workdir) = non_empty(&config.workdir) {
            out.push_str(&format!("WORKDIR {workdir}\n"));
        }

        if let Some(user) = non_empty(&config.user) {
            out.push_str(&format!("USER {user}\n"));
        }

        // BTreeMap iteration keeps ENV lines in key order.
        for (key, value) in &config.env {
            match dispatcher.render(value) {
                Ok(rendered) => out.push_str(&format!("ENV {key} {rendered}\n")),
                Err(source) => errors.push(field_error(
                    format!("env.{key}"),
                    DispatchError::Render {
                        index: None,
                        source,
                    },
                )),
            }
        }

        if let Some(entrypoint) =
            resolve_active(dispatcher, &config.entrypoint, "entrypoint", &mut errors)
        {
            out.push_str(&format!("ENTRYPOINT {entrypoint}\n"));
        }

        // CMD is the last directive and carries no trailing newline.
        if let Some(cmd) = resolve_active(dispatcher, &config.cmd, "cmd", &mut errors) {
            out.push_str(&format!("CMD {cmd}"));
        }

        if !errors.is_empty() {
            return Err(RecipeError::Fields { errors });
        }

        tracing::debug!(
            image_id,
            lines = out.lines().count(),
            "rendered structured recipe"
        );
        Ok(RenderedRecipe::new(out))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn resolve_active(
    dispatcher: &TypeDispatcher<'_>,
    value: &DynamicValue,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    if !value.is_active() {
        return None;
    }
    match dispatcher.resolve(value) {
        Ok(text) => Some(text),
        Err(source) => {
            errors.push(field_error(field, source));
            None
        }
    }
}

fn field_error(field: impl Into<String>, source: DispatchError) -> FieldError {
    FieldError {
        field: field.into(),
        source,
    }
}
