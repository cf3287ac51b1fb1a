use serde::Deserialize;

use crate::template::{RenderError, VariableEnvironment, VariableRenderer};

/// A configuration value that may be omitted, a single string, or a list of
/// strings (e.g. `cmd = "echo hi"` vs `cmd = ["echo", "hi"]`).
///
/// Any other shape is rejected while decoding with [`UnsupportedType`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum DynamicValue {
    #[default]
    Absent,
    Single(String),
    List(Vec<String>),
}

impl DynamicValue {
    /// Whether this value should produce a directive.
    ///
    /// An empty string or an empty list counts as unset.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Single(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
        }
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for DynamicValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl<const N: usize> From<[&str; N]> for DynamicValue {
    fn from(value: [&str; N]) -> Self {
        Self::List(value.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl TryFrom<serde_json::Value> for DynamicValue {
    type Error = UnsupportedType;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(Self::Absent),
            Value::String(s) => Ok(Self::Single(s)),
            Value::Array(items) => {
                let mut strings = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    match item {
                        Value::String(s) => strings.push(s.clone()),
                        other => {
                            return Err(UnsupportedType {
                                value: other.to_string(),
                                position: Some(index),
                            });
                        }
                    }
                }
                Ok(Self::List(strings))
            }
            other => Err(UnsupportedType {
                value: other.to_string(),
                position: None,
            }),
        }
    }
}

/// A configuration value that is neither a string nor a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: not a string or a list of strings", describe_position(value, *position))]
pub struct UnsupportedType {
    pub value: String,
    /// Index of the offending element when the value was a list.
    pub position: Option<usize>,
}

fn describe_position(value: &str, position: Option<usize>) -> String {
    match position {
        Some(index) => format!("unsupported list element {value} at index {index}"),
        None => format!("unsupported value {value}"),
    }
}

/// Resolves [`DynamicValue`]s into rendered recipe text.
///
/// Single strings are rendered as-is; lists are rendered element by element
/// and serialized as a JSON array of strings (`["a","b"]`).
#[derive(Debug, Clone, Copy)]
pub struct TypeDispatcher<'a> {
    renderer: VariableRenderer<'a>,
}

impl<'a> TypeDispatcher<'a> {
    pub fn new(env: &'a VariableEnvironment) -> Self {
        Self {
            renderer: VariableRenderer::new(env),
        }
    }

    pub fn renderer(&self) -> VariableRenderer<'a> {
        self.renderer
    }

    /// Render a single template string.
    pub fn render(&self, template: &str) -> Result<String, RenderError> {
        self.renderer.render(template)
    }

    pub fn resolve(&self, value: &DynamicValue) -> Result<String, DispatchError> {
        match value {
            DynamicValue::Absent => Ok(String::new()),
            DynamicValue::Single(template) => self
                .renderer
                .render(template)
                .map_err(|source| DispatchError::Render {
                    index: None,
                    source,
                }),
            DynamicValue::List(items) => self.resolve_list(items),
        }
    }

    /// Render each element and serialize the result as a JSON array.
    pub fn resolve_list(&self, items: &[String]) -> Result<String, DispatchError> {
        let rendered = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.renderer
                    .render(item)
                    .map_err(|source| DispatchError::Render {
                        index: Some(index),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        serde_json::to_string(&rendered).map_err(|source| DispatchError::Serialize { source })
    }
}

fn element_prefix(index: Option<usize>) -> String {
    index.map(|i| format!("element {i}: ")).unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{}{source}", element_prefix(*index))]
    Render {
        index: Option<usize>,
        source: RenderError,
    },

    #[error("failed to serialize rendered list")]
    Serialize { source: serde_json::Error },
}
