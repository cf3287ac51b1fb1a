//! User variable environment and template rendering.
//!
//! Templates are evaluated with Tera. The environment is exposed as the
//! `user` object, so a variable is looked up with `{{ user.name }}` (or
//! `{{ user["some-name"] }}` when the name is not an identifier).
//!
//! Only `{{ ... }}` is template syntax. Everything else, including `{%` and
//! `{#`, is literal text, so shell snippets like `${#VAR}` pass through.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "value";
const USER_NAMESPACE: &str = "user";

/// Tera builtins that read the process environment, the clock or an RNG.
const AMBIENT_FUNCTIONS: [&str; 3] = ["get_env", "now", "get_random"];

/// User-supplied variables, fixed for the duration of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableEnvironment(BTreeMap<String, String>);

impl VariableEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, returning the value it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a `KEY=VALUE` assignment and insert it.
    pub fn assign(&mut self, raw: &str) -> crate::Result<()> {
        let (name, value) = raw
            .split_once('=')
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| crate::Error::InvalidVariable {
                raw: raw.to_owned(),
            })?;
        self.insert(name.trim(), value);
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for VariableEnvironment {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

/// Renders template strings against a borrowed [`VariableEnvironment`].
///
/// Each call builds its own Tera instance and context, so rendering has no
/// shared state and no side effects.
#[derive(Debug, Clone, Copy)]
pub struct VariableRenderer<'a> {
    env: &'a VariableEnvironment,
}

impl<'a> VariableRenderer<'a> {
    pub fn new(env: &'a VariableEnvironment) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &'a VariableEnvironment {
        self.env
    }

    /// Evaluate `template` and return the rendered text.
    ///
    /// Looking up a variable that is not defined is an error, never an empty
    /// substitution.
    pub fn render(&self, template: &str) -> Result<String, RenderError> {
        if !has_template_syntax(template) {
            return Ok(template.to_owned());
        }

        let mut tera = Tera::default();
        disable_ambient_functions(&mut tera);
        tera.add_raw_template(TEMPLATE_NAME, &escape_literals(template))
            .map_err(|e| RenderError::Syntax {
                template: template.to_owned(),
                detail: describe(&e),
            })?;

        let mut context = Context::new();
        context.insert(USER_NAMESPACE, self.env);

        tera.render(TEMPLATE_NAME, &context)
            .map_err(|e| classify_render_error(template, &e))
    }
}

fn has_template_syntax(template: &str) -> bool {
    template.contains("{{")
}

fn disable_ambient_functions(tera: &mut Tera) {
    for name in AMBIENT_FUNCTIONS {
        tera.register_function(
            name,
            move |_: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
                Err(tera::Error::msg(format!(
                    "function `{name}` is not available in templates"
                )))
            },
        );
    }
}

/// Rewrite `template` so that Tera only interprets `{{ ... }}` expressions.
///
/// Literal text is wrapped in raw blocks. A raw block cannot contain `{%`,
/// so that pair is emitted as a string expression instead.
fn escape_literals(template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        push_literal(&mut out, &rest[..start]);
        let expr = &rest[start..];
        match expr[2..].find("}}") {
            Some(end) => {
                let len = end + 4;
                out.push_str(&expr[..len]);
                rest = &expr[len..];
            }
            None => {
                // Unterminated; let Tera report it.
                out.push_str(expr);
                return out;
            }
        }
    }
    push_literal(&mut out, rest);
    out
}

fn push_literal(out: &mut String, text: &str) {
    for (i, piece) in text.split("{%").enumerate() {
        if i > 0 {
            out.push_str(r#"{{ "{%" }}"#);
        }
        if !piece.is_empty() {
            out.push_str("{% raw %}");
            out.push_str(piece);
            out.push_str("{% endraw %}");
        }
    }
}

/// Walk the Tera error chain, dropping the wrapper messages that only name
/// the internal template.
fn messages(error: &tera::Error) -> Vec<String> {
    use std::error::Error as _;

    let mut out = vec![error.to_string()];
    let mut current = error.source();
    while let Some(err) = current {
        out.push(err.to_string());
        current = err.source();
    }
    out.retain(|msg| {
        !msg.starts_with("Failed to render") && !msg.starts_with("Failed to parse")
    });
    out
}

fn describe(error: &tera::Error) -> String {
    let msgs = messages(error);
    let joined = if msgs.is_empty() {
        error.to_string()
    } else {
        msgs.join(": ")
    };
    joined
        .replace(&format!(" while rendering '{TEMPLATE_NAME}'"), "")
        .replace(&format!("'{TEMPLATE_NAME}'"), "template")
        .trim()
        .to_owned()
}

fn classify_render_error(template: &str, error: &tera::Error) -> RenderError {
    let missing = messages(error)
        .iter()
        .find(|msg| msg.contains("not found in context"))
        .and_then(|msg| missing_variable_name(msg));

    match missing {
        Some(name) => RenderError::UndefinedVariable {
            name,
            template: template.to_owned(),
        },
        None => RenderError::Evaluation {
            template: template.to_owned(),
            detail: describe(error),
        },
    }
}

/// Extract `name` from "Variable `user.name` not found in context ...".
fn missing_variable_name(message: &str) -> Option<String> {
    let (_, rest) = message.split_once('`')?;
    let (path, _) = rest.split_once('`')?;
    let name = path
        .strip_prefix(USER_NAMESPACE)
        .and_then(|p| p.strip_prefix('.'))
        .unwrap_or(path);
    Some(name.to_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("undefined variable '{name}' in template {template:?}")]
    UndefinedVariable { name: String, template: String },

    #[error("template syntax error in {template:?}: {detail}")]
    Syntax { template: String, detail: String },

    #[error("failed to evaluate template {template:?}: {detail}")]
    Evaluation { template: String, detail: String },
}
