//! Dockerfile recipe generation for restamp.
//!
//! # Strategies
//!
//! ```text
//! RestampConfig
//!   ├─ [image] fields   ── StructuredRecipe   (one directive per active field)
//!   └─ instructions     ── InstructionRecipe  (rendered lines, verbatim)
//! ```
//!
//! Both start with `FROM <image id>` and implement [`RecipeGenerator`];
//! [`RecipeSource`] picks one from the loaded configuration.
//!
//! # Structured directive order
//!
//! `FROM`, `VOLUME`, `EXPOSE`, `WORKDIR`, `USER`, `ENV` (sorted by key),
//! `ENTRYPOINT`, `CMD`. Unset fields emit nothing.

pub mod instructions;
pub mod recipe;
pub mod structured;

pub use instructions::InstructionRecipe;
pub use recipe::{FieldError, RecipeError, RecipeGenerator, RecipeSource, RenderedRecipe};
pub use structured::StructuredRecipe;
