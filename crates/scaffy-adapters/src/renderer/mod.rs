//! Template renderer adapters.

mod template_manager;

pub use template_manager::{TemplateData, TemplateManager};
