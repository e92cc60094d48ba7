// Request/response bodies for the JSON API and Askama prompt templates.
// All types are re-exported: `use slidedesk::templates_structs::*`

pub mod api;
pub mod prompts;

pub use api::*;
pub use prompts::*;
