//! Hierarchical notes: model, repository contract and tree rendering.

pub mod model;
pub mod repository;
pub mod tree;

pub use model::{Note, TitleMatch};
pub use repository::NoteRepository;
pub use tree::{description_preview, render_tree};
