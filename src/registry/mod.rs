mod load;
mod model;
mod parse;

pub use load::load_registry;
pub use model::{Category, ContentLink, POSTS_CATEGORY_KEY, POSTS_CATEGORY_NAME, Post, Registry, Section};
