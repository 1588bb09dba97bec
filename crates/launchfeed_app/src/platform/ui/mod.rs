pub mod layout;
pub mod render;
mod viewport;
