pub mod page;
pub(crate) mod render;
