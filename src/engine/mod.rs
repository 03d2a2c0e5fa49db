pub(crate) mod cache;
pub(crate) mod renderer;
pub(crate) mod settings;
