pub(crate) mod engine;
pub(crate) mod force;
pub(crate) mod style;
