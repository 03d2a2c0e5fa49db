pub(crate) mod crop;
pub(crate) mod points;
