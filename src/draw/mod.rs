pub(crate) mod icons;
pub(crate) mod lines;
pub(crate) mod shapes;
