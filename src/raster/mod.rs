pub(crate) mod composite;
pub(crate) mod layer;
pub(crate) mod pixel_runs;
