pub(crate) mod entities;
pub(crate) mod rooms;
pub(crate) mod snapshot;
