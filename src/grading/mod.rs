pub(crate) mod curve;
pub(crate) mod wheel;
