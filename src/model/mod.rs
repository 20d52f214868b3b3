pub(crate) mod clip;
pub(crate) mod color;
pub(crate) mod timeline;
pub(crate) mod transform;
