pub(crate) mod layers;
pub(crate) mod painters;
pub(crate) mod surface;
