pub(crate) mod config;
pub(crate) mod session;
pub(crate) mod sync;
