pub(crate) mod machine;
pub(crate) mod status;
pub(crate) mod text;
