pub(crate) mod color;
pub(crate) mod registry;
pub(crate) mod resolve;
pub(crate) mod suggest;
