pub(crate) mod bounds;
pub(crate) mod math;
pub(crate) mod projection;
