pub(crate) mod model;
pub(crate) mod overpass;
pub(crate) mod simplify;
pub(crate) mod tags;
