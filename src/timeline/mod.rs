pub(crate) mod alloc;
pub(crate) mod model;
pub(crate) mod resolver;
