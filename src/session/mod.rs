pub mod avatar;
pub mod batch;
pub mod model;
