pub mod entities;
pub mod routing;
pub mod value_objects;
