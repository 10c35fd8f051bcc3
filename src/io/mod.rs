pub mod reader;
pub mod writer;

pub use reader::{load_dcel, load_polygon_mesh, read_dcel, read_polygon_mesh};
pub use writer::{dcel_to_string, write_dcel};
