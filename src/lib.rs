//! Reads planar meshes from text files (polygon lists or doubly-connected edge
//! lists), checks them as planar subdivisions and renders them to PNG images.

pub mod config;
pub mod error;
pub mod io;
pub mod mesh;
pub mod plot;
pub mod render;
pub mod utils;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{MeshError, Result};
pub use mesh::dcel::DCEL;
pub use mesh::polygon::PolygonMesh;
