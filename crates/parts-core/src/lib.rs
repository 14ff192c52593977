pub mod assemble;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod fallback;
pub mod interaction;
pub mod material;
pub mod mesh;
pub mod persist;
pub mod scene;
pub mod snap;
pub mod state;
pub mod viewer;

pub use assemble::*;
pub use catalog::*;
pub use constants::*;
pub use error::*;
pub use material::*;
pub use mesh::*;
pub use persist::*;
pub use scene::*;
pub use snap::*;
pub use state::*;

// Shaders bundled as string constants
pub static MESH_WGSL: &str = include_str!("../shaders/mesh.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
