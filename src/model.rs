pub mod bounds;
pub mod node;
pub mod options;
pub mod vector3;
