mod department;
pub mod primitives;

pub use department::*;
