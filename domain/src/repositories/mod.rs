mod department;

pub use department::*;
