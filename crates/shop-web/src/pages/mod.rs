//! Page Components

mod product;

pub use product::ProductPage;
