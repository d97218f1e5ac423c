pub mod pagination;

pub use pagination::normalize_pagination;
