pub mod lighthouse;
pub mod pinata;
