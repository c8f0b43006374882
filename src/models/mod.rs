/// Module grids (working matrix and packed output)
pub mod matrix;
/// Version, EC level and mask pattern
pub mod qr_code;
/// Finished symbol
pub mod symbol;

pub use matrix::{BitMatrix, Module, ModuleMatrix};
pub use qr_code::{ECLevel, MaskPattern, Version};
pub use symbol::Symbol;
