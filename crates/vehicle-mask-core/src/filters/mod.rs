pub mod gaussian_blur;
pub mod grayscale;
pub mod median;
