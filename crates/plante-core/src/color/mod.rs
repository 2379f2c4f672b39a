pub mod hsv;

pub use hsv::{rgb_to_hsv, HsvRange};
