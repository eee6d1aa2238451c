mod color;
mod wave;

pub use color::{hsl_to_rgb, hsv_to_rgb, wrap_hue, Color};
pub use wave::{cosine, golden_phase, sine};
