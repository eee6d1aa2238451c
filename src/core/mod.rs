pub mod clock;
pub mod headless_surface;

pub use clock::Clock;
pub use headless_surface::{DrawRecord, HeadlessSurface, Pacing};
