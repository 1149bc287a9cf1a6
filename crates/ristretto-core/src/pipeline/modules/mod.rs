mod box_blur;
mod brightness;
mod crop;
mod hue;
mod rotate;
mod saturation;
mod unsharp_mask;

pub use box_blur::BoxBlur;
pub use brightness::Brightness;
pub use crop::Crop;
pub use hue::Hue;
pub use rotate::{QuarterTurn, Rotate};
pub use saturation::Saturation;
pub use unsharp_mask::UnsharpMask;
