mod ai;
mod health;

pub use ai::{chat, generate_image, search, vision};
pub use health::health_check;
