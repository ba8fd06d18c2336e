pub mod clock;
pub mod headless;
pub mod human;

pub use clock::TickClock;
pub use headless::{HeadlessMode, HeadlessReport};
pub use human::HumanMode;
