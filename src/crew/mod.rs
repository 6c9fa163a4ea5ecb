pub mod crew;

pub use crew::*;
