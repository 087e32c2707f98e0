pub mod constants;

pub use constants::{DEGRAD, PI2, RADDEG};
