#[macro_use]
mod macros;

pub mod cost;
pub mod energy;
pub mod rate;

pub use self::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate};
