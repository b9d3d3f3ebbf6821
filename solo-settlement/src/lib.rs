#![doc = include_str!("../../README.md")]

pub mod contact;
pub mod error;
pub mod field;
pub mod form;
pub mod link;
pub mod message;
pub mod mode;
pub mod period;
pub mod reading;
pub mod revenue;
pub mod settlement;
pub mod stay;
pub mod tariff;

pub use self::{
    contact::{GuestContact, PaymentKeyPolicy},
    error::ValidationError,
    field::Field,
    form::SettlementForm,
    message::Locale,
    mode::Mode,
    period::StayPeriod,
    reading::{MeterReading, MeterSnapshot, Metric, Readings},
    revenue::Revenue,
    settlement::{Breakdown, Settlement},
    stay::{Stay, StayStatus, TransitionError},
};
