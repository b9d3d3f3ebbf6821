quantity!(
    /// Price of one kilowatt-hour.
    KilowattHourRate, via: f64, suffix: "BRL/kWh", precision: 2
);
