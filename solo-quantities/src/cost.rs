quantity!(
    /// Amount of money in the host's currency (Brazilian real).
    Cost, via: f64, suffix: "BRL", precision: 2
);

impl Cost {
    pub const ONE_CENT: Self = Self(0.01);
}
