/// Named input of a settlement submission, used to point at the offending value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum Field {
    #[display("check-in date")]
    CheckIn,

    #[display("check-out date")]
    CheckOut,

    #[display("grid import (code 03) entry reading")]
    GridImportEntry,

    #[display("grid import (code 03) exit reading")]
    GridImportExit,

    #[display("grid export (code 103) entry reading")]
    GridExportEntry,

    #[display("grid export (code 103) exit reading")]
    GridExportExit,

    #[display("generation monitor entry reading")]
    GenerationEntry,

    #[display("generation monitor exit reading")]
    GenerationExit,

    #[display("tariff")]
    Tariff,

    #[display("guest name")]
    GuestName,
}

/// Trim the value and treat an empty one as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
