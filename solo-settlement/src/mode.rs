use serde::{Deserialize, Serialize};

/// Which settlement model applies, determined by the meters that were read.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Grid import and export only: the net solar export is billed as if consumed on site.
    #[display("simple")]
    Simple,

    /// Grid import, export, and an independent generation monitor:
    /// only self-consumption and grid draw are billed.
    #[display("monitoring")]
    Monitoring,
}
