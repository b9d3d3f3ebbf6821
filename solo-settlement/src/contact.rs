use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    field::{Field, non_blank},
};

/// Whom the settlement message is addressed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestContact {
    pub name: String,

    /// Only used to deliver the message.
    pub phone: Option<String>,

    /// Echoed into the message when present.
    pub payment_key: Option<String>,
}

impl GuestContact {
    /// Build the contact from raw form values, blank optional values being absent.
    pub fn try_new(
        name: Option<&str>,
        phone: Option<&str>,
        payment_key: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = non_blank(name).ok_or(ValidationError::MissingField(Field::GuestName))?;
        Ok(Self {
            name: name.to_owned(),
            phone: non_blank(phone).map(str::to_owned),
            payment_key: non_blank(payment_key).map(str::to_owned),
        })
    }
}

/// Where the payment key echoed to the guest comes from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum PaymentKeyPolicy {
    /// Always the host's profile key.
    OwnerProfile,

    /// The key stored on the stay, falling back to the host's profile key.
    #[default]
    StayOverride,
}

impl PaymentKeyPolicy {
    #[must_use]
    pub fn resolve(self, stay_key: Option<&str>, owner_key: Option<&str>) -> Option<String> {
        let owner_key = non_blank(owner_key);
        match self {
            Self::OwnerProfile => owner_key,
            Self::StayOverride => non_blank(stay_key).or(owner_key),
        }
        .map(str::to_owned)
    }
}
