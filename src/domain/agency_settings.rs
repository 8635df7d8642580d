//! Agency-wide profile used by the public site and deposit calculation.

use serde::Serialize;

use crate::domain::types::{AgencyName, ContactEmail, Percent, PhoneNumber, TypeConstraintError};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AgencySettings {
    pub name: AgencyName,
    pub email: Option<ContactEmail>,
    pub phone: Option<PhoneNumber>,
    /// ISO 4217 code shown next to prices.
    pub currency: String,
    /// Share of the total required to hold a reservation.
    pub deposit_percent: Percent,
}

impl AgencySettings {
    pub fn try_new(
        name: AgencyName,
        email: Option<ContactEmail>,
        phone: Option<PhoneNumber>,
        currency: &str,
        deposit_percent: Percent,
    ) -> Result<Self, TypeConstraintError> {
        let currency = currency.trim().to_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(TypeConstraintError::InvalidValue(format!(
                "currency code {currency}"
            )));
        }
        Ok(Self {
            name,
            email,
            phone,
            currency,
            deposit_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_is_normalized() {
        let settings = AgencySettings::try_new(
            AgencyName::new("Viajes").unwrap(),
            None,
            None,
            " usd ",
            Percent::new(20).unwrap(),
        )
        .unwrap();
        assert_eq!(settings.currency, "USD");
        assert!(
            AgencySettings::try_new(
                AgencyName::new("Viajes").unwrap(),
                None,
                None,
                "dollars",
                Percent::new(20).unwrap(),
            )
            .is_err()
        );
    }
}
