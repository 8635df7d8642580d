use serde::Deserialize;
use validator::Validate;

use crate::domain::agency_settings::AgencySettings;
use crate::domain::types::{AgencyName, ContactEmail, Percent, PhoneNumber};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Agency profile editor.
pub struct SettingsForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(equal = 3))]
    pub currency: String,
    #[validate(range(min = 0, max = 100))]
    pub deposit_percent: i32,
}

impl TryFrom<SettingsForm> for AgencySettings {
    type Error = FormError;

    fn try_from(form: SettingsForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let email = form
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(ContactEmail::new)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let phone = form
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|_| FormError::InvalidPhoneNumber)?;
        AgencySettings::try_new(
            AgencyName::new(form.name.trim()).map_err(|_| FormError::InvalidName)?,
            email,
            phone,
            &form.currency,
            Percent::new(form.deposit_percent)
                .map_err(|e| FormError::InvalidValue(e.to_string()))?,
        )
        .map_err(|e| FormError::InvalidValue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_form_to_domain() {
        let settings = AgencySettings::try_from(SettingsForm {
            name: "Viajes Sol".to_string(),
            email: Some("".to_string()),
            phone: None,
            currency: "mxn".to_string(),
            deposit_percent: 25,
        })
        .unwrap();
        assert_eq!(settings.currency, "MXN");
        assert_eq!(settings.deposit_percent.get(), 25);
        assert!(settings.email.is_none());
    }

    #[test]
    fn deposit_percent_is_bounded() {
        let result = AgencySettings::try_from(SettingsForm {
            name: "Viajes Sol".to_string(),
            email: None,
            phone: None,
            currency: "MXN".to_string(),
            deposit_percent: 120,
        });
        assert!(matches!(result, Err(FormError::Validation(_))));
    }
}
