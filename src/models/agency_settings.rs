use diesel::prelude::*;

use crate::domain::agency_settings::AgencySettings as DomainAgencySettings;
use crate::domain::types::{
    AgencyName, ContactEmail, Percent, PhoneNumber, TypeConstraintError,
};

/// The settings table holds a single row with this id.
pub const SETTINGS_ROW_ID: i32 = 1;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::agency_settings)]
pub struct AgencySettings {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub currency: String,
    pub deposit_percent: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::agency_settings)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateAgencySettings<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub currency: &'a str,
    pub deposit_percent: i32,
}

impl TryFrom<AgencySettings> for DomainAgencySettings {
    type Error = TypeConstraintError;

    fn try_from(settings: AgencySettings) -> Result<Self, Self::Error> {
        DomainAgencySettings::try_new(
            AgencyName::new(settings.name)?,
            settings.email.map(ContactEmail::new).transpose()?,
            settings.phone.map(PhoneNumber::new).transpose()?,
            &settings.currency,
            Percent::new(settings.deposit_percent)?,
        )
    }
}

impl<'a> From<&'a DomainAgencySettings> for UpdateAgencySettings<'a> {
    fn from(settings: &'a DomainAgencySettings) -> Self {
        Self {
            name: settings.name.as_str(),
            email: settings.email.as_ref().map(ContactEmail::as_str),
            phone: settings.phone.as_ref().map(PhoneNumber::as_str),
            currency: &settings.currency,
            deposit_percent: i32::from(settings.deposit_percent.get()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_into_domain() {
        let row = AgencySettings {
            id: SETTINGS_ROW_ID,
            name: "Travel Agency".to_string(),
            email: None,
            phone: None,
            currency: "MXN".to_string(),
            deposit_percent: 30,
        };
        let settings = DomainAgencySettings::try_from(row).unwrap();
        assert_eq!(settings.deposit_percent.get(), 30);

        let update: UpdateAgencySettings = (&settings).into();
        assert_eq!(update.currency, "MXN");
        assert_eq!(update.deposit_percent, 30);
    }
}
