use crate::domain::agency_settings::AgencySettings;

#[derive(Debug)]
pub struct SettingsPageData {
    pub settings: AgencySettings,
}
