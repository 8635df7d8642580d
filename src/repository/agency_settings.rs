use diesel::prelude::*;

use crate::domain::agency_settings::AgencySettings;
use crate::models::agency_settings::{
    AgencySettings as DbAgencySettings, SETTINGS_ROW_ID, UpdateAgencySettings,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, SettingsReader, SettingsWriter};
use crate::schema::agency_settings;

impl SettingsReader for DieselRepository {
    fn get_agency_settings(&self) -> RepositoryResult<AgencySettings> {
        let mut conn = self.conn()?;
        let settings = agency_settings::table
            .find(SETTINGS_ROW_ID)
            .first::<DbAgencySettings>(&mut conn)?;

        Ok(settings.try_into()?)
    }
}

impl SettingsWriter for DieselRepository {
    fn save_agency_settings(&self, settings: &AgencySettings) -> RepositoryResult<AgencySettings> {
        let mut conn = self.conn()?;
        let saved = diesel::update(agency_settings::table.find(SETTINGS_ROW_ID))
            .set(UpdateAgencySettings::from(settings))
            .get_result::<DbAgencySettings>(&mut conn)?;

        Ok(saved.try_into()?)
    }
}
