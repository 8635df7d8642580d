use diesel::prelude::*;

use crate::domain::provider::{NewProvider, Provider};
use crate::domain::types::ProviderId;
use crate::models::provider::{NewProvider as DbNewProvider, Provider as DbProvider};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProviderReader, ProviderWriter};
use crate::schema::providers;

fn into_domain(rows: Vec<DbProvider>) -> RepositoryResult<Vec<Provider>> {
    Ok(rows
        .into_iter()
        .map(Provider::try_from)
        .collect::<Result<Vec<_>, _>>()?)
}

impl ProviderReader for DieselRepository {
    fn get_provider_by_id(&self, id: ProviderId) -> RepositoryResult<Option<Provider>> {
        let mut conn = self.conn()?;
        let provider = providers::table
            .find(id.get())
            .first::<DbProvider>(&mut conn)
            .optional()?;

        Ok(provider.map(Provider::try_from).transpose()?)
    }

    fn list_providers(&self, active_only: bool) -> RepositoryResult<Vec<Provider>> {
        let mut conn = self.conn()?;
        let mut query = providers::table.order(providers::name.asc()).into_boxed();
        if active_only {
            query = query.filter(providers::active.eq(true));
        }
        into_domain(query.load::<DbProvider>(&mut conn)?)
    }

    fn list_providers_by_ids(&self, ids: &[ProviderId]) -> RepositoryResult<Vec<Provider>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.conn()?;
        let ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();
        let rows = providers::table
            .filter(providers::id.eq_any(ids))
            .order(providers::id.asc())
            .load::<DbProvider>(&mut conn)?;
        into_domain(rows)
    }
}

impl ProviderWriter for DieselRepository {
    fn create_provider(&self, new_provider: &NewProvider) -> RepositoryResult<Provider> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(providers::table)
            .values(DbNewProvider::from(new_provider))
            .get_result::<DbProvider>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_provider(
        &self,
        id: ProviderId,
        provider: &NewProvider,
    ) -> RepositoryResult<Provider> {
        let mut conn = self.conn()?;
        let updated = diesel::update(providers::table.find(id.get()))
            .set(DbNewProvider::from(provider))
            .get_result::<DbProvider>(&mut conn)?;

        Ok(updated.try_into()?)
    }
}
