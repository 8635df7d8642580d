use diesel::prelude::*;

use crate::domain::provider::{NewProvider as DomainNewProvider, Provider as DomainProvider};
use crate::domain::types::{Money, ProviderId, ProviderName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::providers)]
pub struct Provider {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_per_person: i64,
    pub active: bool,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::providers)]
#[diesel(treat_none_as_null = true)]
pub struct NewProvider<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_per_person: i64,
    pub active: bool,
}

/// Link between a reservation and a selected add-on.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::client_providers)]
pub struct ClientProvider {
    pub client_id: i32,
    pub provider_id: i32,
}

impl TryFrom<Provider> for DomainProvider {
    type Error = TypeConstraintError;

    fn try_from(provider: Provider) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProviderId::new(provider.id)?,
            name: ProviderName::new(provider.name)?,
            description: provider.description,
            price_per_person: Money::from_cents(provider.price_per_person)?,
            active: provider.active,
        })
    }
}

impl<'a> From<&'a DomainNewProvider> for NewProvider<'a> {
    fn from(provider: &'a DomainNewProvider) -> Self {
        Self {
            name: provider.name.as_str(),
            description: provider.description.as_deref(),
            price_per_person: provider.price_per_person.cents(),
            active: provider.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_round_trip() {
        let domain = DomainNewProvider::new(
            ProviderName::new("Guided visit").unwrap(),
            Some(" <script>x</script>Museum ".to_string()),
            Money::from_cents(15_000).unwrap(),
            true,
        );
        let row: NewProvider = (&domain).into();
        assert_eq!(row.description, Some("Museum"));
        assert_eq!(row.price_per_person, 15_000);

        let stored = Provider {
            id: 4,
            name: row.name.to_string(),
            description: row.description.map(str::to_string),
            price_per_person: row.price_per_person,
            active: row.active,
        };
        let provider = DomainProvider::try_from(stored).unwrap();
        assert_eq!(provider.as_extra().price_per_person.cents(), 15_000);
    }
}
