use serde::Serialize;

use crate::domain::pricing::Extra;
use crate::domain::types::{Money, ProviderId, ProviderName};

/// Add-on service (guided visit, insurance, tickets) sold with a tour.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Provider {
    pub id: ProviderId,
    pub name: ProviderName,
    pub description: Option<String>,
    pub price_per_person: Money,
    pub active: bool,
}

impl Provider {
    pub fn as_extra(&self) -> Extra {
        Extra {
            name: self.name.as_str().to_string(),
            price_per_person: self.price_per_person,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProvider {
    pub name: ProviderName,
    pub description: Option<String>,
    pub price_per_person: Money,
    pub active: bool,
}

impl NewProvider {
    pub fn new(
        name: ProviderName,
        description: Option<String>,
        price_per_person: Money,
        active: bool,
    ) -> Self {
        Self {
            name,
            description: description
                .map(|s| ammonia::clean(s.trim()))
                .filter(|s| !s.is_empty()),
            price_per_person,
            active,
        }
    }
}
