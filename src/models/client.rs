use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::client::{
    Client as DomainClient, Contact, NewClient as DomainNewClient,
    UpdateClient as DomainUpdateClient,
};
use crate::domain::occupancy::RoomCounts;
use crate::domain::types::{
    ClientId, ContactEmail, ContactName, Money, Notes, PhoneNumber, TourId, TypeConstraintError,
};
use crate::models::{count_from_db, count_to_db, roster_from_db};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub folio: String,
    pub tour_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub adults: i32,
    pub children: i32,
    pub rooms_double: i32,
    pub rooms_triple: i32,
    pub rooms_quad: i32,
    pub total: i64,
    pub paid: i64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub folio: String,
    pub tour_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub adults: i32,
    pub children: i32,
    pub rooms_double: i32,
    pub rooms_triple: i32,
    pub rooms_quad: i32,
    pub total: i64,
    pub status: &'static str,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clients)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Client`] record.
pub struct UpdateClient<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub adults: i32,
    pub children: i32,
    pub rooms_double: i32,
    pub rooms_triple: i32,
    pub rooms_quad: i32,
    pub total: i64,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

pub(crate) fn contact_from_db(
    name: String,
    email: String,
    phone: Option<String>,
) -> Result<Contact, TypeConstraintError> {
    Ok(Contact {
        name: ContactName::new(name)?,
        email: ContactEmail::new(email)?,
        phone: phone.map(PhoneNumber::new).transpose()?,
    })
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            folio: client.folio.parse()?,
            tour_id: TourId::new(client.tour_id)?,
            contact: contact_from_db(client.name, client.email, client.phone)?,
            roster: roster_from_db(client.adults, client.children)?,
            rooms: RoomCounts::new(
                count_from_db(client.rooms_double)?,
                count_from_db(client.rooms_triple)?,
                count_from_db(client.rooms_quad)?,
            ),
            total: Money::from_cents(client.total)?,
            paid: Money::from_cents(client.paid)?,
            status: client.status.parse()?,
            notes: client.notes.map(Notes::new).transpose()?,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for NewClient<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            folio: client.folio.to_string(),
            tour_id: client.tour_id.get(),
            name: client.contact.name.as_str(),
            email: client.contact.email.as_str(),
            phone: client.contact.phone.as_ref().map(PhoneNumber::as_str),
            adults: count_to_db(client.roster.adults()),
            children: count_to_db(client.roster.children()),
            rooms_double: count_to_db(client.rooms.doubles),
            rooms_triple: count_to_db(client.rooms.triples),
            rooms_quad: count_to_db(client.rooms.quads),
            total: client.total.cents(),
            status: client.status.as_str(),
            notes: client.notes.as_ref().map(Notes::as_str),
        }
    }
}

impl<'a> UpdateClient<'a> {
    pub fn new(client: &'a DomainUpdateClient, updated_at: NaiveDateTime) -> Self {
        Self {
            name: client.contact.name.as_str(),
            email: client.contact.email.as_str(),
            phone: client.contact.phone.as_ref().map(PhoneNumber::as_str),
            adults: count_to_db(client.roster.adults()),
            children: count_to_db(client.roster.children()),
            rooms_double: count_to_db(client.rooms.doubles),
            rooms_triple: count_to_db(client.rooms.triples),
            rooms_quad: count_to_db(client.rooms.quads),
            total: client.total.cents(),
            notes: client.notes.as_ref().map(Notes::as_str),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::occupancy::Roster;
    use crate::domain::types::{BookingStatus, Folio};
    use chrono::Utc;

    fn db_client() -> Client {
        let now: NaiveDateTime = Utc::now().naive_utc();
        Client {
            id: 1,
            folio: "67e55044-10b1-426f-9247-bb680e5fe0c8".to_string(),
            tour_id: 2,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: None,
            adults: 2,
            children: 1,
            rooms_double: 0,
            rooms_triple: 1,
            rooms_quad: 0,
            total: 1_200_000,
            paid: 300_000,
            status: "confirmed".to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn client_into_domain() {
        let domain = DomainClient::try_from(db_client()).expect("valid client");
        assert_eq!(domain.id.get(), 1);
        assert_eq!(domain.roster, Roster::new(2, 1).unwrap());
        assert_eq!(domain.rooms, RoomCounts::new(0, 1, 0));
        assert_eq!(domain.status, BookingStatus::Confirmed);
        assert_eq!(domain.balance().cents(), 900_000);
    }

    #[test]
    fn corrupt_rows_are_rejected() {
        let mut client = db_client();
        client.status = "lost".to_string();
        assert_eq!(
            DomainClient::try_from(client),
            Err(TypeConstraintError::UnknownStatus("lost".to_string()))
        );

        let mut client = db_client();
        client.adults = 0;
        assert!(DomainClient::try_from(client).is_err());
    }

    #[test]
    fn from_domain_new_creates_newclient() {
        let domain = DomainNewClient {
            tour_id: TourId::new(5).unwrap(),
            folio: Folio::new(),
            contact: Contact {
                name: ContactName::new("Luis").unwrap(),
                email: ContactEmail::new("LUIS@example.com").unwrap(),
                phone: None,
            },
            roster: Roster::new(3, 0).unwrap(),
            rooms: RoomCounts::new(0, 1, 0),
            total: Money::from_cents(1_350_000).unwrap(),
            status: BookingStatus::Pending,
            notes: None,
            seats: Vec::new(),
            extras: Vec::new(),
        };
        let row: NewClient = (&domain).into();
        assert_eq!(row.folio, domain.folio.to_string());
        assert_eq!(row.email, "luis@example.com");
        assert_eq!(row.adults, 3);
        assert_eq!(row.rooms_triple, 1);
        assert_eq!(row.status, "pending");
    }
}
