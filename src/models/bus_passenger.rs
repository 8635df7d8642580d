use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::bus_passenger::{
    BusPassenger as DomainBusPassenger, NewBusPassenger as DomainNewBusPassenger,
    UpdateBusPassenger as DomainUpdateBusPassenger,
};
use crate::domain::types::{Money, Notes, PassengerId, PhoneNumber, ScheduleId, TypeConstraintError};
use crate::models::client::contact_from_db;
use crate::models::{count_to_db, roster_from_db};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::bus_passengers)]
pub struct BusPassenger {
    pub id: i32,
    pub folio: String,
    pub schedule_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub adults: i32,
    pub children: i32,
    pub total: i64,
    pub paid: i64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bus_passengers)]
pub struct NewBusPassenger<'a> {
    pub folio: String,
    pub schedule_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub adults: i32,
    pub children: i32,
    pub total: i64,
    pub status: &'static str,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::bus_passengers)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateBusPassenger<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub adults: i32,
    pub children: i32,
    pub total: i64,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<BusPassenger> for DomainBusPassenger {
    type Error = TypeConstraintError;

    fn try_from(passenger: BusPassenger) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PassengerId::new(passenger.id)?,
            folio: passenger.folio.parse()?,
            schedule_id: ScheduleId::new(passenger.schedule_id)?,
            contact: contact_from_db(passenger.name, passenger.email, passenger.phone)?,
            roster: roster_from_db(passenger.adults, passenger.children)?,
            total: Money::from_cents(passenger.total)?,
            paid: Money::from_cents(passenger.paid)?,
            status: passenger.status.parse()?,
            notes: passenger.notes.map(Notes::new).transpose()?,
            created_at: passenger.created_at,
            updated_at: passenger.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewBusPassenger> for NewBusPassenger<'a> {
    fn from(passenger: &'a DomainNewBusPassenger) -> Self {
        Self {
            folio: passenger.folio.to_string(),
            schedule_id: passenger.schedule_id.get(),
            name: passenger.contact.name.as_str(),
            email: passenger.contact.email.as_str(),
            phone: passenger.contact.phone.as_ref().map(PhoneNumber::as_str),
            adults: count_to_db(passenger.roster.adults()),
            children: count_to_db(passenger.roster.children()),
            total: passenger.total.cents(),
            status: passenger.status.as_str(),
            notes: passenger.notes.as_ref().map(Notes::as_str),
        }
    }
}

impl<'a> UpdateBusPassenger<'a> {
    pub fn new(passenger: &'a DomainUpdateBusPassenger, updated_at: NaiveDateTime) -> Self {
        Self {
            name: passenger.contact.name.as_str(),
            email: passenger.contact.email.as_str(),
            phone: passenger.contact.phone.as_ref().map(PhoneNumber::as_str),
            adults: count_to_db(passenger.roster.adults()),
            children: count_to_db(passenger.roster.children()),
            total: passenger.total.cents(),
            notes: passenger.notes.as_ref().map(Notes::as_str),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::BookingStatus;
    use chrono::Utc;

    #[test]
    fn passenger_into_domain() {
        let now = Utc::now().naive_utc();
        let row = BusPassenger {
            id: 9,
            folio: "67e55044-10b1-426f-9247-bb680e5fe0c8".to_string(),
            schedule_id: 3,
            name: "Rosa".to_string(),
            email: "rosa@example.com".to_string(),
            phone: Some("+525512345678".to_string()),
            adults: 1,
            children: 2,
            total: 160_000,
            paid: 0,
            status: "cancelled".to_string(),
            notes: Some("window seat".to_string()),
            created_at: now,
            updated_at: now,
        };
        let passenger = DomainBusPassenger::try_from(row).expect("valid passenger");
        assert_eq!(passenger.roster.total(), 3);
        assert_eq!(passenger.status, BookingStatus::Cancelled);
        assert_eq!(passenger.balance().cents(), 160_000);
        assert_eq!(
            passenger.contact.phone.as_ref().map(PhoneNumber::as_str),
            Some("+525512345678")
        );
    }
}
