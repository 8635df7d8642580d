//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod service {
    use super::*;
    use crate::domain::occupancy::OccupancyError;
    use crate::domain::pricing::PricingError;
    use crate::domain::seat_map::SeatMapError;
    use crate::forms::FormError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::TypeConstraint(val.to_string())
        }
    }

    impl From<SeatMapError> for ServiceError {
        fn from(val: SeatMapError) -> Self {
            match val {
                SeatMapError::SeatOccupied(_) => ServiceError::SeatTaken,
                other => ServiceError::Form(other.to_string()),
            }
        }
    }

    impl From<OccupancyError> for ServiceError {
        fn from(val: OccupancyError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<PricingError> for ServiceError {
        fn from(val: PricingError) -> Self {
            ServiceError::Internal(val.to_string())
        }
    }

    impl From<FormError> for ServiceError {
        fn from(val: FormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use crate::domain::occupancy::OccupancyError;
    use crate::domain::seat_map::SeatMapError;
    use crate::domain::types::SeatNumber;
    use crate::services::ServiceError;

    #[test]
    fn occupied_seat_is_a_seat_conflict() {
        let seat = SeatNumber::new(4).unwrap();
        assert!(matches!(
            ServiceError::from(SeatMapError::SeatOccupied(seat)),
            ServiceError::SeatTaken
        ));
        assert!(matches!(
            ServiceError::from(SeatMapError::DuplicateSeat(seat)),
            ServiceError::Form(_)
        ));
    }

    #[test]
    fn occupancy_errors_are_form_errors() {
        match ServiceError::from(OccupancyError::NoAdults) {
            ServiceError::Form(message) => assert!(message.contains("adult")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
