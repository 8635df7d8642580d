use crate::SERVICE_ADMIN_ROLE;
use crate::auth::{AuthenticatedUser, ensure_role};
use crate::domain::agency_settings::AgencySettings;
use crate::dto::settings::SettingsPageData;
use crate::forms::settings::SettingsForm;
use crate::repository::{SettingsReader, SettingsWriter};
use crate::services::ServiceResult;

pub fn load_settings<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<SettingsPageData>
where
    R: SettingsReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let settings = repo.get_agency_settings().map_err(|err| {
        log::error!("Failed to load agency settings: {err}");
        err
    })?;

    Ok(SettingsPageData { settings })
}

pub fn save_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SettingsForm,
) -> ServiceResult<AgencySettings>
where
    R: SettingsWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let settings = AgencySettings::try_from(form)?;
    let saved = repo.save_agency_settings(&settings).map_err(|err| {
        log::error!("Failed to save agency settings: {err}");
        err
    })?;

    Ok(saved)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    /// Builds an admin user for test scenarios.
    fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            roles: vec![SERVICE_ADMIN_ROLE.to_string()],
            exp: 0,
        }
    }

    /// Builds a user without admin rights.
    fn viewer_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "viewer@example.com".to_string(),
            name: "Viewer".to_string(),
            roles: vec!["agency".to_string()],
            exp: 0,
        }
    }

    fn form(currency: &str) -> SettingsForm {
        SettingsForm {
            name: "Viajes Sol".to_string(),
            email: Some("hola@viajessol.mx".to_string()),
            phone: None,
            currency: currency.to_string(),
            deposit_percent: 40,
        }
    }

    #[test]
    fn load_requires_admin_role() {
        let mut repo = MockRepository::new();
        repo.expect_get_agency_settings().times(0);

        let result = load_settings(&repo, &viewer_user());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn save_stores_normalized_settings() {
        let mut repo = MockRepository::new();
        repo.expect_save_agency_settings()
            .withf(|settings| settings.currency == "USD" && settings.deposit_percent.get() == 40)
            .times(1)
            .returning(|settings| Ok(settings.clone()));

        let saved = save_settings(&repo, &admin_user(), form("usd")).unwrap();

        assert_eq!(saved.name.as_str(), "Viajes Sol");
    }

    #[test]
    fn invalid_currency_is_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_save_agency_settings().times(0);

        let result = save_settings(&repo, &admin_user(), form("us"));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
