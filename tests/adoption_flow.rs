use adoptify_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        applications::{CreateApplicationRequest, UpdateApplicationStatusRequest},
        auth::RegisterRequest,
        donations::CreateDonationRequest,
        pets::CreatePetRequest,
        shelters::CreateShelterRequest,
    },
    entity::{
        AdoptionApplications, AdoptionStatus, ApplicationStatus, Pets, ShelterManagements,
        UserRole, shelter_managements, users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{ApplicationListQuery, Pagination},
    services::{
        application_service, auth_service, donation_service, favourite_service, pet_service,
        shelter_service,
    },
    state::AppState,
};
use chrono::{SubsecRound, Utc};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

// Integration flow: adopter applies for a pet -> admin decides -> pet status follows.
#[tokio::test]
async fn application_decisions_drive_pet_status() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let admin = create_admin(&state).await?;
    let adopter = register_adopter(&state).await?;
    let shelter_id = create_shelter(&state, &admin).await?;

    // Submitting an application reserves the pet.
    let pet_id = create_pet(&state, &admin, shelter_id).await?;
    let submitted_after = Utc::now().trunc_subsecs(6);
    let application = application_service::create_application(
        &state,
        &adopter,
        CreateApplicationRequest {
            pet_id,
            message: Some("We have a big garden.".into()),
        },
    )
    .await?
    .data
    .expect("application");
    assert_eq!(application.application_status, ApplicationStatus::Pending);
    assert!(application.submission_date >= submitted_after);
    assert_eq!(pet_status(&state, pet_id).await?, AdoptionStatus::Pending);

    // An unknown status changes neither the application nor the pet.
    let err = application_service::update_application_status(
        &state,
        &admin,
        application.id,
        status_request("Cancelled"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    let stored = AdoptionApplications::find_by_id(application.id)
        .one(&state.orm)
        .await?
        .expect("stored application");
    assert_eq!(stored.application_status, ApplicationStatus::Pending);
    assert_eq!(
        stored.updated_at.with_timezone(&Utc),
        application.updated_at
    );
    assert_eq!(pet_status(&state, pet_id).await?, AdoptionStatus::Pending);

    // A second application for the same pet is refused.
    let err = application_service::create_application(
        &state,
        &adopter,
        CreateApplicationRequest {
            pet_id,
            message: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Adopters cannot decide their own applications.
    let err = application_service::update_application_status(
        &state,
        &adopter,
        application.id,
        status_request("Approved"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    assert_eq!(pet_status(&state, pet_id).await?, AdoptionStatus::Pending);

    // Rejection frees the pet, approval of a new application adopts it.
    let update = application_service::update_application_status(
        &state,
        &admin,
        application.id,
        status_request("Rejected"),
    )
    .await?
    .data
    .expect("status update");
    assert_eq!(update.pet_adoption_status, AdoptionStatus::Available);
    assert_eq!(pet_status(&state, pet_id).await?, AdoptionStatus::Available);

    let second = application_service::create_application(
        &state,
        &adopter,
        CreateApplicationRequest {
            pet_id,
            message: None,
        },
    )
    .await?
    .data
    .expect("application");

    // Moving back to Pending leaves the pet untouched.
    application_service::update_application_status(
        &state,
        &admin,
        second.id,
        status_request("Pending"),
    )
    .await?;
    assert_eq!(pet_status(&state, pet_id).await?, AdoptionStatus::Pending);

    let update = application_service::update_application_status(
        &state,
        &admin,
        second.id,
        status_request("Approved"),
    )
    .await?
    .data
    .expect("status update");
    assert_eq!(update.application.application_status, ApplicationStatus::Approved);
    assert_eq!(pet_status(&state, pet_id).await?, AdoptionStatus::Adopted);

    // Adopters only see their own applications.
    let own = application_service::list_applications(
        &state,
        &adopter,
        ApplicationListQuery::default(),
    )
    .await?
    .data
    .expect("applications");
    assert_eq!(own.items.len(), 2);
    assert!(own.items.iter().all(|a| a.adopter_user_id == adopter.user_id));

    // Deleting an application keeps the pet's status.
    application_service::delete_application(&state, &adopter, second.id).await?;
    assert_eq!(pet_status(&state, pet_id).await?, AdoptionStatus::Adopted);

    Ok(())
}

#[tokio::test]
async fn favourites_are_idempotent() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let admin = create_admin(&state).await?;
    let adopter = register_adopter(&state).await?;
    let shelter_id = create_shelter(&state, &admin).await?;
    let pet_id = create_pet(&state, &admin, shelter_id).await?;

    let first = favourite_service::add_favourite(&state, &adopter, pet_id)
        .await?
        .data
        .expect("favourite");
    assert!(first.created);

    let again = favourite_service::add_favourite(&state, &adopter, pet_id)
        .await?
        .data
        .expect("favourite");
    assert!(!again.created);
    assert_eq!(again.favourite.id, first.favourite.id);

    let list = favourite_service::list_favourites(&state, &adopter, Pagination::default())
        .await?
        .data
        .expect("favourites");
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].pet.id, pet_id);

    favourite_service::remove_favourite(&state, &adopter, pet_id).await?;
    let err = favourite_service::remove_favourite(&state, &adopter, pet_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn donations_are_recorded_for_the_donor() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let admin = create_admin(&state).await?;
    let donor = register_adopter(&state).await?;
    let other = register_adopter(&state).await?;
    let shelter_id = create_shelter(&state, &admin).await?;

    let requested_at = Utc::now().trunc_subsecs(6);
    let donation = donation_service::create_donation(
        &state,
        &donor,
        CreateDonationRequest {
            shelter_id: Some(shelter_id.to_string()),
            amount: Some(Decimal::new(25, 0)),
        },
    )
    .await?
    .data
    .expect("donation");
    assert_eq!(donation.amount.to_string(), "25.00");
    assert_eq!(donation.user_id, donor.user_id);
    assert_eq!(donation.shelter_id, shelter_id);
    assert!(donation.donation_date >= requested_at);

    let err = donation_service::get_donation(&state, &other, donation.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    donation_service::get_donation(&state, &admin, donation.id).await?;

    let err = donation_service::create_donation(
        &state,
        &donor,
        CreateDonationRequest {
            shelter_id: Some(Uuid::new_v4().to_string()),
            amount: Some(Decimal::new(10, 0)),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound("Shelter")));

    let list = donation_service::list_donations(&state, &donor, Pagination::default())
        .await?
        .data
        .expect("donations");
    assert_eq!(list.items.len(), 1);

    Ok(())
}

#[tokio::test]
async fn shelter_creation_assigns_the_root_admin() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let admin = create_admin(&state).await?;
    let root = auth_service::find_root_admin(&state.orm)
        .await?
        .expect("at least one admin exists");

    let shelter = shelter_service::create_shelter(
        &state,
        &admin,
        CreateShelterRequest {
            name: unique("Root Shelter"),
            address: "2 Test Lane".into(),
            phone_number: "5550101".into(),
            website_url: Some("https://rootshelter.example.com".into()),
        },
        Some(root.id),
    )
    .await?
    .data
    .expect("shelter");

    let managers = ShelterManagements::find()
        .filter(shelter_managements::Column::ShelterId.eq(shelter.id))
        .all(&state.orm)
        .await?;
    assert_eq!(managers.len(), 1);
    assert_eq!(managers[0].admin_user_id, root.id);
    assert!(managers[0].start_date.is_some());
    assert_eq!(managers[0].end_date, None);

    // Malformed websites are field errors, not stored values.
    let err = shelter_service::create_shelter(
        &state,
        &admin,
        CreateShelterRequest {
            name: unique("Bad Site"),
            address: "3 Test Lane".into(),
            phone_number: "5550102".into(),
            website_url: Some("http://bad host".into()),
        },
        Some(root.id),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref fields) if fields.contains_key("website_url")));

    Ok(())
}

#[tokio::test]
async fn concurrent_registrations_report_duplicates_as_field_errors() -> anyhow::Result<()> {
    let Some(state) = setup_state().await? else {
        return Ok(());
    };

    let username = unique("twin");
    let request = |suffix: &str| RegisterRequest {
        username: username.clone(),
        email: format!("{username}_{suffix}@example.com"),
        password: "twin-password".into(),
        first_name: "Twin".into(),
        last_name: "Adopter".into(),
        phone_number: None,
        address: None,
    };

    let (first, second) = tokio::join!(
        auth_service::register_user(&state, request("a")),
        auth_service::register_user(&state, request("b")),
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let failure = results
        .into_iter()
        .find_map(Result::err)
        .expect("one registration fails");
    assert!(matches!(failure, AppError::Validation(ref fields) if fields.contains_key("username")));

    Ok(())
}

async fn setup_state() -> anyhow::Result<Option<AppState>> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(None);
        }
    };

    let orm = create_orm_conn(&database_url, 5).await?;
    run_migrations(&orm).await?;

    let config = AppConfig {
        database_url,
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "flow-test-secret".into(),
        access_token_ttl_minutes: 5,
        refresh_token_ttl_hours: 1,
        db_max_connections: 5,
        cors_allowed_origins: vec![],
    };
    Ok(Some(AppState::new(orm, config)))
}

fn unique(prefix: &str) -> String {
    format!("{prefix}_{}", &Uuid::new_v4().simple().to_string()[..12])
}

async fn create_admin(state: &AppState) -> anyhow::Result<AuthUser> {
    let username = unique("admin");
    let admin = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(format!("{username}@example.com")),
        username: Set(username),
        password_hash: Set(auth_service::hash_password("admin-password")?),
        first_name: Set("Ada".into()),
        last_name: Set("Admin".into()),
        role: Set(UserRole::Admin),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: admin.id,
        role: UserRole::Admin,
    })
}

async fn register_adopter(state: &AppState) -> anyhow::Result<AuthUser> {
    let username = unique("adopter");
    let details = auth_service::register_user(
        state,
        RegisterRequest {
            email: format!("{username}@example.com"),
            username,
            password: "adopter-password".into(),
            first_name: "Sam".into(),
            last_name: "Adopter".into(),
            phone_number: Some("5550123".into()),
            address: None,
        },
    )
    .await?
    .data
    .expect("user details");

    assert_eq!(details.user.role, UserRole::User);
    Ok(AuthUser {
        user_id: details.user.id,
        role: UserRole::User,
    })
}

async fn create_shelter(state: &AppState, admin: &AuthUser) -> anyhow::Result<Uuid> {
    let shelter = shelter_service::create_shelter(
        state,
        admin,
        CreateShelterRequest {
            name: unique("Shelter"),
            address: "1 Test Lane".into(),
            phone_number: "5550100".into(),
            website_url: None,
        },
        Some(admin.user_id),
    )
    .await?
    .data
    .expect("shelter");
    Ok(shelter.id)
}

async fn create_pet(state: &AppState, admin: &AuthUser, shelter_id: Uuid) -> anyhow::Result<Uuid> {
    let pet = pet_service::create_pet(
        state,
        admin,
        CreatePetRequest {
            name: Some("Biscuit".into()),
            age: Some(2),
            gender: Some("Male".into()),
            shelter_id: Some(shelter_id),
            pet_type: None,
            adoption_status: None,
            domesticated: Some(true),
            image: None,
        },
    )
    .await?
    .data
    .expect("pet");
    assert_eq!(pet.adoption_status, AdoptionStatus::Available);
    Ok(pet.id)
}

async fn pet_status(state: &AppState, pet_id: Uuid) -> anyhow::Result<AdoptionStatus> {
    let pet = Pets::find_by_id(pet_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("pet {pet_id} missing"))?;
    Ok(pet.adoption_status)
}

fn status_request(status: &str) -> UpdateApplicationStatusRequest {
    UpdateApplicationStatusRequest {
        application_status: status.into(),
    }
}
