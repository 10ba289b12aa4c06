use adoptify_api::{
    config::AppConfig,
    dto::{auth::TokenType, donations::CreateDonationRequest, pets::UpdatePetRequest},
    entity::{AdoptionStatus, ApplicationStatus, Gender, PetType, UserRole, pets},
    error::AppError,
    routes::params::Pagination,
    services::{
        auth_service::{decode_token, encode_token, issue_token_pair},
        donation_service::validate_donation,
        pet_service::apply_pet_update,
        shelter_service::validate_date_range,
    },
    validation::{FieldValidator, is_web_url, looks_like_email, parse_choice},
    workflow::{ensure_pet_available, parse_application_status, pet_status_after},
};
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, IntoActiveModel};
use std::str::FromStr;
use uuid::Uuid;

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "test-secret".into(),
        access_token_ttl_minutes: 5,
        refresh_token_ttl_hours: 1,
        db_max_connections: 1,
        cors_allowed_origins: vec![],
    }
}

fn field_messages(err: AppError, field: &str) -> Vec<String> {
    match err {
        AppError::Validation(fields) => fields.get(field).cloned().unwrap_or_default(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

fn sample_pet() -> pets::Model {
    let now = Utc::now().fixed_offset();
    pets::Model {
        id: Uuid::new_v4(),
        shelter_id: Uuid::new_v4(),
        name: "Rex".into(),
        age: 3,
        gender: Gender::Male,
        domesticated: true,
        pet_type: PetType::Dog,
        adoption_status: AdoptionStatus::Available,
        image: Some("rex.png".into()),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn application_decisions_cascade_to_pet() {
    assert_eq!(
        pet_status_after(ApplicationStatus::Approved),
        Some(AdoptionStatus::Adopted)
    );
    assert_eq!(
        pet_status_after(ApplicationStatus::Rejected),
        Some(AdoptionStatus::Available)
    );
    assert_eq!(pet_status_after(ApplicationStatus::Pending), None);
}

#[test]
fn application_status_parsing_is_case_sensitive() {
    assert_eq!(
        parse_application_status("Approved").unwrap(),
        ApplicationStatus::Approved
    );
    let messages = field_messages(
        parse_application_status("approved").unwrap_err(),
        "application_status",
    );
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Pending, Approved, Rejected"));

    assert!(parse_application_status("Cancelled").is_err());
}

#[test]
fn only_available_pets_accept_applications() {
    assert!(ensure_pet_available(AdoptionStatus::Available).is_ok());
    for status in [AdoptionStatus::Pending, AdoptionStatus::Adopted] {
        let messages = field_messages(ensure_pet_available(status).unwrap_err(), "pet_id");
        assert_eq!(messages, vec!["This pet is not available for adoption.".to_string()]);
    }
}

#[test]
fn enum_choices_match_stored_values() {
    assert_eq!(parse_choice::<PetType>("pet_type", "Rabbit").unwrap(), PetType::Rabbit);
    assert_eq!(parse_choice::<Gender>("gender", "Female").unwrap(), Gender::Female);
    assert!(parse_choice::<PetType>("pet_type", "Hamster").is_err());
    assert!(parse_choice::<Gender>("gender", "female").is_err());
}

#[test]
fn pet_update_applies_only_allowed_fields() {
    let pet = sample_pet();
    let original_id = pet.id;
    let mut active = pet.into_active_model();

    apply_pet_update(
        &mut active,
        UpdatePetRequest {
            name: Some("Max".into()),
            adoption_status: Some("Adopted".into()),
            image: Some("   ".into()),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(active.name, ActiveValue::Set("Max".to_string()));
    assert_eq!(active.adoption_status, ActiveValue::Set(AdoptionStatus::Adopted));
    assert_eq!(active.id, ActiveValue::Unchanged(original_id));
    assert_eq!(active.image, ActiveValue::Unchanged(Some("rex.png".to_string())));
}

#[test]
fn pet_update_reports_every_bad_field() {
    let mut active = sample_pet().into_active_model();
    let err = apply_pet_update(
        &mut active,
        UpdatePetRequest {
            age: Some(0),
            gender: Some("Other".into()),
            ..Default::default()
        },
    )
    .unwrap_err();

    match err {
        AppError::Validation(fields) => {
            assert!(fields.contains_key("age"));
            assert!(fields.contains_key("gender"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(active.age, ActiveValue::Unchanged(3));
}

#[test]
fn donation_requires_shelter_and_amount() {
    let err = validate_donation(&CreateDonationRequest {
        shelter_id: None,
        amount: Some(Decimal::from(10)),
    })
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Shelter ID and amount are required."));

    let err = validate_donation(&CreateDonationRequest {
        shelter_id: Some("not-a-uuid".into()),
        amount: Some(Decimal::from(10)),
    })
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Invalid shelter ID."));
}

#[test]
fn donation_amount_must_be_positive_money() {
    let shelter_id = Uuid::new_v4();
    let request = |amount: &str| CreateDonationRequest {
        shelter_id: Some(shelter_id.to_string()),
        amount: Some(Decimal::from_str(amount).unwrap()),
    };

    let (id, amount) = validate_donation(&request("25")).unwrap();
    assert_eq!(id, shelter_id);
    assert_eq!(amount.to_string(), "25.00");

    assert!(validate_donation(&request("0")).is_err());
    assert!(validate_donation(&request("-5.00")).is_err());
    assert!(validate_donation(&request("1.005")).is_err());
}

#[test]
fn management_dates_must_be_ordered() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 10);
    let end = NaiveDate::from_ymd_opt(2025, 1, 5);

    assert!(validate_date_range(start, start).is_ok());
    assert!(validate_date_range(start, None).is_ok());
    assert!(validate_date_range(None, end).is_ok());
    assert!(matches!(
        validate_date_range(start, end),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn token_pair_round_trips_with_types() {
    let config = test_config();
    let user_id = Uuid::new_v4();
    let pair = issue_token_pair(&config, user_id, UserRole::Admin).unwrap();

    let claims = decode_token(&config, &pair.access, TokenType::Access).unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.role, UserRole::Admin);

    assert!(decode_token(&config, &pair.refresh, TokenType::Refresh).is_ok());
    assert!(matches!(
        decode_token(&config, &pair.refresh, TokenType::Access),
        Err(AppError::Unauthorized(_))
    ));
}

#[test]
fn expired_or_foreign_tokens_are_rejected() {
    let config = test_config();
    let expired = encode_token(
        &config,
        Uuid::new_v4(),
        UserRole::User,
        TokenType::Access,
        Duration::minutes(-10),
    )
    .unwrap();
    assert!(decode_token(&config, &expired, TokenType::Access).is_err());

    let other = AppConfig {
        jwt_secret: "another-secret".into(),
        ..test_config()
    };
    let foreign = issue_token_pair(&other, Uuid::new_v4(), UserRole::User).unwrap();
    assert!(decode_token(&config, &foreign.access, TokenType::Access).is_err());
}

#[test]
fn contact_helpers() {
    assert!(is_web_url("https://shelter.example.com"));
    assert!(is_web_url("http://localhost:8080/adopt"));
    assert!(!is_web_url("ftp://shelter.example.com"));
    assert!(!is_web_url("shelter.example.com"));
    assert!(!is_web_url("http://bad host"));
    assert!(!is_web_url("https://exa<mple>.com"));
    assert!(!is_web_url("http://:::"));
    assert!(looks_like_email("ada@example.com"));
    assert!(!looks_like_email("ada.example.com"));
}

#[test]
fn pagination_clamps_and_never_overflows() {
    let (page, per_page, offset) = Pagination::default().normalize();
    assert_eq!((page, per_page, offset), (1, 20, 0));

    let (page, per_page, offset) = Pagination {
        page: Some(3),
        per_page: Some(500),
    }
    .normalize();
    assert_eq!((page, per_page, offset), (3, 100, 200));

    let (page, _, offset) = Pagination {
        page: Some(i64::MAX),
        per_page: Some(20),
    }
    .normalize();
    assert_eq!(page, i64::MAX);
    assert_eq!(offset, i64::MAX);
}

#[test]
fn length_limits_follow_column_widths() {
    let mut validator = FieldValidator::new();
    validator
        .max_len("name", &"a".repeat(100), 100)
        .max_len("phone_number", &"1".repeat(21), 20);
    let messages = field_messages(validator.finish().unwrap_err(), "phone_number");
    assert_eq!(
        messages,
        vec!["Ensure this field has no more than 20 characters.".to_string()]
    );

    let mut active = sample_pet().into_active_model();
    let err = apply_pet_update(
        &mut active,
        UpdatePetRequest {
            name: Some("x".repeat(101)),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(field_messages(err, "name").len(), 1);
    assert_eq!(active.name, ActiveValue::Unchanged("Rex".to_string()));
}
