use drivehub_domain::id::UserId;
use drivehub_marketplace::error::MarketplaceError;
use drivehub_marketplace::usecase::session::{
    CurrentUserUseCase, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};

use crate::helpers::{MockAuth, MockProfileRepo, MockRoleRepo, test_profile};

fn sign_up_input(email: &str) -> SignUpInput {
    SignUpInput {
        email: email.to_owned(),
        password: "correct horse".to_owned(),
        first_name: " Ana ".to_owned(),
        last_name: "Silva".to_owned(),
    }
}

#[tokio::test]
async fn should_create_profile_on_sign_up() {
    let auth = MockAuth::default();
    let profiles = MockProfileRepo::default();
    let uc = SignUpUseCase {
        auth: auth.clone(),
        profiles: profiles.clone(),
    };

    let profile = uc.execute(sign_up_input(" Ana@Example.com ")).await.unwrap();

    assert_eq!(profile.email, "ana@example.com");
    assert_eq!(profile.first_name, "Ana");
    assert_eq!(profiles.snapshot(), vec![profile.clone()]);
    let accounts = auth.accounts.lock().unwrap();
    assert_eq!(accounts[0].2, profile.id);
}

#[tokio::test]
async fn should_reject_duplicate_sign_up_without_profile() {
    let auth = MockAuth::with_account("ana@example.com", "secret", UserId::generate());
    let profiles = MockProfileRepo::default();
    let uc = SignUpUseCase {
        auth,
        profiles: profiles.clone(),
    };

    let result = uc.execute(sign_up_input("ana@example.com")).await;

    assert!(matches!(result, Err(MarketplaceError::EmailAlreadyRegistered)));
    assert!(profiles.snapshot().is_empty());
}

#[tokio::test]
async fn should_finish_profile_when_retrying_failed_sign_up() {
    let auth = MockAuth::default();
    let first = SignUpUseCase {
        auth: auth.clone(),
        profiles: MockProfileRepo::failing(),
    };
    let result = first.execute(sign_up_input("ana@example.com")).await;
    assert!(matches!(result, Err(MarketplaceError::Internal(_))));
    let registered = auth.accounts.lock().unwrap()[0].2;

    let profiles = MockProfileRepo::default();
    let retry = SignUpUseCase {
        auth: auth.clone(),
        profiles: profiles.clone(),
    };
    let profile = retry.execute(sign_up_input("ana@example.com")).await.unwrap();

    assert_eq!(profile.id, registered);
    assert_eq!(profiles.snapshot(), vec![profile]);
    assert_eq!(auth.accounts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_not_finish_profile_with_wrong_password() {
    let auth = MockAuth::with_account("ana@example.com", "other", UserId::generate());
    let profiles = MockProfileRepo::default();
    let uc = SignUpUseCase {
        auth,
        profiles: profiles.clone(),
    };

    let result = uc.execute(sign_up_input("ana@example.com")).await;

    assert!(matches!(result, Err(MarketplaceError::EmailAlreadyRegistered)));
    assert!(profiles.snapshot().is_empty());
}

#[tokio::test]
async fn should_reject_sign_up_when_profile_already_exists() {
    let user = UserId::generate();
    let uc = SignUpUseCase {
        auth: MockAuth::with_account("ana@example.com", "correct horse", user),
        profiles: MockProfileRepo::new(vec![test_profile(user)]),
    };
    let result = uc.execute(sign_up_input("ana@example.com")).await;
    assert!(matches!(result, Err(MarketplaceError::EmailAlreadyRegistered)));
}

#[tokio::test]
async fn should_reject_sign_up_with_malformed_email() {
    let uc = SignUpUseCase {
        auth: MockAuth::default(),
        profiles: MockProfileRepo::default(),
    };
    let result = uc.execute(sign_up_input("not-an-email")).await;
    assert!(
        matches!(&result, Err(MarketplaceError::InvalidField(field)) if field == "email"),
        "expected InvalidField(email), got {:?}",
        result.err()
    );
}

#[tokio::test]
async fn should_sign_in_with_matching_password() {
    let user = UserId::generate();
    let uc = SignInUseCase {
        auth: MockAuth::with_account("ana@example.com", "secret", user),
    };

    let session = uc.execute("ANA@example.com", "secret").await.unwrap();
    assert_eq!(session.user.id, user);
    assert!(!session.access_token.is_empty());

    let wrong = uc.execute("ana@example.com", "guess").await;
    assert!(matches!(wrong, Err(MarketplaceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_require_password_on_sign_in() {
    let uc = SignInUseCase {
        auth: MockAuth::default(),
    };
    let result = uc.execute("ana@example.com", "").await;
    assert!(matches!(result, Err(MarketplaceError::MissingField("password"))));
}

#[tokio::test]
async fn should_swallow_sign_out_failure() {
    let auth = MockAuth {
        fail_sign_out: true,
        ..MockAuth::default()
    };
    let uc = SignOutUseCase { auth: auth.clone() };

    uc.execute("access-token").await;

    assert_eq!(*auth.sign_outs.lock().unwrap(), vec!["access-token".to_owned()]);
}

#[tokio::test]
async fn should_resolve_current_user_with_admin_flag() {
    let admin = UserId::generate();
    let renter = UserId::generate();
    let uc = CurrentUserUseCase {
        profiles: MockProfileRepo::new(vec![test_profile(admin)]),
        roles: MockRoleRepo::admins(vec![admin]),
    };

    let current = uc.execute(admin).await.unwrap();
    assert!(current.is_admin);
    assert_eq!(current.profile.map(|p| p.id), Some(admin));

    let current = uc.execute(renter).await.unwrap();
    assert!(!current.is_admin);
    assert!(current.profile.is_none());
    assert_eq!(current.user_id, renter);
}
