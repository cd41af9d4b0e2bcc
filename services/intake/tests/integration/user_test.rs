use passystem_intake::error::IntakeServiceError;
use passystem_intake::usecase::user::{
    GetUserUseCase, ListUsersUseCase, SignupUserInput, SignupUserUseCase,
};

use crate::helpers::{MockUserRepo, test_user};

fn signup_input(email: &str, name: &str) -> SignupUserInput {
    SignupUserInput {
        email: email.to_owned(),
        name: name.to_owned(),
        role: "user".to_owned(),
        photo_url: None,
    }
}

// ── SignupUserUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_signup_then_fetch_by_email() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();

    let signup = SignupUserUseCase { repo };
    let outcome = signup
        .execute(signup_input("hasan@example.com", "Hasan Mahmud"))
        .await
        .unwrap();
    assert!(outcome.created);

    let get = GetUserUseCase {
        repo: MockUserRepo {
            users: users.clone(),
        },
    };
    let found = get.execute("hasan@example.com").await.unwrap();
    assert_eq!(found.email, "hasan@example.com");
    assert_eq!(found.name, "Hasan Mahmud");
    assert_eq!(found.id, outcome.user.id);
}

#[tokio::test]
async fn should_keep_identity_across_repeat_signup() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();
    let signup = SignupUserUseCase { repo };

    let first = signup
        .execute(signup_input("hasan@example.com", "Hasan"))
        .await
        .unwrap();
    assert!(first.created);

    let second = signup
        .execute(SignupUserInput {
            email: "hasan@example.com".to_owned(),
            name: "Hasan Mahmud".to_owned(),
            role: "admin".to_owned(),
            photo_url: Some("https://cdn.example.com/hasan.png".to_owned()),
        })
        .await
        .unwrap();

    assert!(!second.created);
    assert_eq!(second.user.id, first.user.id);
    assert_eq!(second.user.created_at, first.user.created_at);
    assert_eq!(second.user.name, "Hasan Mahmud");
    assert_eq!(second.user.role, "admin");
    assert_eq!(
        second.user.photo_url.as_deref(),
        Some("https://cdn.example.com/hasan.png")
    );
    assert!(second.user.updated_at >= first.user.updated_at);

    let stored = users.lock().unwrap();
    assert_eq!(stored.len(), 1, "repeat signup must not add a second record");
}

#[tokio::test]
async fn should_create_separate_records_for_distinct_emails() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();
    let signup = SignupUserUseCase { repo };

    let a = signup
        .execute(signup_input("a@example.com", "A"))
        .await
        .unwrap();
    let b = signup
        .execute(signup_input("b@example.com", "B"))
        .await
        .unwrap();

    assert!(a.created);
    assert!(b.created);
    assert_eq!(users.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_reject_signup_without_email() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();
    let signup = SignupUserUseCase { repo };

    let result = signup.execute(signup_input("", "Nameless")).await;
    assert!(
        matches!(result, Err(IntakeServiceError::MissingFields)),
        "expected MissingFields, got {result:?}"
    );
    assert!(users.lock().unwrap().is_empty());
}

// ── GetUserUseCase / ListUsersUseCase ────────────────────────────────────────

#[tokio::test]
async fn should_return_user_not_found_for_unknown_email() {
    let get = GetUserUseCase {
        repo: MockUserRepo::new(vec![test_user()]),
    };

    let result = get.execute("stranger@example.com").await;
    assert!(
        matches!(result, Err(IntakeServiceError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_list_users_in_signup_order() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();
    let signup = SignupUserUseCase { repo };
    for email in ["first@example.com", "second@example.com", "third@example.com"] {
        signup.execute(signup_input(email, "Someone")).await.unwrap();
    }

    let list = ListUsersUseCase {
        repo: MockUserRepo { users },
    };
    let listed = list.execute().await.unwrap();
    let emails: Vec<&str> = listed.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(
        emails,
        ["first@example.com", "second@example.com", "third@example.com"]
    );
}
