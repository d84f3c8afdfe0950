use sea_orm::{EntityTrait, PaginatorTrait};

use pizza_auth_types::claims::{Claim, ClaimsIdentity};
use pizza_ordering::domain::repository::RoleRepository;
use pizza_ordering::domain::types::{CreateRoleOutcome, NewRole, Role};
use pizza_ordering::error::OrderingServiceError;
use pizza_ordering::infra::db::DbRoleRepository;
use pizza_ordering::usecase::roles::RolesService;
use pizza_ordering_schema::{roles, user_roles};

use crate::helpers::{seed_role, seed_user, setup};

#[tokio::test]
async fn should_list_user_roles_sorted_by_name() {
    let state = setup().await;
    let user = seed_user(&state, "vahid").await;
    seed_role(&state, "User").await;
    seed_role(&state, "Admin").await;
    seed_role(&state, "Chef").await;

    let service = state.roles_service();
    service.add_user_in_role_by_name(&user, "User").await.unwrap();
    service.add_user_in_role_by_id(user.id, "Admin").await.unwrap();

    let held = service.find_user_roles(user.id).await.unwrap();
    let names: Vec<_> = held.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Admin", "User"]);
}

#[tokio::test]
async fn should_agree_between_membership_checks() {
    let state = setup().await;
    let vahid = seed_user(&state, "vahid").await;
    let sara = seed_user(&state, "sara").await;
    let admin = seed_role(&state, "Admin").await;
    seed_role(&state, "User").await;

    let service = state.roles_service();
    service.add_user_in_role(&vahid, &admin).await.unwrap();
    service.add_user_in_role_by_name(&sara, "User").await.unwrap();

    for user_id in [vahid.id, sara.id, 999] {
        let held = service.find_user_roles(user_id).await.unwrap();
        for role_name in ["Admin", "User", "admin", "Missing"] {
            let listed = held.iter().any(|r| r.name == role_name);
            let checked = service.is_user_in_role(user_id, role_name).await.unwrap();
            assert_eq!(listed, checked, "user {user_id}, role {role_name}");
        }
    }
    assert!(service.is_user_in_role(vahid.id, "Admin").await.unwrap());
    assert!(!service.is_user_in_role(sara.id, "Admin").await.unwrap());
}

#[tokio::test]
async fn should_find_users_in_role() {
    let state = setup().await;
    let vahid = seed_user(&state, "vahid").await;
    let sara = seed_user(&state, "sara").await;
    seed_user(&state, "reza").await;
    seed_role(&state, "Admin").await;
    seed_role(&state, "Courier").await;

    let service = state.roles_service();
    service.add_user_in_role_by_id(vahid.id, "Admin").await.unwrap();
    service.add_user_in_role_by_id(sara.id, "Admin").await.unwrap();

    let members = service.find_users_in_role("Admin").await.unwrap();
    let mut usernames: Vec<_> = members.iter().map(|u| u.username.as_str()).collect();
    usernames.sort_unstable();
    assert_eq!(usernames, ["sara", "vahid"]);

    assert!(service.find_users_in_role("Courier").await.unwrap().is_empty());
    assert!(service.find_users_in_role("Missing").await.unwrap().is_empty());
}

#[tokio::test]
async fn should_return_none_for_missing_role() {
    let state = setup().await;
    let admin = seed_role(&state, "Admin").await;

    let service = state.roles_service();
    assert!(service.find_role_by_id(admin.id + 100).await.unwrap().is_none());
    assert!(service.find_role_by_name("admin").await.unwrap().is_none());
    assert_eq!(service.find_role_by_id(admin.id).await.unwrap(), Some(admin));
}

#[tokio::test]
async fn should_report_existing_role_without_writing() {
    let state = setup().await;
    let service = state.roles_service();

    assert_eq!(
        service.create_role(NewRole::new("Admin")).await,
        CreateRoleOutcome::success()
    );
    assert_eq!(
        service.create_role(NewRole::new("Admin")).await,
        CreateRoleOutcome::failure("This role is already exists.")
    );
    assert_eq!(roles::Entity::find().count(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_let_exactly_one_concurrent_create_succeed() {
    let state = setup().await;
    let first = state.roles_service();
    let second = state.roles_service();

    let (a, b) = tokio::join!(
        first.create_role(NewRole::new("Chef")),
        second.create_role(NewRole::new("Chef")),
    );

    assert_eq!(
        [a.succeeded, b.succeeded].iter().filter(|ok| **ok).count(),
        1,
        "outcomes: {a:?}, {b:?}"
    );
    let loser = if a.succeeded { &b } else { &a };
    assert!(!loser.error.is_empty());
    assert_eq!(roles::Entity::find().count(&state.db).await.unwrap(), 1);
}

/// Reports every name as free, as a pre-check that ran before a concurrent
/// writer committed would.
struct StaleRoleRepo(DbRoleRepository);

impl RoleRepository for StaleRoleRepo {
    async fn find_by_id(&self, id: i32) -> Result<Option<Role>, OrderingServiceError> {
        self.0.find_by_id(id).await
    }
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, OrderingServiceError> {
        self.0.find_by_name(name).await
    }
    async fn exists_by_name(&self, _name: &str) -> Result<bool, OrderingServiceError> {
        Ok(false)
    }
    async fn create(&self, role: &NewRole) -> Result<Role, OrderingServiceError> {
        self.0.create(role).await
    }
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Role>, OrderingServiceError> {
        self.0.list_by_user(user_id).await
    }
}

#[tokio::test]
async fn should_report_unique_index_failure_after_passed_precheck() {
    let state = setup().await;
    let repo = state.role_repo();

    assert!(!repo.exists_by_name("Chef").await.unwrap());
    repo.create(&NewRole::new("Chef")).await.unwrap();
    let result = repo.create(&NewRole::new("Chef")).await;
    assert!(
        matches!(result, Err(OrderingServiceError::ConstraintViolation(_))),
        "expected ConstraintViolation, got {result:?}"
    );

    let service = RolesService {
        roles: StaleRoleRepo(state.role_repo()),
        users: state.user_repo(),
        memberships: state.user_role_repo(),
    };
    let outcome = service.create_role(NewRole::new("Chef")).await;
    assert!(!outcome.succeeded);
    assert_ne!(outcome.error, CreateRoleOutcome::ALREADY_EXISTS);
    assert!(outcome.error.contains("UNIQUE"), "error: {}", outcome.error);
    assert_eq!(roles::Entity::find().count(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_reject_duplicate_membership() {
    let state = setup().await;
    let user = seed_user(&state, "vahid").await;
    let role = seed_role(&state, "Admin").await;

    let service = state.roles_service();
    service.add_user_in_role(&user, &role).await.unwrap();
    let result = service.add_user_in_role(&user, &role).await;
    assert!(
        matches!(result, Err(OrderingServiceError::ConstraintViolation(_))),
        "expected ConstraintViolation, got {result:?}"
    );
    assert_eq!(user_roles::Entity::find().count(&state.db).await.unwrap(), 1);
}

#[tokio::test]
async fn should_reject_missing_references_before_insert() {
    let state = setup().await;
    let user = seed_user(&state, "vahid").await;
    seed_role(&state, "Admin").await;

    let service = state.roles_service();
    let result = service.add_user_in_role_by_name(&user, "Owner").await;
    assert!(matches!(result, Err(OrderingServiceError::InvalidReference(_))));

    let result = service.add_user_in_role_by_id(user.id + 100, "Admin").await;
    assert!(matches!(result, Err(OrderingServiceError::InvalidReference(_))));

    assert_eq!(user_roles::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn should_remove_membership() {
    let state = setup().await;
    let user = seed_user(&state, "vahid").await;
    seed_role(&state, "Admin").await;

    let service = state.roles_service();
    service.add_user_in_role_by_id(user.id, "Admin").await.unwrap();
    assert!(service.remove_user_from_role(user.id, "Admin").await.unwrap());
    assert!(!service.remove_user_from_role(user.id, "Admin").await.unwrap());
    assert!(service.find_user_roles(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_check_current_user_claims() {
    let state = setup().await;
    let service = state.roles_service();

    assert!(!service.is_current_user_in_roles(None, "Admin"));
    let identity = ClaimsIdentity::new(vec![Claim::role("User")]);
    assert!(!service.is_current_user_in_roles(Some(&identity), "Admin"));
    let identity = ClaimsIdentity::new(vec![Claim::role("User"), Claim::role("Admin")]);
    assert!(service.is_current_user_in_roles(Some(&identity), "Admin"));
}
