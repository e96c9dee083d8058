use super::*;
use actix_rt::System;
use async_trait::async_trait;
use chrono::Utc;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::{CartEntry, EmailAddress, Role, User, UserId, UserName};

#[derive(Default)]
struct InMemoryUserRepository {
    store: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_if_absent(&self, user: &User) -> Result<bool, UserRepositoryError> {
        let mut guard = self.store.lock().expect("store poisoned");
        let key = user.email().as_ref().to_owned();
        if guard.contains_key(&key) {
            return Ok(false);
        }
        guard.insert(key, user.clone());
        Ok(true)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let guard = self.store.lock().expect("store poisoned");
        Ok(guard.get(email.as_ref()).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        let guard = self.store.lock().expect("store poisoned");
        Ok(guard.values().cloned().collect())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserRepositoryError> {
        let guard = self.store.lock().expect("store poisoned");
        Ok(guard
            .values()
            .filter(|user| user.role() == role)
            .cloned()
            .collect())
    }

    async fn set_role(&self, user_id: &Uuid, role: Role) -> Result<u64, UserRepositoryError> {
        let mut guard = self.store.lock().expect("store poisoned");
        let mut updated = 0;
        for user in guard.values_mut() {
            if user.id().as_uuid() == user_id {
                *user = User::new(
                    user.id().clone(),
                    user.name().clone(),
                    user.email().clone(),
                    role,
                );
                updated += 1;
            }
        }
        Ok(updated)
    }
}

#[fixture]
fn ada() -> User {
    let id = UserId::random();
    let name = UserName::new("Ada Lovelace").expect("valid name");
    let email = EmailAddress::new("ada@example.com").expect("valid email");
    User::new(id, name, email, Role::None)
}

#[rstest]
fn repository_registration_is_idempotent(ada: User) {
    let repo = InMemoryUserRepository::default();

    System::new().block_on(async move {
        let first = repo.create_if_absent(&ada).await.expect("first insert");
        let second = repo.create_if_absent(&ada).await.expect("second insert");
        assert!(first);
        assert!(!second);

        let listed = repo.list().await.expect("list succeeds");
        assert_eq!(listed.len(), 1);
    });
}

#[rstest]
fn repository_promotion_changes_stored_role(ada: User) {
    let repo = InMemoryUserRepository::default();
    let user_id = *ada.id().as_uuid();
    let email = ada.email().clone();

    System::new().block_on(async move {
        repo.create_if_absent(&ada).await.expect("insert");
        let updated = repo
            .set_role(&user_id, Role::Instructor)
            .await
            .expect("promotion succeeds");
        assert_eq!(updated, 1);

        let stored = repo
            .find_by_email(&email)
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert_eq!(stored.role(), Role::Instructor);
    });
}

#[derive(Default)]
struct InMemoryCartRepository {
    store: Mutex<HashMap<Uuid, CartEntry>>,
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn insert(&self, entry: &CartEntry) -> Result<(), CartRepositoryError> {
        let mut guard = self.store.lock().expect("cart poisoned");
        guard.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn list_by_owner(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<CartEntry>, CartRepositoryError> {
        let guard = self.store.lock().expect("cart poisoned");
        Ok(guard
            .values()
            .filter(|entry| &entry.email == email)
            .cloned()
            .collect())
    }

    async fn remove_for_owner(
        &self,
        entry_id: &Uuid,
        email: &EmailAddress,
    ) -> Result<u64, CartRepositoryError> {
        let mut guard = self.store.lock().expect("cart poisoned");
        let owned = guard
            .get(entry_id)
            .is_some_and(|entry| &entry.email == email);
        if owned {
            guard.remove(entry_id);
            return Ok(1);
        }
        Ok(0)
    }
}

#[rstest]
fn cart_removal_respects_ownership() {
    let repo = InMemoryCartRepository::default();
    let ada = EmailAddress::new("ada@example.com").expect("valid email");
    let rival = EmailAddress::new("rival@example.com").expect("valid email");
    let entry = CartEntry {
        id: Uuid::new_v4(),
        email: ada.clone(),
        class_id: Uuid::new_v4(),
        added_at: Utc::now(),
    };

    System::new().block_on(async move {
        repo.insert(&entry).await.expect("insert");

        let denied = repo
            .remove_for_owner(&entry.id, &rival)
            .await
            .expect("removal call succeeds");
        assert_eq!(denied, 0);

        let removed = repo
            .remove_for_owner(&entry.id, &ada)
            .await
            .expect("removal call succeeds");
        assert_eq!(removed, 1);
        assert!(repo.list_by_owner(&ada).await.expect("list").is_empty());
    });
}
