use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};
use tracing::debug;

use models::{technology, user, user_technology};

use crate::auth::domain::{AuthUser, NewAccount, StoredUser, TechnologyView};
use crate::auth::errors::AuthError;
use crate::auth::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

fn to_auth_user(u: user::Model, technologies: Vec<technology::Model>) -> AuthUser {
    AuthUser {
        id: u.id,
        first_name: u.first_name,
        last_name: u.last_name,
        email: u.email,
        birthday: u.birthday,
        role: u.user_role,
        address: u.adresses,
        phone: u.phone_numbers,
        technologies: technologies.into_iter().map(|t| t.name).collect(),
    }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, AuthError> {
        let Some(found) = user::find_by_email(&self.db, email).await? else {
            return Ok(None);
        };
        let techs = user::technologies(&self.db, &found).await?;
        let password_hash = found.pass.clone();
        Ok(Some(StoredUser { user: to_auth_user(found, techs), password_hash }))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError> {
        let Some(found) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let techs = user::technologies(&self.db, &found).await?;
        Ok(Some(to_auth_user(found, techs)))
    }

    async fn create_user(&self, account: NewAccount) -> Result<AuthUser, AuthError> {
        let txn = self.db.begin().await?;
        let created = user::create(
            &txn,
            user::NewUser {
                first_name: account.first_name,
                last_name: account.last_name,
                email: account.email,
                pass: account.password_hash,
                birthday: account.birthday,
                user_role: account.role,
                adresses: account.address,
                phone_numbers: account.phone,
            },
        )
        .await?;

        for name in &account.technologies {
            let tech = technology::find_or_create(&txn, name).await?;
            user_technology::link(&txn, created.id, tech.id).await?;
        }
        let techs = user::technologies(&txn, &created).await?;
        txn.commit().await?;
        debug!(user_id = created.id, technologies = techs.len(), "user row committed");
        Ok(to_auth_user(created, techs))
    }

    async fn list_technologies(&self) -> Result<Vec<TechnologyView>, AuthError> {
        let all = technology::list(&self.db).await?;
        Ok(all.into_iter().map(|t| TechnologyView { id: t.id, name: t.name }).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::normalize_email;
    use crate::test_support::get_db;
    use chrono::NaiveDate;
    use models::UserRole;

    fn account(email: &str, techs: &[&str]) -> NewAccount {
        NewAccount {
            first_name: "Ana".into(),
            last_name: "Pop".into(),
            email: normalize_email(email),
            password_hash: crate::auth::password::hash_password("Secret123").unwrap(),
            birthday: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            role: UserRole::User,
            address: "Main street 3".into(),
            phone: "0712345678".into(),
            technologies: techs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn create_find_and_conflict() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmUserRepository { db: db.clone() };

        let email = format!("repo_{}@example.com", uuid::Uuid::new_v4().simple());
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let rust = format!("Rust-{suffix}");
        let created = repo.create_user(account(&email, &[&rust])).await?;
        assert_eq!(created.technologies, vec![rust.clone()]);

        let stored = repo.find_by_email(&email).await?.expect("stored user");
        assert_eq!(stored.user, created);
        assert!(crate::auth::password::verify_password("Secret123", &stored.password_hash)?);

        let by_id = repo.find_by_id(created.id).await?.expect("by id");
        assert_eq!(by_id.email, email);

        let dup = repo.create_user(account(&email, &[])).await;
        assert!(matches!(dup, Err(AuthError::Conflict)));

        assert!(repo.list_technologies().await?.iter().any(|t| t.name == rust));

        user::hard_delete(&db, created.id).await?;
        assert!(repo.find_by_email(&email).await?.is_none());
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_share_new_technology() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = std::sync::Arc::new(SeaOrmUserRepository { db: db.clone() });

        for _ in 0..5 {
            let tech = format!("Tech-{}", uuid::Uuid::new_v4().simple());
            let mut set = tokio::task::JoinSet::new();
            for _ in 0..4 {
                let repo = repo.clone();
                let email = format!("race_{}@example.com", uuid::Uuid::new_v4().simple());
                let tech = tech.clone();
                set.spawn(async move { repo.create_user(account(&email, &[&tech])).await });
            }
            let mut ids = Vec::new();
            while let Some(joined) = set.join_next().await {
                let created = joined??;
                assert_eq!(created.technologies, vec![tech.clone()]);
                ids.push(created.id);
            }
            assert_eq!(ids.len(), 4);
            let matching = repo.list_technologies().await?.into_iter().filter(|t| t.name == tech).count();
            assert_eq!(matching, 1);
            for id in ids {
                user::hard_delete(&db, id).await?;
            }
        }
        Ok(())
    }
}
