use super::RepoResult;
use crate::entity::{solved_problem, user};
use algoarena_core::domain::{ProblemId, UserId};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub first_name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub email: String,
}

/// Account storage is owned by the auth layer; problem authoring only reads
/// it and the judging pipeline records solves.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> RepoResult<UserRecord>;
    async fn find_by_id(&self, user_id: UserId) -> RepoResult<Option<UserRecord>>;
    async fn record_solved(&self, user_id: UserId, problem_id: ProblemId) -> RepoResult<()>;
}

#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_model(model: user::Model) -> anyhow::Result<UserRecord> {
        let id = UserId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid user.id '{}' from database: {e}", model.id))?;

        Ok(UserRecord {
            id,
            first_name: model.first_name,
            email: model.email,
        })
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, new_user: NewUser) -> RepoResult<UserRecord> {
        let id = UserId::new();
        let now = Utc::now().naive_utc();

        let active_model = user::ActiveModel {
            id: Set(id.to_string()),
            first_name: Set(new_user.first_name),
            email: Set(new_user.email),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Self::map_model(model)?)
    }

    async fn find_by_id(&self, user_id: UserId) -> RepoResult<Option<UserRecord>> {
        let model = user::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await?;

        Ok(model.map(Self::map_model).transpose()?)
    }

    async fn record_solved(&self, user_id: UserId, problem_id: ProblemId) -> RepoResult<()> {
        let key = (user_id.to_string(), problem_id.to_string());
        if solved_problem::Entity::find_by_id(key.clone())
            .one(&self.db)
            .await?
            .is_some()
        {
            return Ok(());
        }

        solved_problem::ActiveModel {
            user_id: Set(key.0),
            problem_id: Set(key.1),
            solved_at: Set(Utc::now().naive_utc()),
        }
        .insert(&self.db)
        .await?;

        Ok(())
    }
}
