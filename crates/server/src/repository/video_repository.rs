use super::RepoResult;
use crate::entity::solution_video;
use algoarena_core::domain::ProblemId;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Editorial video attached to a problem. Uploads live outside this service.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRecord {
    pub secure_url: String,
    pub thumbnail_url: String,
    pub duration: f64,
}

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn find_by_problem_id(&self, problem_id: ProblemId) -> RepoResult<Option<VideoRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmVideoRepository {
    db: DatabaseConnection,
}

impl SeaOrmVideoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VideoRepository for SeaOrmVideoRepository {
    async fn find_by_problem_id(&self, problem_id: ProblemId) -> RepoResult<Option<VideoRecord>> {
        let model = solution_video::Entity::find()
            .filter(solution_video::Column::ProblemId.eq(problem_id.to_string()))
            .one(&self.db)
            .await?;

        Ok(model.map(|video| VideoRecord {
            secure_url: video.secure_url,
            thumbnail_url: video.thumbnail_url,
            duration: video.duration,
        }))
    }
}
