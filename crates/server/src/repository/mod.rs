mod error;
pub mod problem_repository;
pub mod submission_repository;
pub mod user_repository;
pub mod video_repository;

pub use error::{RepoResult, RepositoryError};
pub use problem_repository::{
    NewProblem, ProblemRecord, ProblemRepository, ProblemSummaryRecord, SeaOrmProblemRepository,
};
pub use submission_repository::{
    NewSubmission, SeaOrmSubmissionRepository, SubmissionRecord, SubmissionRepository,
};
pub use user_repository::{NewUser, SeaOrmUserRepository, UserRecord, UserRepository};
pub use video_repository::{SeaOrmVideoRepository, VideoRecord, VideoRepository};
