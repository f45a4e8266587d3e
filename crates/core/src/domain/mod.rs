mod difficulty;
mod error;
mod ids;
mod judge;
mod language;
mod problem;
mod submission_status;
mod tag;

pub use difficulty::Difficulty;
pub use error::DomainError;
pub use ids::{ProblemId, SubmissionId, UserId};
pub use judge::{JudgeClient, JudgeError, JudgeStatus, SubmissionRequest, SubmissionToken, Verdict};
pub use language::Language;
pub use problem::{
    HiddenTestCase, ProblemDefinition, ProblemPatch, ReferenceSolution, StartCode,
    VisibleTestCase,
};
pub use submission_status::SubmissionStatus;
pub use tag::{Tag, Tags};
