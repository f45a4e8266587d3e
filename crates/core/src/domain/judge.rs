use async_trait::async_trait;
use thiserror::Error;

/// One run of `source_code` against `stdin`, compared with `expected_output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
    pub expected_output: String,
}

/// Tracking handle returned for one run of a batch. The judge may omit the
/// token for entries it refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionToken {
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub token: String,
    pub status_id: u16,
}

impl Verdict {
    pub fn status(&self) -> JudgeStatus {
        JudgeStatus::from_id(self.status_id)
    }

    pub fn is_accepted(&self) -> bool {
        self.status_id == JudgeStatus::ACCEPTED_ID
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JudgeStatus {
    InQueue,
    Processing,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    CompilationError,
    /// Ids 7 through 12; the id distinguishes the signal.
    RuntimeError(u16),
    InternalError,
    ExecFormatError,
    Unknown(u16),
}

impl JudgeStatus {
    pub const ACCEPTED_ID: u16 = 3;

    pub fn from_id(id: u16) -> Self {
        match id {
            1 => Self::InQueue,
            2 => Self::Processing,
            3 => Self::Accepted,
            4 => Self::WrongAnswer,
            5 => Self::TimeLimitExceeded,
            6 => Self::CompilationError,
            7..=12 => Self::RuntimeError(id),
            13 => Self::InternalError,
            14 => Self::ExecFormatError,
            other => Self::Unknown(other),
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InQueue | Self::Processing)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::InQueue => "In Queue",
            Self::Processing => "Processing",
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "Wrong Answer",
            Self::TimeLimitExceeded => "Time Limit Exceeded",
            Self::CompilationError => "Compilation Error",
            Self::RuntimeError(7) => "Runtime Error (SIGSEGV)",
            Self::RuntimeError(8) => "Runtime Error (SIGXFSZ)",
            Self::RuntimeError(9) => "Runtime Error (SIGFPE)",
            Self::RuntimeError(10) => "Runtime Error (SIGABRT)",
            Self::RuntimeError(11) => "Runtime Error (NZEC)",
            Self::RuntimeError(_) => "Runtime Error (Other)",
            Self::InternalError => "Internal Error",
            Self::ExecFormatError => "Exec Format Error",
            Self::Unknown(_) => "Unknown Status",
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JudgeError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("judge service unavailable: {0}")]
    Unavailable(String),
    #[error("judge protocol error: {0}")]
    Protocol(String),
    #[error("judge did not reach a terminal status after {attempts} polls")]
    Timeout { attempts: u32 },
}

/// Port to the external code-execution service.
#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Maps an author-facing language label to the judge's numeric id.
    fn resolve_language_id(&self, language: &str) -> Result<u32, JudgeError>;

    /// Sends every request as one batch and returns one token slot per request.
    async fn submit_batch(
        &self,
        requests: &[SubmissionRequest],
    ) -> Result<Vec<SubmissionToken>, JudgeError>;

    /// Returns only once every token has reached a terminal status.
    async fn poll_results(&self, tokens: &[String]) -> Result<Vec<Verdict>, JudgeError>;
}
