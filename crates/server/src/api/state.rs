//! Shared application state.

use crate::service::{ProblemService, SubmissionQueries};

#[derive(Clone)]
pub struct AppState {
    pub problems: ProblemService,
    pub submissions: SubmissionQueries,
}

impl AppState {
    pub fn new(problems: ProblemService, submissions: SubmissionQueries) -> Self {
        Self {
            problems,
            submissions,
        }
    }
}
