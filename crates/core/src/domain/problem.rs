use super::{Difficulty, DomainError, Tags};

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleTestCase {
    pub input: String,
    pub output: String,
    pub explanation: String,
}

impl VisibleTestCase {
    pub fn is_complete(&self) -> bool {
        present(&self.input) && present(&self.output) && present(&self.explanation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenTestCase {
    pub input: String,
    pub output: String,
}

impl HiddenTestCase {
    pub fn is_complete(&self) -> bool {
        present(&self.input) && present(&self.output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCode {
    pub language: String,
    pub initial_code: String,
}

impl StartCode {
    pub fn is_complete(&self) -> bool {
        present(&self.language) && present(&self.initial_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSolution {
    pub language: String,
    pub complete_code: String,
}

impl ReferenceSolution {
    pub fn is_complete(&self) -> bool {
        present(&self.language) && present(&self.complete_code)
    }
}

/// A full problem as submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemDefinition {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub tags: Tags,
    pub visible_test_cases: Vec<VisibleTestCase>,
    pub hidden_test_cases: Vec<HiddenTestCase>,
    pub start_code: Vec<StartCode>,
    pub reference_solutions: Vec<ReferenceSolution>,
}

impl ProblemDefinition {
    /// Structural checks that must hold before any reference solution is
    /// sent to the judge.
    pub fn check_required_fields(&self) -> Result<(), DomainError> {
        if !present(&self.title) {
            return Err(DomainError::MissingField("title"));
        }
        if !present(&self.description) {
            return Err(DomainError::MissingField("description"));
        }

        if self.visible_test_cases.is_empty() {
            return Err(DomainError::EmptyCollection("visibleTestCases"));
        }
        if self.start_code.is_empty() {
            return Err(DomainError::EmptyCollection("startCode"));
        }
        if self.reference_solutions.is_empty() {
            return Err(DomainError::EmptyCollection("referenceSolution"));
        }

        for case in &self.visible_test_cases {
            if !present(&case.input) {
                return Err(DomainError::MissingField("visibleTestCases.input"));
            }
            if !present(&case.output) {
                return Err(DomainError::MissingField("visibleTestCases.output"));
            }
            if !present(&case.explanation) {
                return Err(DomainError::MissingField("visibleTestCases.explanation"));
            }
        }
        if !self.hidden_test_cases.iter().all(HiddenTestCase::is_complete) {
            return Err(DomainError::MissingField("hiddenTestCases"));
        }
        if !self.start_code.iter().all(StartCode::is_complete) {
            return Err(DomainError::MissingField("startCode"));
        }
        if !self
            .reference_solutions
            .iter()
            .all(|solution| present(&solution.complete_code))
        {
            return Err(DomainError::MissingField("referenceSolution.completeCode"));
        }

        Ok(())
    }
}

/// Partial update. `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Tags>,
    pub visible_test_cases: Option<Vec<VisibleTestCase>>,
    pub hidden_test_cases: Option<Vec<HiddenTestCase>>,
    pub start_code: Option<Vec<StartCode>>,
    pub reference_solutions: Option<Vec<ReferenceSolution>>,
}

impl ProblemPatch {
    /// Drops incomplete collection entries instead of rejecting them.
    ///
    /// A required collection left empty by the filter is removed from the
    /// patch, so the stored entries survive. Hidden test cases may be cleared.
    pub fn drop_incomplete_entries(&mut self) {
        self.title = self.title.take().map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        self.description = self
            .description
            .take()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        self.visible_test_cases = retain_complete(
            self.visible_test_cases.take(),
            VisibleTestCase::is_complete,
        )
        .filter(|cases| !cases.is_empty());
        self.hidden_test_cases =
            retain_complete(self.hidden_test_cases.take(), HiddenTestCase::is_complete);
        self.start_code = retain_complete(self.start_code.take(), StartCode::is_complete)
            .filter(|codes| !codes.is_empty());
        self.reference_solutions = retain_complete(
            self.reference_solutions.take(),
            ReferenceSolution::is_complete,
        )
        .filter(|solutions| !solutions.is_empty());
    }

    /// Re-validation only runs when the same patch carries both visible test
    /// cases and reference solutions. A patch touching just one of them is
    /// persisted without a judge round-trip.
    pub fn requires_revalidation(&self) -> bool {
        let has_cases = self
            .visible_test_cases
            .as_ref()
            .is_some_and(|cases| !cases.is_empty());
        let has_solutions = self
            .reference_solutions
            .as_ref()
            .is_some_and(|solutions| !solutions.is_empty());
        has_cases && has_solutions
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn retain_complete<T>(entries: Option<Vec<T>>, is_complete: fn(&T) -> bool) -> Option<Vec<T>> {
    entries.map(|entries| entries.into_iter().filter(|entry| is_complete(entry)).collect())
}
