//! Wire DTOs to domain values and back.

use std::str::FromStr;

use algoarena_api_types::{
    CreateProblemRequest, HiddenTestCaseDto, ProblemDetail, ProblemSummary, ReferenceSolutionDto,
    StartCodeDto, SubmissionView, TagsField, UpdateProblemRequest, VideoMetadata,
    VisibleTestCaseDto,
};
use algoarena_core::domain::{
    Difficulty, DomainError, HiddenTestCase, ProblemDefinition, ProblemId, ProblemPatch,
    ReferenceSolution, StartCode, Tags, VisibleTestCase,
};

use super::error::ApiError;
use crate::repository::{ProblemRecord, ProblemSummaryRecord, SubmissionRecord, VideoRecord};
use crate::service::ProblemView;

pub fn parse_problem_id(raw: &str) -> Result<ProblemId, ApiError> {
    ProblemId::from_str(raw).map_err(|_| ApiError::invalid_id(raw))
}

pub fn tags_from_field(field: TagsField) -> Result<Tags, DomainError> {
    match field {
        TagsField::Delimited(value) => Tags::parse_delimited(&value),
        TagsField::List(labels) => Tags::parse_labels(labels),
    }
}

pub fn definition_from_request(
    request: CreateProblemRequest,
) -> Result<ProblemDefinition, DomainError> {
    Ok(ProblemDefinition {
        title: request.title,
        description: request.description,
        difficulty: Difficulty::from_str(&request.difficulty)?,
        tags: tags_from_field(request.tags)?,
        visible_test_cases: request.visible_test_cases.into_iter().map(visible).collect(),
        hidden_test_cases: request.hidden_test_cases.into_iter().map(hidden).collect(),
        start_code: request.start_code.into_iter().map(start_code).collect(),
        reference_solutions: request
            .reference_solution
            .into_iter()
            .map(reference_solution)
            .collect(),
    })
}

/// `null` entries inside a collection are treated like incomplete ones and
/// discarded here.
pub fn patch_from_request(request: UpdateProblemRequest) -> Result<ProblemPatch, DomainError> {
    Ok(ProblemPatch {
        title: request.title,
        description: request.description,
        difficulty: request
            .difficulty
            .as_deref()
            .map(Difficulty::from_str)
            .transpose()?,
        tags: request.tags.map(tags_from_field).transpose()?,
        visible_test_cases: request.visible_test_cases.map(|cases| flatten(cases, visible)),
        hidden_test_cases: request.hidden_test_cases.map(|cases| flatten(cases, hidden)),
        start_code: request.start_code.map(|codes| flatten(codes, start_code)),
        reference_solutions: request
            .reference_solution
            .map(|solutions| flatten(solutions, reference_solution)),
    })
}

fn flatten<D, T>(entries: Vec<Option<D>>, convert: fn(D) -> T) -> Vec<T> {
    entries.into_iter().flatten().map(convert).collect()
}

fn visible(dto: VisibleTestCaseDto) -> VisibleTestCase {
    VisibleTestCase {
        input: dto.input,
        output: dto.output,
        explanation: dto.explanation,
    }
}

fn hidden(dto: HiddenTestCaseDto) -> HiddenTestCase {
    HiddenTestCase {
        input: dto.input,
        output: dto.output,
    }
}

fn start_code(dto: StartCodeDto) -> StartCode {
    StartCode {
        language: dto.language,
        initial_code: dto.initial_code,
    }
}

fn reference_solution(dto: ReferenceSolutionDto) -> ReferenceSolution {
    ReferenceSolution {
        language: dto.language,
        complete_code: dto.complete_code,
    }
}

pub fn problem_detail(view: ProblemView) -> ProblemDetail {
    let mut detail = record_detail(view.problem);
    detail.video = view.video.map(video_metadata);
    detail
}

fn record_detail(record: ProblemRecord) -> ProblemDetail {
    ProblemDetail {
        id: record.id.to_string(),
        title: record.title,
        description: record.description,
        difficulty: record.difficulty.to_string(),
        tags: record.tags.to_canonical(),
        visible_test_cases: record
            .visible_test_cases
            .into_iter()
            .map(|case| VisibleTestCaseDto {
                input: case.input,
                output: case.output,
                explanation: case.explanation,
            })
            .collect(),
        hidden_test_cases: None,
        start_code: record
            .start_code
            .into_iter()
            .map(|code| StartCodeDto {
                language: code.language,
                initial_code: code.initial_code,
            })
            .collect(),
        reference_solution: record
            .reference_solutions
            .into_iter()
            .map(|solution| ReferenceSolutionDto {
                language: solution.language,
                complete_code: solution.complete_code,
            })
            .collect(),
        video: None,
    }
}

/// Full document for the author, hidden test cases included.
pub fn authoring_detail(record: ProblemRecord) -> ProblemDetail {
    let hidden_test_cases = record
        .hidden_test_cases
        .iter()
        .map(|case| HiddenTestCaseDto {
            input: case.input.clone(),
            output: case.output.clone(),
        })
        .collect();
    let mut detail = record_detail(record);
    detail.hidden_test_cases = Some(hidden_test_cases);
    detail
}

fn video_metadata(video: VideoRecord) -> VideoMetadata {
    VideoMetadata {
        secure_url: video.secure_url,
        thumbnail_url: video.thumbnail_url,
        duration: video.duration,
    }
}

pub fn problem_summary(record: ProblemSummaryRecord) -> ProblemSummary {
    ProblemSummary {
        id: record.id.to_string(),
        title: record.title,
        difficulty: record.difficulty.to_string(),
        tags: record.tags.to_canonical(),
    }
}

pub fn submission_view(record: SubmissionRecord) -> SubmissionView {
    SubmissionView {
        id: record.id.to_string(),
        problem_id: record.problem_id.to_string(),
        language: record.language.to_string(),
        status: record.status.as_str().to_string(),
        code: record.source_code,
        test_cases_passed: record.test_cases_passed,
        test_cases_total: record.test_cases_total,
        runtime_ms: record.runtime_ms,
        memory_kb: record.memory_kb,
        error_message: record.error_message,
        created_at: record.created_at.and_utc().to_rfc3339(),
    }
}
