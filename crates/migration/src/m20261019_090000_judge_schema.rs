use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::Id, 36).primary_key())
                    .col(string_len(User::FirstName, 50))
                    .col(string_len(User::Email, 255).unique_key())
                    .col(timestamp(User::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(User::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Problem::Table)
                    .if_not_exists()
                    .col(string_len(Problem::Id, 36).primary_key())
                    .col(string_len(Problem::Title, 200).unique_key())
                    .col(text(Problem::Description))
                    // 0=easy, 1=medium, 2=hard
                    .col(
                        small_integer(Problem::Difficulty)
                            .check(Expr::col(Problem::Difficulty).gte(0))
                            .check(Expr::col(Problem::Difficulty).lte(2)),
                    )
                    // Canonical comma-delimited tag list, e.g. "array,dp".
                    .col(string_len(Problem::Tags, 100))
                    // The four collections below hold JSON arrays.
                    .col(text(Problem::VisibleTestCases))
                    .col(text(Problem::HiddenTestCases))
                    .col(text(Problem::StartCode))
                    .col(text(Problem::ReferenceSolution))
                    .col(string_len(Problem::ProblemCreator, 36))
                    .col(timestamp(Problem::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Problem::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-problem-problem_creator")
                            .from(Problem::Table, Problem::ProblemCreator)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Submission::Table)
                    .if_not_exists()
                    .col(string_len(Submission::Id, 36).primary_key())
                    .col(string_len(Submission::UserId, 36))
                    .col(string_len(Submission::ProblemId, 36))
                    // 0=rust, 1=cpp, 2=java, 3=python, 4=go, 5=javascript, 6=typescript
                    .col(
                        small_integer(Submission::Language)
                            .check(Expr::col(Submission::Language).gte(0))
                            .check(Expr::col(Submission::Language).lte(6)),
                    )
                    // 0=pending, 1=running, 2=accepted, 3=wrong_answer,
                    // 4=time_limit_exceeded, 5=runtime_error, 6=compile_error, 7=internal_error
                    .col(
                        small_integer(Submission::Status)
                            .check(Expr::col(Submission::Status).gte(0))
                            .check(Expr::col(Submission::Status).lte(7)),
                    )
                    .col(text(Submission::SourceCode))
                    .col(integer(Submission::TestCasesPassed).default(0))
                    .col(integer(Submission::TestCasesTotal).default(0))
                    .col(integer_null(Submission::RuntimeMs))
                    .col(integer_null(Submission::MemoryKb))
                    .col(text_null(Submission::ErrorMessage))
                    .col(timestamp(Submission::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Submission::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submission-user_id")
                            .from(Submission::Table, Submission::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submission-problem_id")
                            .from(Submission::Table, Submission::ProblemId)
                            .to(Problem::Table, Problem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submission_user_problem")
                    .table(Submission::Table)
                    .col(Submission::UserId)
                    .col(Submission::ProblemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SolvedProblem::Table)
                    .if_not_exists()
                    .col(string_len(SolvedProblem::UserId, 36))
                    .col(string_len(SolvedProblem::ProblemId, 36))
                    .col(timestamp(SolvedProblem::SolvedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .col(SolvedProblem::UserId)
                            .col(SolvedProblem::ProblemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-solved_problem-user_id")
                            .from(SolvedProblem::Table, SolvedProblem::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-solved_problem-problem_id")
                            .from(SolvedProblem::Table, SolvedProblem::ProblemId)
                            .to(Problem::Table, Problem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SolutionVideo::Table)
                    .if_not_exists()
                    .col(string_len(SolutionVideo::Id, 36).primary_key())
                    .col(string_len(SolutionVideo::ProblemId, 36).unique_key())
                    .col(text(SolutionVideo::SecureUrl))
                    .col(text(SolutionVideo::ThumbnailUrl))
                    .col(double(SolutionVideo::Duration))
                    .col(timestamp(SolutionVideo::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-solution_video-problem_id")
                            .from(SolutionVideo::Table, SolutionVideo::ProblemId)
                            .to(Problem::Table, Problem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SolutionVideo::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SolvedProblem::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Submission::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Problem::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    FirstName,
    Email,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Problem {
    Table,
    Id,
    Title,
    Description,
    Difficulty,
    Tags,
    VisibleTestCases,
    HiddenTestCases,
    StartCode,
    ReferenceSolution,
    ProblemCreator,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Submission {
    Table,
    Id,
    UserId,
    ProblemId,
    Language,
    Status,
    SourceCode,
    TestCasesPassed,
    TestCasesTotal,
    RuntimeMs,
    MemoryKb,
    ErrorMessage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SolvedProblem {
    Table,
    UserId,
    ProblemId,
    SolvedAt,
}

#[derive(DeriveIden)]
enum SolutionVideo {
    Table,
    Id,
    ProblemId,
    SecureUrl,
    ThumbnailUrl,
    Duration,
    CreatedAt,
}
