use sea_orm::entity::prelude::*;

/// The nested collections are stored as JSON arrays in text columns.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "problem")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub difficulty: i16,
    pub tags: String,
    #[sea_orm(column_type = "Text")]
    pub visible_test_cases: String,
    #[sea_orm(column_type = "Text")]
    pub hidden_test_cases: String,
    #[sea_orm(column_type = "Text")]
    pub start_code: String,
    #[sea_orm(column_type = "Text")]
    pub reference_solution: String,
    pub problem_creator: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ProblemCreator",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(has_many = "super::submission::Entity")]
    Submission,
    #[sea_orm(has_many = "super::solved_problem::Entity")]
    SolvedProblem,
    #[sea_orm(has_one = "super::solution_video::Entity")]
    SolutionVideo,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::solved_problem::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SolvedProblem.def()
    }
}

impl Related<super::solution_video::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SolutionVideo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
