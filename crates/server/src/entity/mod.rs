pub mod problem;
pub mod solution_video;
pub mod solved_problem;
pub mod submission;
pub mod user;
