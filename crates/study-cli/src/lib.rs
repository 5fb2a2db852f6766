pub mod admin;
pub mod seeder;
