pub mod controller;
pub mod router;
pub mod service;

pub use router::init_study_groups_router;
pub use service::StudyGroupService;
