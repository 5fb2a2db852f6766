pub mod controller;
pub mod router;
pub mod service;

pub use router::init_tutors_router;
pub use service::TutorService;
