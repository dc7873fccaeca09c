pub mod applicant;
pub mod application;
pub mod company;
pub mod employee;
pub mod job;
pub mod posting;
pub mod resume;
