//! Domain models for Skolaris.
//!
//! Only the types the isolation subsystem touches live here. The wider
//! school-management domain (enrollments, payments, grades) consumes
//! these through the repository traits.

pub mod course;
pub mod student;
pub mod tenant;
pub mod user;
