//! Session lifecycle handlers.

mod resume_or_create;

pub use resume_or_create::{
    ResumeOrCreateCommand, ResumeOrCreateSessionHandler, SetupSnapshot,
};
