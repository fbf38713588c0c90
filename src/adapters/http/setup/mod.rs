//! Setup flow endpoints: session resume, candidate confirmation, product
//! edits, and whole-session publication.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CandidateItem, ConfirmCategoriesRequest, ConfirmProductRequest, ResumeSessionRequest,
    SessionView, SetupSnapshotResponse, UpdateProductRequest,
};
pub use handlers::SetupHandlers;
pub use routes::setup_routes;
