//! Foundation value objects shared across the domain.

mod bilingual;
mod errors;
mod ids;
mod language;
mod percentage;
mod state_machine;
mod timestamp;

pub use bilingual::BilingualText;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CategoryId, MessageId, ProductId, SetupSessionId, StoreId, UserId};
pub use language::Language;
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
