//! Intent extractor adapters.

mod claude_extractor;
mod mock_extractor;

pub use claude_extractor::{ClaudeExtractorConfig, ClaudeIntentExtractor};
pub use mock_extractor::MockIntentExtractor;
