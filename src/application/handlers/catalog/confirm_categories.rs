//! ConfirmCategoriesHandler - turns curated category candidates into draft
//! rows.
//!
//! Each selected candidate becomes one insert. Inserts are independent: a
//! failure is recorded and the loop continues, nothing is rolled back. Only
//! a fully successful batch advances the session to the Products step at
//! its 50% checkpoint; a batch that lost items leaves the step alone so the
//! merchant can retry the failures.

use std::sync::Arc;

use crate::domain::catalog::{CandidateSet, CatalogError, DraftCategory};
use crate::domain::conversation::CategorySuggestion;
use crate::domain::foundation::{BilingualText, SetupSessionId};
use crate::domain::session::{SetupSession, SetupStep};
use crate::ports::{CategoryRepository, SessionRepository};

/// Command carrying the curated candidate pool.
#[derive(Debug, Clone)]
pub struct ConfirmCategoriesCommand {
    pub session_id: SetupSessionId,
    pub candidates: CandidateSet<CategorySuggestion>,
}

/// One candidate that failed to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedInsert {
    pub name_en: String,
    pub error: String,
}

/// Outcome of a confirmation batch.
#[derive(Debug, Clone)]
pub struct ConfirmCategoriesResult {
    pub inserted: Vec<DraftCategory>,
    pub failed: Vec<FailedInsert>,
    pub session: SetupSession,
}

/// Handler for confirming category selections.
pub struct ConfirmCategoriesHandler {
    sessions: Arc<dyn SessionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ConfirmCategoriesHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            sessions,
            categories,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmCategoriesCommand,
    ) -> Result<ConfirmCategoriesResult, CatalogError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await
            .map_err(|e| CatalogError::infrastructure(e.to_string()))?
            .ok_or_else(|| {
                CatalogError::infrastructure(format!("Session not found: {}", cmd.session_id))
            })?;

        let mut inserted = Vec::new();
        let mut failed = Vec::new();

        for suggestion in cmd.candidates.into_selected() {
            match Self::to_draft(cmd.session_id, &suggestion) {
                Ok(category) => match self.categories.save(&category).await {
                    Ok(()) => inserted.push(category),
                    Err(e) => {
                        tracing::warn!(name = %suggestion.name_en, error = %e, "category insert failed");
                        failed.push(FailedInsert {
                            name_en: suggestion.name_en.clone(),
                            error: e.to_string(),
                        });
                    }
                },
                Err(e) => failed.push(FailedInsert {
                    name_en: suggestion.name_en.clone(),
                    error: e.to_string(),
                }),
            }
        }

        // The whole batch made it: move the walk forward. A re-confirmation
        // while already at or past Products keeps the step where it is.
        if failed.is_empty()
            && !inserted.is_empty()
            && session.current_step().index() < SetupStep::Products.index()
        {
            session.advance_to(SetupStep::Products)?;
            self.sessions
                .update(&session)
                .await
                .map_err(|e| CatalogError::infrastructure(e.to_string()))?;
        }

        Ok(ConfirmCategoriesResult {
            inserted,
            failed,
            session,
        })
    }

    fn to_draft(
        session_id: SetupSessionId,
        suggestion: &CategorySuggestion,
    ) -> Result<DraftCategory, CatalogError> {
        let name = BilingualText::name(&suggestion.name_ar, &suggestion.name_en)
            .map_err(|e| CatalogError::validation("name", e.to_string()))?;
        let description = match (&suggestion.description_ar, &suggestion.description_en) {
            (None, None) => None,
            (ar, en) => Some(BilingualText::free(
                ar.clone().unwrap_or_default(),
                en.clone().unwrap_or_default(),
            )),
        };
        Ok(DraftCategory::new(session_id, name, description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::DraftStatus;
    use crate::domain::foundation::{CategoryId, DomainError, ErrorCode, StoreId};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSessionRepository {
        sessions: Mutex<Vec<SetupSession>>,
    }

    impl MockSessionRepository {
        fn with(session: SetupSession) -> Self {
            Self {
                sessions: Mutex::new(vec![session]),
            }
        }

        fn current(&self) -> SetupSession {
            self.sessions.lock().unwrap()[0].clone()
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn save(&self, _session: &SetupSession) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update(&self, session: &SetupSession) -> Result<(), DomainError> {
            let mut sessions = self.sessions.lock().unwrap();
            sessions[0] = session.clone();
            Ok(())
        }

        async fn find_by_id(
            &self,
            id: &SetupSessionId,
        ) -> Result<Option<SetupSession>, DomainError> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id() == id)
                .cloned())
        }

        async fn find_active_by_store(
            &self,
            _store_id: &StoreId,
        ) -> Result<Option<SetupSession>, DomainError> {
            Ok(None)
        }
    }

    struct MockCategoryRepository {
        saved: Mutex<Vec<DraftCategory>>,
        /// English names whose insert should fail.
        fail_names: Vec<String>,
    }

    impl MockCategoryRepository {
        fn new() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_names: Vec::new(),
            }
        }

        fn failing_on(names: &[&str]) -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_names: names.iter().map(|s| s.to_string()).collect(),
            }
        }

        fn saved(&self) -> Vec<DraftCategory> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CategoryRepository for MockCategoryRepository {
        async fn save(&self, category: &DraftCategory) -> Result<(), DomainError> {
            if self.fail_names.iter().any(|n| n == &category.name().en) {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated insert failure",
                ));
            }
            self.saved.lock().unwrap().push(category.clone());
            Ok(())
        }

        async fn update(&self, _category: &DraftCategory) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            _id: &CategoryId,
        ) -> Result<Option<DraftCategory>, DomainError> {
            Ok(None)
        }

        async fn find_by_session(
            &self,
            _session_id: &SetupSessionId,
        ) -> Result<Vec<DraftCategory>, DomainError> {
            Ok(self.saved())
        }
    }

    fn suggestion(name_en: &str) -> CategorySuggestion {
        CategorySuggestion {
            name_ar: format!("{} (ar)", name_en),
            name_en: name_en.to_string(),
            description_ar: None,
            description_en: None,
        }
    }

    fn five_candidates() -> Vec<CategorySuggestion> {
        ["Fashion", "Shoes", "Bags", "Watches", "Perfume"]
            .iter()
            .map(|n| suggestion(n))
            .collect()
    }

    #[tokio::test]
    async fn confirming_three_of_five_persists_exactly_three_drafts() {
        let session = SetupSession::new(SetupSessionId::new(), StoreId::new());
        let sessions = Arc::new(MockSessionRepository::with(session.clone()));
        let categories = Arc::new(MockCategoryRepository::new());
        let handler = ConfirmCategoriesHandler::new(sessions.clone(), categories.clone());

        let result = handler
            .handle(ConfirmCategoriesCommand {
                session_id: *session.id(),
                candidates: CandidateSet::stage(five_candidates(), 3),
            })
            .await
            .unwrap();

        assert_eq!(result.inserted.len(), 3);
        assert!(result.failed.is_empty());
        let saved = categories.saved();
        assert_eq!(saved.len(), 3);
        assert!(saved.iter().all(|c| c.status() == DraftStatus::Draft));
        assert_eq!(saved[0].name().en, "Fashion");
    }

    #[tokio::test]
    async fn successful_batch_advances_to_products_at_fifty() {
        let session = SetupSession::new(SetupSessionId::new(), StoreId::new());
        let sessions = Arc::new(MockSessionRepository::with(session.clone()));
        let handler =
            ConfirmCategoriesHandler::new(sessions.clone(), Arc::new(MockCategoryRepository::new()));

        let result = handler
            .handle(ConfirmCategoriesCommand {
                session_id: *session.id(),
                candidates: CandidateSet::stage(five_candidates(), 3),
            })
            .await
            .unwrap();

        assert_eq!(result.session.current_step(), SetupStep::Products);
        assert_eq!(result.session.completion_percentage().value(), 50);
        assert_eq!(sessions.current().current_step(), SetupStep::Products);
    }

    #[tokio::test]
    async fn partial_failure_keeps_successes_and_holds_the_step() {
        // Inserts are independent: "Shoes" failing does not roll back
        // "Fashion" and "Bags", but the step does not advance either.
        let session = SetupSession::new(SetupSessionId::new(), StoreId::new());
        let sessions = Arc::new(MockSessionRepository::with(session.clone()));
        let categories = Arc::new(MockCategoryRepository::failing_on(&["Shoes"]));
        let handler = ConfirmCategoriesHandler::new(sessions.clone(), categories.clone());

        let result = handler
            .handle(ConfirmCategoriesCommand {
                session_id: *session.id(),
                candidates: CandidateSet::stage(five_candidates(), 3),
            })
            .await
            .unwrap();

        assert_eq!(result.inserted.len(), 2);
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].name_en, "Shoes");
        assert_eq!(categories.saved().len(), 2);
        assert_eq!(result.session.current_step(), SetupStep::Business);
        assert_eq!(sessions.current().current_step(), SetupStep::Business);
    }

    #[tokio::test]
    async fn removed_candidates_are_never_inserted() {
        let session = SetupSession::new(SetupSessionId::new(), StoreId::new());
        let sessions = Arc::new(MockSessionRepository::with(session.clone()));
        let categories = Arc::new(MockCategoryRepository::new());
        let handler = ConfirmCategoriesHandler::new(sessions, categories.clone());

        let mut candidates = CandidateSet::stage(five_candidates(), 5);
        candidates.remove(0).unwrap(); // "Fashion" leaves the pool
        candidates.toggle(0).unwrap(); // "Shoes" merely deselected

        handler
            .handle(ConfirmCategoriesCommand {
                session_id: *session.id(),
                candidates,
            })
            .await
            .unwrap();

        let names: Vec<_> = categories
            .saved()
            .iter()
            .map(|c| c.name().en.clone())
            .collect();
        assert_eq!(names, vec!["Bags", "Watches", "Perfume"]);
    }

    #[tokio::test]
    async fn reconfirming_at_products_keeps_step_and_percentage() {
        let mut session = SetupSession::new(SetupSessionId::new(), StoreId::new());
        session.advance_to(SetupStep::Products).unwrap();
        let sessions = Arc::new(MockSessionRepository::with(session.clone()));
        let handler =
            ConfirmCategoriesHandler::new(sessions.clone(), Arc::new(MockCategoryRepository::new()));

        let result = handler
            .handle(ConfirmCategoriesCommand {
                session_id: *session.id(),
                candidates: CandidateSet::stage(vec![suggestion("Toys")], 1),
            })
            .await
            .unwrap();

        assert_eq!(result.inserted.len(), 1);
        assert_eq!(result.session.current_step(), SetupStep::Products);
        assert_eq!(result.session.completion_percentage().value(), 50);
    }

    #[tokio::test]
    async fn candidate_with_missing_arabic_name_is_reported_not_inserted() {
        let session = SetupSession::new(SetupSessionId::new(), StoreId::new());
        let sessions = Arc::new(MockSessionRepository::with(session.clone()));
        let categories = Arc::new(MockCategoryRepository::new());
        let handler = ConfirmCategoriesHandler::new(sessions, categories.clone());

        let bad = CategorySuggestion {
            name_ar: "".to_string(),
            name_en: "Fashion".to_string(),
            description_ar: None,
            description_en: None,
        };

        let result = handler
            .handle(ConfirmCategoriesCommand {
                session_id: *session.id(),
                candidates: CandidateSet::stage(vec![bad], 1),
            })
            .await
            .unwrap();

        assert!(result.inserted.is_empty());
        assert_eq!(result.failed.len(), 1);
        assert!(categories.saved().is_empty());
    }

    #[tokio::test]
    async fn empty_selection_inserts_nothing_and_stays_put() {
        let session = SetupSession::new(SetupSessionId::new(), StoreId::new());
        let sessions = Arc::new(MockSessionRepository::with(session.clone()));
        let handler =
            ConfirmCategoriesHandler::new(sessions, Arc::new(MockCategoryRepository::new()));

        let result = handler
            .handle(ConfirmCategoriesCommand {
                session_id: *session.id(),
                candidates: CandidateSet::stage(five_candidates(), 0),
            })
            .await
            .unwrap();

        assert!(result.inserted.is_empty());
        assert_eq!(result.session.current_step(), SetupStep::Business);
    }
}
