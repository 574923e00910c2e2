use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::{ErrorKind, GenerationError};
use crate::ingredients::IngredientList;
use crate::models::{Recipe, RecipeCard};

/// Exactly one of these holds at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(Vec<Recipe>),
    Failed { kind: ErrorKind, message: String },
}

impl RequestState {
    /// True when the user may start another generation.
    pub(crate) fn is_ready(&self) -> bool {
        !matches!(self, RequestState::Loading)
    }
}

/// Handle for one generation cycle. Only the newest ticket may complete it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// In-memory state of the single session: ingredients plus the request cycle.
#[derive(Debug)]
pub struct Session {
    ingredients: IngredientList,
    request: RequestState,
    latest: u64,
    updated_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(IngredientList::default())
    }
}

impl Session {
    pub fn new(ingredients: IngredientList) -> Self {
        Self {
            ingredients,
            request: RequestState::Idle,
            latest: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    pub(crate) fn request(&self) -> &RequestState {
        &self.request
    }

    pub fn add_ingredient(&mut self, raw: &str) -> bool {
        let changed = self.ingredients.add(raw);
        if changed {
            self.touch();
        }
        changed
    }

    pub fn remove_ingredient(&mut self, name: &str) -> bool {
        let changed = self.ingredients.remove(name);
        if changed {
            self.touch();
        }
        changed
    }

    /// Start a cycle. An empty list fails straight away without entering
    /// `Loading`; otherwise any previous outcome is cleared and the caller
    /// gets the ingredients to send along with its ticket.
    pub fn begin(&mut self) -> Result<(Ticket, IngredientList), GenerationError> {
        if self.ingredients.is_empty() {
            let err = GenerationError::Validation;
            self.fail(&err);
            return Err(err);
        }
        self.latest += 1;
        self.request = RequestState::Loading;
        self.touch();
        Ok((Ticket(self.latest), self.ingredients.clone()))
    }

    /// Apply the outcome of the cycle behind `ticket`. Returns false and
    /// leaves the state alone when a newer cycle has started since, or when
    /// this cycle already completed.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<Vec<Recipe>, GenerationError>) -> bool {
        if ticket.0 != self.latest {
            debug!("Discarding stale generation result (ticket {} < {})", ticket.0, self.latest);
            return false;
        }
        if self.request != RequestState::Loading {
            debug!("Ticket {} already completed", ticket.0);
            return false;
        }
        match outcome {
            Ok(recipes) => {
                self.request = RequestState::Success(recipes);
                self.touch();
            }
            Err(err) => self.fail(&err),
        }
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            ingredients: self.ingredients.clone(),
            state: StateView::from(&self.request),
            updated_at: self.updated_at,
        }
    }

    fn fail(&mut self, err: &GenerationError) {
        self.request = RequestState::Failed {
            kind: err.kind(),
            message: err.user_message(),
        };
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Wire form of [`RequestState`].
#[derive(Debug, Serialize, Clone)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StateView {
    Idle,
    Loading,
    Success { recipes: Vec<RecipeCard> },
    Failed { kind: ErrorKind, message: String },
}

impl From<&RequestState> for StateView {
    fn from(state: &RequestState) -> Self {
        match state {
            RequestState::Idle => StateView::Idle,
            RequestState::Loading => StateView::Loading,
            RequestState::Success(recipes) => StateView::Success {
                recipes: recipes.iter().map(RecipeCard::from).collect(),
            },
            RequestState::Failed { kind, message } => StateView::Failed {
                kind: *kind,
                message: message.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub ingredients: IngredientList,
    pub state: StateView,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GENERIC_FAILURE_MESSAGE;
    use pretty_assertions::assert_eq;

    fn recipe(name: &str) -> Recipe {
        Recipe {
            name: name.into(),
            ingredients: vec!["rice".into()],
            instructions: vec!["cook".into()],
        }
    }

    #[test]
    fn starts_seeded_and_idle() {
        let session = Session::default();
        assert_eq!(session.ingredients().len(), 3);
        assert_eq!(session.request(), &RequestState::Idle);
        assert!(session.request().is_ready());
    }

    #[test]
    fn full_cycle_to_success() {
        let mut session = Session::default();
        assert!(session.add_ingredient("Rice"));
        assert_eq!(session.ingredients().len(), 4);

        let (ticket, sent) = session.begin().unwrap();
        assert_eq!(sent.len(), 4);
        assert_eq!(session.request(), &RequestState::Loading);
        assert!(!session.request().is_ready());

        assert!(session.complete(ticket, Ok(vec![recipe("Fried Rice")])));
        assert_eq!(session.request(), &RequestState::Success(vec![recipe("Fried Rice")]));
        assert!(session.request().is_ready());

        // a completed ticket cannot move the state again
        assert!(!session.complete(ticket, Err(GenerationError::EmptyResponse)));
        assert_eq!(session.request(), &RequestState::Success(vec![recipe("Fried Rice")]));
    }

    #[test]
    fn begin_clears_previous_outcome() {
        let mut session = Session::default();
        let (ticket, _) = session.begin().unwrap();
        session.complete(ticket, Ok(vec![recipe("Soup")]));

        session.begin().unwrap();
        assert_eq!(session.request(), &RequestState::Loading);
    }

    #[test]
    fn failure_carries_generic_message() {
        let mut session = Session::default();
        let (ticket, _) = session.begin().unwrap();
        session.complete(ticket, Err(GenerationError::EmptyResponse));
        assert_eq!(
            session.request(),
            &RequestState::Failed {
                kind: ErrorKind::EmptyResponse,
                message: GENERIC_FAILURE_MESSAGE.to_string(),
            }
        );
    }

    #[test]
    fn empty_list_fails_without_loading() {
        let mut session = Session::new(IngredientList::empty());
        let err = session.begin().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            session.request(),
            &RequestState::Failed {
                kind: ErrorKind::Validation,
                message: "at least one ingredient required".to_string(),
            }
        );
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut session = Session::default();
        let (first, _) = session.begin().unwrap();
        let (second, _) = session.begin().unwrap();

        assert!(!session.complete(first, Ok(vec![recipe("Old")])));
        assert_eq!(session.request(), &RequestState::Loading);

        assert!(session.complete(second, Ok(vec![recipe("New")])));
        assert_eq!(session.request(), &RequestState::Success(vec![recipe("New")]));
    }

    #[test]
    fn snapshot_wire_format() {
        let mut session = Session::new(["Egg"].into_iter().collect());
        let (ticket, _) = session.begin().unwrap();
        session.complete(ticket, Ok(vec![recipe("Egg Fried Rice")]));

        let value = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(value["ingredients"], serde_json::json!(["Egg"]));
        assert_eq!(value["state"]["status"], "success");
        assert_eq!(value["state"]["recipes"][0]["recipeName"], "Egg Fried Rice");
        assert!(value["updatedAt"].is_string());

        let idle = serde_json::to_value(StateView::Idle).unwrap();
        assert_eq!(idle, serde_json::json!({"status": "idle"}));
    }
}
