//! In-memory calendar adapter.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::ports::{
    CalendarError, CalendarEventRef, CalendarEventRequest, CalendarResult, CalendarService,
};

/// Calendar that keeps registered events in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendarService {
    state: Arc<RwLock<InMemoryCalendarState>>,
}

#[derive(Debug, Default)]
struct InMemoryCalendarState {
    events: Vec<CalendarEventRequest>,
    unavailable: Option<String>,
}

impl InMemoryCalendarService {
    /// Creates an empty, available calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later registration fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Transport`] when lock acquisition fails.
    pub fn set_unavailable(&self, reason: impl Into<String>) -> CalendarResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.unavailable = Some(reason.into());
        Ok(())
    }

    /// Returns the registered events in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Transport`] when lock acquisition fails.
    pub fn events(&self) -> CalendarResult<Vec<CalendarEventRequest>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.events.clone())
    }
}

fn lock_error(err: impl std::fmt::Display) -> CalendarError {
    CalendarError::transport(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CalendarService for InMemoryCalendarService {
    async fn create_event(
        &self,
        request: &CalendarEventRequest,
    ) -> CalendarResult<CalendarEventRef> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(reason) = &state.unavailable {
            return Err(CalendarError::transport(std::io::Error::other(
                reason.clone(),
            )));
        }

        state.events.push(request.clone());
        Ok(CalendarEventRef {
            id: format!("event-{}", state.events.len()),
            link: None,
        })
    }
}
