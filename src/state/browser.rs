/// The browser's state machine
///
/// All view state lives in one `BrowserState` value that changes only
/// through `apply`. Any action that changes the query hands back a
/// `FetchRequest` for the caller to execute; the state never performs I/O.
///
/// Each request is tagged with a ticket. Only the response for the most
/// recently issued ticket is applied, so a slow response can never
/// overwrite the results of a newer query.

use tracing::{debug, info, warn};

use super::data::EnrichedPhoto;
use super::query::{same_value, Filters, PhotoQuery, QueryState};
use crate::api::ApiError;

/// Identifies one issued request
pub type Ticket = u64;

/// A request the caller must send
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub ticket: Ticket,
    pub query: PhotoQuery,
}

#[derive(Debug, Clone)]
pub enum Action {
    SetLimit(f64),
    SetOffset(f64),
    /// Replace all three filters at once (form submission)
    SetFilters(Filters),
    /// A response arrived for `ticket`
    Loaded {
        ticket: Ticket,
        result: Result<Vec<EnrichedPhoto>, ApiError>,
    },
    /// Select the first photo with this id, or clear the selection
    Select(Option<f64>),
    /// Re-send the current query after a failure
    Retry,
}

#[derive(Debug, Default)]
pub struct BrowserState {
    query: QueryState,
    photos: Vec<EnrichedPhoto>,
    selection: Option<EnrichedPhoto>,
    error: Option<String>,
    /// Ticket of the newest issued request
    latest: Ticket,
    /// Ticket whose response produced `photos`
    results_ticket: Option<Ticket>,
    failed_ticket: Option<Ticket>,
}

impl BrowserState {
    /// Fresh state plus the initial request for the default query
    pub fn new() -> (Self, FetchRequest) {
        let mut state = Self::default();
        let request = state.issue();
        (state, request)
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Current result set, in server order
    pub fn photos(&self) -> &[EnrichedPhoto] {
        &self.photos
    }

    pub fn selection(&self) -> Option<&EnrichedPhoto> {
        self.selection.as_ref()
    }

    /// Message from the last failed request, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a request newer than the displayed results is outstanding
    pub fn is_loading(&self) -> bool {
        self.results_ticket != Some(self.latest) && self.failed_ticket != Some(self.latest)
    }

    pub fn results_ticket(&self) -> Option<Ticket> {
        self.results_ticket
    }

    /// Apply one action. Returns the request to send, if the action
    /// changed the query.
    pub fn apply(&mut self, action: Action) -> Option<FetchRequest> {
        match action {
            Action::SetLimit(limit) => {
                if same_value(self.query.limit, limit) {
                    return None;
                }
                self.query.limit = limit;
                Some(self.issue())
            }
            Action::SetOffset(offset) => {
                if same_value(self.query.offset, offset) {
                    return None;
                }
                self.query.offset = offset;
                Some(self.issue())
            }
            Action::SetFilters(filters) => {
                // A submission always counts as a change, even if identical
                self.query.filters = filters;
                Some(self.issue())
            }
            Action::Loaded { ticket, result } => {
                self.receive(ticket, result);
                None
            }
            Action::Select(id) => {
                self.selection = self.find(id).cloned();
                None
            }
            Action::Retry => Some(self.issue()),
        }
    }

    fn issue(&mut self) -> FetchRequest {
        self.latest += 1;
        let request = FetchRequest {
            ticket: self.latest,
            query: self.query.to_query(),
        };
        debug!(ticket = request.ticket, query = ?request.query, "issuing photo request");
        request
    }

    fn receive(&mut self, ticket: Ticket, result: Result<Vec<EnrichedPhoto>, ApiError>) {
        if ticket != self.latest {
            debug!(ticket, latest = self.latest, "dropping stale response");
            return;
        }

        match result {
            Ok(photos) => {
                info!(ticket, count = photos.len(), "result set replaced");
                self.photos = photos;
                self.results_ticket = Some(ticket);
                self.error = None;
                // Keep the selection only if it still exists in the new set
                let selected = self.selection.as_ref().map(|photo| photo.id);
                if let Some(id) = selected {
                    self.selection = self.find(id).cloned();
                }
            }
            Err(err) => {
                warn!(ticket, error = %err, "photo request failed");
                self.error = Some(err.to_string());
                self.failed_ticket = Some(ticket);
            }
        }
    }

    /// First photo in the current set with this id
    fn find(&self, id: Option<f64>) -> Option<&EnrichedPhoto> {
        self.photos.iter().find(|photo| photo.id == id)
    }
}
