//! List fetch lifecycle with stale-response protection.
//!
//! [`ListLoader`] is the headless state machine behind every record list:
//! `Idle → Loading → (Ready | Failed)`, re-entering `Loading` whenever the
//! query changes or a manual refetch is requested. The loader does not
//! perform I/O itself; callers take a [`RequestTicket`], run the round-trip,
//! and report back through [`ListLoader::complete`], which discards any
//! response whose ticket has been superseded in the meantime.

use std::collections::BTreeMap;

use crate::error::FetchError;
use crate::query::QueryState;

/// The materialized page of rows plus pagination metadata for one query.
///
/// Created fresh on every successful fetch; the previous result is replaced
/// wholesale, never merged or patched.
#[derive(Debug, Clone)]
pub struct FetchResult<T> {
    /// Rows of the current page, in server order.
    pub rows: Vec<T>,
    /// 0-based page index this result covers.
    pub page_index: usize,
    /// Page size this result was fetched with.
    pub page_size: usize,
    /// Total records ignoring filters.
    pub total: u64,
    /// Total records matching the active filters.
    pub total_filtered: u64,
    /// Number of pages for the active filters.
    pub total_pages: u64,
    /// Server echo of the filters it actually applied.
    pub applied_filters: BTreeMap<String, String>,
    /// Entity-specific aggregate counts (`allCount`, `upcomingCount`, ...).
    pub aggregates: BTreeMap<String, i64>,
}

impl<T> FetchResult<T> {
    /// Returns a named aggregate count, if the entity provides it.
    pub fn aggregate(&self, key: &str) -> Option<i64> {
        self.aggregates.get(key).copied()
    }
}

/// Identifies one issued request. Monotonically increasing per loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// A claim ticket for an in-flight request: the token to report back with
/// and the query the request must be made for.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    /// Token to pass to [`ListLoader::complete`].
    pub token: RequestToken,
    /// Query state the request was issued for.
    pub query: QueryState,
}

/// Loading phase of a [`ListLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// No request has been issued yet.
    Idle,
    /// A request is outstanding.
    Loading,
    /// The latest request succeeded.
    Ready,
    /// The latest request failed. Any previous result is retained.
    Failed,
}

/// Headless fetch state for one record list.
///
/// Exactly one outstanding request is authoritative at a time: issuing a new
/// ticket supersedes every earlier one, and a superseded response is
/// discarded on arrival instead of overwriting newer state.
///
/// # Example
///
/// ```
/// use salesdesk_lib::fetch::ListLoader;
/// use salesdesk_lib::query::QueryState;
///
/// let mut loader: ListLoader<String> = ListLoader::new(QueryState::new());
/// let ticket = loader.refetch();
/// assert!(loader.is_loading());
/// # let _ = ticket;
/// ```
#[derive(Debug)]
pub struct ListLoader<T> {
    query: QueryState,
    phase: LoadPhase,
    result: Option<FetchResult<T>>,
    error: Option<FetchError>,
    next_token: u64,
    outstanding: Option<RequestToken>,
}

impl<T> ListLoader<T> {
    /// Creates an idle loader for the given query.
    pub fn new(query: QueryState) -> Self {
        Self {
            query,
            phase: LoadPhase::Idle,
            result: None,
            error: None,
            next_token: 0,
            outstanding: None,
        }
    }

    /// Returns the current query state.
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Replaces the query state, issuing a new request only when it changed.
    ///
    /// Returns the ticket for the new request, or `None` when the query was
    /// equal to the current one (no refetch needed).
    pub fn set_query(&mut self, query: QueryState) -> Option<RequestTicket> {
        if query == self.query {
            return None;
        }
        self.query = query;
        Some(self.issue())
    }

    /// Unconditionally re-issues the current query.
    ///
    /// Used by manual refresh affordances; issues a new request even when
    /// the query state has not changed.
    pub fn refetch(&mut self) -> RequestTicket {
        self.issue()
    }

    fn issue(&mut self) -> RequestTicket {
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        self.outstanding = Some(token);
        self.phase = LoadPhase::Loading;
        RequestTicket {
            token,
            query: self.query.clone(),
        }
    }

    /// Reports the outcome of a request.
    ///
    /// Returns `true` if the outcome was applied. A response whose token is
    /// not the most recently issued one is stale and is discarded without
    /// touching any state. A failure keeps the previous result so the UI
    /// never flashes to empty.
    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<FetchResult<T>, FetchError>,
    ) -> bool {
        if self.outstanding != Some(token) {
            log::debug!("discarding stale list response for {:?}", token);
            return false;
        }
        self.outstanding = None;

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
                self.phase = LoadPhase::Ready;
            }
            Err(error) => {
                self.error = Some(error);
                self.phase = LoadPhase::Failed;
            }
        }
        true
    }

    /// Returns the current loading phase.
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Returns `true` while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Returns the most recently applied result, if any.
    ///
    /// Retained across failures and while a newer request is loading.
    pub fn result(&self) -> Option<&FetchResult<T>> {
        self.result.as_ref()
    }

    /// Returns the error of the latest failed request, if the latest
    /// applied outcome was a failure.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Clears the stored error (after it has been surfaced to the user).
    pub fn dismiss_error(&mut self) -> Option<FetchError> {
        self.error.take()
    }

    /// Returns the server's filter echo from the last successful fetch.
    pub fn applied_filters(&self) -> Option<&BTreeMap<String, String>> {
        self.result.as_ref().map(|r| &r.applied_filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_rows(rows: Vec<&str>) -> FetchResult<String> {
        FetchResult {
            rows: rows.into_iter().map(String::from).collect(),
            page_index: 0,
            page_size: 10,
            total: 2,
            total_filtered: 2,
            total_pages: 1,
            applied_filters: BTreeMap::new(),
            aggregates: BTreeMap::new(),
        }
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut loader = ListLoader::new(QueryState::new());

        let a = loader.refetch();
        let b = loader
            .set_query(QueryState::new().with_page(1))
            .expect("query changed");

        // B's response arrives first and wins.
        assert!(loader.complete(b.token, Ok(result_with_rows(vec!["b"]))));
        // A's late response must not overwrite B's.
        assert!(!loader.complete(a.token, Ok(result_with_rows(vec!["a"]))));

        assert_eq!(loader.result().unwrap().rows, vec!["b".to_string()]);
        assert_eq!(loader.phase(), LoadPhase::Ready);
    }

    #[test]
    fn failure_retains_previous_result() {
        let mut loader = ListLoader::new(QueryState::new());

        let first = loader.refetch();
        assert!(loader.complete(first.token, Ok(result_with_rows(vec!["kept"]))));

        let second = loader.refetch();
        assert!(loader.complete(
            second.token,
            Err(FetchError::rejected(500, "boom")),
        ));

        assert_eq!(loader.phase(), LoadPhase::Failed);
        assert_eq!(loader.result().unwrap().rows, vec!["kept".to_string()]);
        assert_eq!(loader.error().unwrap().status_code(), Some(500));
    }

    #[test]
    fn refetch_issues_even_when_query_is_unchanged() {
        let mut loader: ListLoader<String> = ListLoader::new(QueryState::new());

        assert!(loader.set_query(QueryState::new()).is_none());

        let ticket = loader.refetch();
        assert!(loader.is_loading());
        assert_eq!(ticket.query, QueryState::new());
    }

    #[tokio::test]
    async fn out_of_order_task_completion_applies_only_the_newest() {
        use tokio::sync::mpsc;
        use tokio::time::Duration;
        use tokio::time::sleep;

        let mut loader = ListLoader::new(QueryState::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // Request A is slow, request B (issued later) is fast.
        let a = loader.refetch();
        let b = loader
            .set_query(QueryState::new().with_filter("status", "NEW"))
            .unwrap();

        let tx_a = tx.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(30)).await;
            let _ = tx_a.send((a.token, result_with_rows(vec!["a"])));
        });
        let tx_b = tx.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(5)).await;
            let _ = tx_b.send((b.token, result_with_rows(vec!["b"])));
        });
        drop(tx);

        while let Some((token, result)) = rx.recv().await {
            loader.complete(token, Ok(result));
        }

        assert_eq!(loader.result().unwrap().rows, vec!["b".to_string()]);
    }
}
