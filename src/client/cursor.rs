use crate::model::{LeaderboardPage, SortField, SortOrder, UserRecord};

/// Page size the client requests unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Parameters of the next `GET /api/users` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorParams {
    pub limit: u64,
    pub skip: u64,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub search: String,
}

impl CursorParams {
    pub fn new(limit: u64) -> Self {
        CursorParams {
            limit,
            skip: 0,
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            search: String::new(),
        }
    }

    /// Query string pairs, `search` is left out while empty.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("skip", self.skip.to_string()),
            ("sortField", self.sort_field.to_string()),
            ("sortOrder", self.sort_order.to_string()),
        ];
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        pairs
    }
}

impl Default for CursorParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Results become the whole list.
    Replace,
    /// Results are added to the end of the list.
    Append,
}

/// A fetch the cursor wants to run. Only the response to the latest issued generation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub params: CursorParams,
    pub mode: FetchMode,
}

/// Client side leaderboard state as a plain reducer.
///
/// Every state change that needs data returns a [`FetchRequest`] stamped with a new generation.
/// The caller runs it and hands the outcome back to [`CursorState::apply`], which drops it if a
/// newer request was issued in the meantime. A slow response to an old sort or search can
/// therefore never overwrite the list of a newer one.
#[derive(Debug, Clone)]
pub struct CursorState {
    users: Vec<UserRecord>,
    loading: bool,
    error: Option<String>,
    has_more: bool,
    params: CursorParams,
    generation: u64,
    //set until a replace succeeds, the list may still hold another sort or search
    pending_reset: bool,
}

impl CursorState {

    pub fn new(limit: u64) -> Self {
        CursorState {
            users: Vec::new(),
            loading: false,
            error: None,
            has_more: true,
            params: CursorParams::new(limit),
            generation: 0,
            pending_reset: true,
        }
    }

    fn issue(&mut self, mode: FetchMode) -> FetchRequest {
        if mode == FetchMode::Replace {
            self.pending_reset = true;
        }
        self.generation += 1;
        self.loading = true;
        self.error = None;
        FetchRequest { generation: self.generation, params: self.params.clone(), mode }
    }

    /// Reloads the first page with the current sort and search.
    pub fn refresh(&mut self) -> FetchRequest {
        self.params.skip = 0;
        self.issue(FetchMode::Replace)
    }

    /// Requests the next page. Does nothing while a fetch is running or when the server reported
    /// no further pages. If the last replace failed the first page is requested again instead.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if self.loading || !self.has_more {
            return None;
        }
        if self.pending_reset {
            return Some(self.refresh());
        }
        self.params.skip = self.params.skip.saturating_add(self.params.limit);
        Some(self.issue(FetchMode::Append))
    }

    pub fn update_sort(&mut self, field: SortField, order: SortOrder) -> FetchRequest {
        self.params.sort_field = field;
        self.params.sort_order = order;
        self.refresh()
    }

    pub fn update_search(&mut self, term: impl Into<String>) -> FetchRequest {
        self.params.search = term.into();
        self.refresh()
    }

    /// Applies the outcome of `request`. Returns `false` when the response was stale and ignored.
    /// A failure keeps the loaded users and only records the error.
    pub fn apply(&mut self, request: &FetchRequest, result: Result<LeaderboardPage, String>) -> bool {
        if request.generation != self.generation {
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                match request.mode {
                    FetchMode::Replace => {
                        self.users = page.users;
                        self.pending_reset = false;
                    }
                    FetchMode::Append => self.users.extend(page.users),
                }
                self.has_more = page.has_more;
                self.error = None;
            }
            Err(message) => {
                if request.mode == FetchMode::Append {
                    //the page was never loaded, so the next load_more asks for it again
                    self.params.skip = request.params.skip.saturating_sub(request.params.limit);
                }
                self.error = Some(message);
            }
        }
        true
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn params(&self) -> &CursorParams {
        &self.params
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            name: format!("user {id}"),
            wallet_address: String::new(),
            has_streaming_access: false,
            total_experience_points: 0,
            xp_multiplier: 1.0,
            tier: None,
            badge_count: None,
            global_rank: 0,
        }
    }

    fn page(ids: &[&str], has_more: bool) -> LeaderboardPage {
        LeaderboardPage { users: ids.iter().map(|id| record(id)).collect(), total: 100, has_more }
    }

    fn ids(state: &CursorState) -> Vec<&str> {
        state.users().iter().map(|user| user.id.as_str()).collect()
    }

    #[test]
    fn load_more_appends_next_page() {
        let mut state = CursorState::new(2);
        let first = state.refresh();
        assert!(state.apply(&first, Ok(page(&["a", "b"], true))));

        let next = state.load_more().unwrap();
        assert_eq!(next.mode, FetchMode::Append);
        assert_eq!(next.params.skip, 2);
        assert!(state.apply(&next, Ok(page(&["c"], false))));

        assert_eq!(ids(&state), vec!["a", "b", "c"]);
        assert!(!state.has_more());
        assert!(!state.is_loading());
        assert!(state.load_more().is_none());
    }

    #[test]
    fn load_more_is_ignored_while_loading() {
        let mut state = CursorState::new(2);
        let _first = state.refresh();
        assert!(state.load_more().is_none());
        assert_eq!(state.params().skip, 0);
    }

    #[test]
    fn sort_change_resets_and_replaces() {
        let mut state = CursorState::new(2);
        let first = state.refresh();
        state.apply(&first, Ok(page(&["a", "b"], true)));
        let more = state.load_more().unwrap();
        state.apply(&more, Ok(page(&["c", "d"], true)));

        let sorted = state.update_sort(SortField::Name, SortOrder::Ascending);
        assert_eq!(sorted.mode, FetchMode::Replace);
        assert_eq!(sorted.params.skip, 0);
        assert_eq!(sorted.params.sort_field, SortField::Name);
        state.apply(&sorted, Ok(page(&["x", "y"], true)));
        assert_eq!(ids(&state), vec!["x", "y"]);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = CursorState::new(2);
        let slow = state.update_search("al");
        let fast = state.update_search("ali");

        assert!(state.apply(&fast, Ok(page(&["alice"], false))));
        assert!(!state.apply(&slow, Ok(page(&["alan", "albert"], true))));

        assert_eq!(ids(&state), vec!["alice"]);
        assert!(!state.has_more());
        assert_eq!(state.params().search, "ali");
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut state = CursorState::new(2);
        let old = state.refresh();
        let _new = state.update_sort(SortField::XpMultiplier, SortOrder::Descending);
        state.apply(&old, Ok(page(&["a"], true)));
        assert!(state.is_loading());
        assert!(state.users().is_empty());
    }

    #[test]
    fn failure_keeps_users_and_allows_retry() {
        let mut state = CursorState::new(2);
        let first = state.refresh();
        state.apply(&first, Ok(page(&["a", "b"], true)));

        let more = state.load_more().unwrap();
        assert!(state.apply(&more, Err("Failed to fetch users".to_string())));
        assert_eq!(ids(&state), vec!["a", "b"]);
        assert_eq!(state.error(), Some("Failed to fetch users"));

        let retry = state.load_more().unwrap();
        assert_eq!(retry.params.skip, 2);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn failed_sort_change_reloads_first_page() {
        let mut state = CursorState::new(2);
        let first = state.refresh();
        state.apply(&first, Ok(page(&["xp-0", "xp-1"], true)));

        let sorted = state.update_sort(SortField::Name, SortOrder::Ascending);
        state.apply(&sorted, Err("Failed to fetch users".to_string()));
        assert_eq!(ids(&state), vec!["xp-0", "xp-1"]);

        let next = state.load_more().unwrap();
        assert_eq!(next.mode, FetchMode::Replace);
        assert_eq!(next.params.skip, 0);
        assert_eq!(next.params.sort_field, SortField::Name);
        state.apply(&next, Ok(page(&["name-0", "name-1"], true)));
        assert_eq!(ids(&state), vec!["name-0", "name-1"]);

        let more = state.load_more().unwrap();
        assert_eq!(more.mode, FetchMode::Append);
        assert_eq!(more.params.skip, 2);
    }

    #[test]
    fn failed_initial_load_is_retried_by_load_more() {
        let mut state = CursorState::new(2);
        let first = state.refresh();
        state.apply(&first, Err("Failed to fetch users".to_string()));

        let retry = state.load_more().unwrap();
        assert_eq!(retry.mode, FetchMode::Replace);
        assert_eq!(retry.params.skip, 0);
    }

    #[test]
    fn query_pairs_skip_empty_search() {
        let params = CursorParams::default();
        let pairs = params.to_query_pairs();
        assert_eq!(pairs, vec![
            ("limit", "20".to_string()),
            ("skip", "0".to_string()),
            ("sortField", "totalExperiencePoints".to_string()),
            ("sortOrder", "-1".to_string()),
        ]);

        let params = CursorParams { search: "ali".to_string(), sort_order: SortOrder::Ascending, ..CursorParams::default() };
        let pairs = params.to_query_pairs();
        assert!(pairs.contains(&("search", "ali".to_string())));
        assert!(pairs.contains(&("sortOrder", "1".to_string())));
    }
}
