//! Application state management for branchview.
//!
//! This module contains the `App` struct that owns the loaded directory
//! snapshot and all UI state: the active view mode, the search query and
//! filter selections, and the per-view list state.

use std::collections::HashSet;

use branchview_core::loader::{self, LoadError};
use branchview_core::{
    contacts_view, filter_branches, Branch, BranchFilter, BranchResponse, ContactEntry,
    ContactFilter, ContactSortKey, DataSource, LoadState, RoleFilter, StatusFilter, TypeFilter,
};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::Config;

// ============================================================================
// Constants
// ============================================================================

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Longest search query accepted from the keyboard
const MAX_QUERY_LENGTH: usize = 80;

// ============================================================================
// UI State Types
// ============================================================================

/// The three mutually exclusive presentations of the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Contacts,
    Map,
}

impl ViewMode {
    /// Get the display title for this view.
    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::List => "Avdelinger",
            ViewMode::Contacts => "Kontakter",
            ViewMode::Map => "Kart",
        }
    }

    /// Get the next view (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            ViewMode::List => ViewMode::Contacts,
            ViewMode::Contacts => ViewMode::Map,
            ViewMode::Map => ViewMode::List,
        }
    }

    /// Get the previous view (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            ViewMode::List => ViewMode::Map,
            ViewMode::Contacts => ViewMode::List,
            ViewMode::Map => ViewMode::Contacts,
        }
    }

    /// Contacts view filters by role; the others by type and status
    pub fn uses_role_filter(&self) -> bool {
        matches!(self, ViewMode::Contacts)
    }

    pub fn search_placeholder(&self) -> &'static str {
        if self.uses_role_filter() {
            "Søk etter kontakter..."
        } else {
            "Søk etter avdelinger..."
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// State owned by the branch card list
#[derive(Debug, Default)]
pub struct BranchListState {
    pub selection: usize,
    /// Branch ids of the cards currently expanded
    expanded: HashSet<String>,
}

impl BranchListState {
    pub fn is_expanded(&self, branch_id: &str) -> bool {
        self.expanded.contains(branch_id)
    }

    /// Flip one card between collapsed and expanded
    pub fn toggle(&mut self, branch_id: &str) {
        if !self.expanded.remove(branch_id) {
            self.expanded.insert(branch_id.to_string());
        }
    }
}

/// State owned by the contact grid
#[derive(Debug, Default)]
pub struct ContactListState {
    pub selection: usize,
    pub sort_key: ContactSortKey,
}

impl ContactListState {
    /// Switch the active sort key. Resets selection to 0.
    pub fn set_sort(&mut self, key: ContactSortKey) {
        self.sort_key = key;
        self.selection = 0;
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    pub source: DataSource,
    pub load: LoadState,

    // UI State
    pub state: AppState,
    pub view_mode: ViewMode,
    pub search_query: String,
    pub type_filter: TypeFilter,
    pub status_filter: StatusFilter,
    pub role_filter: RoleFilter,
    pub branch_list: BranchListState,
    pub contact_list: ContactListState,

    // One-shot dataset load
    load_rx: Option<oneshot::Receiver<Result<BranchResponse, LoadError>>>,
    load_task: Option<JoinHandle<()>>,
    config: Config,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Self {
        debug!(?config, "App::new()");
        Self {
            source: config.data_source(),
            load: LoadState::Pending,

            state: AppState::Normal,
            view_mode: ViewMode::List,
            search_query: String::new(),
            type_filter: TypeFilter::All,
            status_filter: config.default_status(),
            role_filter: RoleFilter::All,
            branch_list: BranchListState::default(),
            contact_list: ContactListState::default(),

            load_rx: None,
            load_task: None,
            config,
        }
    }

    // =========================================================================
    // Dataset Loading
    // =========================================================================

    /// Spawn the one-shot dataset load. Calling it again does nothing.
    pub fn start_loading(&mut self) {
        if self.load_rx.is_some() || !self.load.is_pending() {
            return;
        }

        let source = self.source.clone();
        let delay = self.config.load_delay();
        info!(source = %source.describe(), delay_ms = delay.as_millis() as u64, "Loading branch directory");

        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let result = loader::fetch(source, delay).await;
            if tx.send(result).is_err() {
                debug!("Viewer closed before the directory finished loading");
            }
        });

        self.load_rx = Some(rx);
        self.load_task = Some(handle);
    }

    /// Check whether the load has finished and record its outcome
    pub fn check_background_tasks(&mut self) {
        let Some(rx) = self.load_rx.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                if let Err(ref e) = result {
                    error!(error = %e, "Failed to load branch directory");
                }
                self.load.resolve(result);
                self.finish_loading();
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                error!("Load task ended without a result");
                self.load.fail("Lasting ble avbrutt");
                self.finish_loading();
            }
        }
    }

    fn finish_loading(&mut self) {
        self.load_rx = None;
        self.load_task = None;
        if let Some(response) = self.load.response() {
            debug!(branches = response.branches().len(), "Directory ready");
        }
    }

    /// App with the directory already loaded
    #[cfg(test)]
    pub fn with_response(config: Config, response: BranchResponse) -> Self {
        let mut app = Self::new(config);
        app.load.resolve(Ok(response));
        app
    }

    pub fn branches(&self) -> &[Branch] {
        self.load.response().map(|r| r.branches()).unwrap_or(&[])
    }

    // =========================================================================
    // Data Access Methods
    // =========================================================================

    pub fn branch_filter(&self) -> BranchFilter {
        BranchFilter {
            query: self.search_query.clone(),
            branch_type: self.type_filter,
            status: self.status_filter,
        }
    }

    pub fn contact_filter(&self) -> ContactFilter {
        ContactFilter {
            query: self.search_query.clone(),
            role: self.role_filter.clone(),
        }
    }

    /// Branches matching the current query, type and status
    pub fn visible_branches(&self) -> Vec<&Branch> {
        filter_branches(self.branches(), &self.branch_filter())
    }

    /// Contacts matching the current query and role, in the active sort order
    pub fn visible_contacts(&self) -> Vec<ContactEntry<'_>> {
        contacts_view(
            self.branches(),
            &self.contact_filter(),
            self.contact_list.sort_key,
        )
    }

    /// Number of rows in the list the current view shows
    fn visible_len(&self) -> usize {
        match self.view_mode {
            ViewMode::List => self.visible_branches().len(),
            ViewMode::Contacts => self.visible_contacts().len(),
            ViewMode::Map => 0,
        }
    }

    /// Branch under the cursor in the list view
    pub fn selected_branch(&self) -> Option<&Branch> {
        self.visible_branches()
            .get(self.branch_list.selection)
            .copied()
    }

    // =========================================================================
    // View, Filter and Selection Changes
    // =========================================================================

    pub fn set_view(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            debug!(from = ?self.view_mode, to = ?mode, "View changed");
            self.view_mode = mode;
        }
    }

    pub fn cycle_type_filter(&mut self) {
        self.type_filter = self.type_filter.next();
        self.branch_list.selection = 0;
    }

    pub fn cycle_status_filter(&mut self) {
        self.status_filter = self.status_filter.next();
        self.branch_list.selection = 0;
    }

    pub fn cycle_role_filter(&mut self) {
        self.role_filter = self.role_filter.next();
        self.contact_list.selection = 0;
    }

    pub fn push_query_char(&mut self, c: char) {
        if can_add_query_char(self.search_query.chars().count(), c) {
            self.search_query.push(c);
            self.reset_selections();
        }
    }

    pub fn pop_query_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.reset_selections();
        }
    }

    pub fn clear_query(&mut self) {
        if !self.search_query.is_empty() {
            self.search_query.clear();
            self.reset_selections();
        }
    }

    fn reset_selections(&mut self) {
        self.branch_list.selection = 0;
        self.contact_list.selection = 0;
    }

    /// Expand or collapse the selected branch card
    pub fn toggle_selected_card(&mut self) {
        let id = self.selected_branch().map(|b| b.branch_id.clone());
        if let Some(id) = id {
            self.branch_list.toggle(&id);
        }
    }

    /// Move the selection of the current view by `delta` rows, clamped
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.visible_len();
        let selection = match self.view_mode {
            ViewMode::List => &mut self.branch_list.selection,
            ViewMode::Contacts => &mut self.contact_list.selection,
            ViewMode::Map => return,
        };
        *selection = clamp_selection(*selection as isize + delta, len);
    }

    pub fn select_first(&mut self) {
        self.move_selection(isize::MIN / 2);
    }

    pub fn select_last(&mut self) {
        self.move_selection(isize::MAX / 2);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Cancel a load that is still in flight
        if let Some(handle) = self.load_task.take() {
            handle.abort();
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Clamp a wanted row into `0..len` (0 for an empty list)
fn clamp_selection(wanted: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    wanted.clamp(0, len as isize - 1) as usize
}

/// Check if a search character should be accepted
pub fn can_add_query_char(current_len: usize, c: char) -> bool {
    current_len < MAX_QUERY_LENGTH && !c.is_control()
}

// ============================================================================
// Tests
// ============================================================================
