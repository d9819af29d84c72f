//! Combobox coordinator.
//!
//! Wires the filter, the tree engine, the interaction controller, and the
//! viewport together:
//!
//! ```text
//! raw data -> filter (local search) -> engine -> rows -> viewport -> visible slice
//! ```
//!
//! Every event handler leaves `rows` re-derived before returning, so two
//! events never observe a half-updated state.

use std::time::Duration;
use tracing::{debug, debug_span};
use crate::app::TreeEngine;
use crate::cache::NodeIndex;
use crate::config::ComboboxConfig;
use crate::domain::{filter, tree_operations};
use crate::io::{AsyncChildLoader, LoadResult};
use crate::node::{FlatTreeNode, NodeId, TreeNode};
use crate::state::{InteractionState, ViewportState};
use crate::traits::SearchDelegate;
use crate::ui::input::key_handler::{self, Key, KeyResult, RowAction};
use crate::ui::virtual_scroll_manager::VirtualScrollManager;
use crate::ui::virtual_scrolling::VisibleRow;
use crate::utils::format_result_count;

/// A selected item as shown in the input's tag list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTag {
    pub id: NodeId,
    pub label: String,
}

/// Hierarchical multi-select combobox.
pub struct Combobox {
    config: ComboboxConfig,

    /// Unfiltered data as supplied by the embedder
    data: Vec<TreeNode>,
    /// Index over `data` (tag labels, expansion pruning)
    data_index: NodeIndex,

    engine: TreeEngine,
    interaction: InteractionState,
    viewport: ViewportState,

    /// Remote search hook; disables local filtering when set
    search_delegate: Option<Box<dyn SearchDelegate>>,

    /// Rows derived from the engine after the last event
    rows: Vec<FlatTreeNode>,
}

impl Default for Combobox {
    fn default() -> Self {
        Self::new(ComboboxConfig::default())
    }
}

impl Combobox {
    /// Creates an empty, closed combobox.
    pub fn new(config: ComboboxConfig) -> Self {
        Self {
            engine: TreeEngine::with_config(&config),
            viewport: config.viewport(),
            config,
            data: Vec::new(),
            data_index: NodeIndex::new(),
            interaction: InteractionState::new(),
            search_delegate: None,
            rows: Vec::new(),
        }
    }

    /// Builder-style data setter.
    pub fn with_data(mut self, data: Vec<TreeNode>) -> Self {
        self.set_data(data);
        self
    }

    /// Installs the background child loader.
    pub fn set_loader(&mut self, loader: AsyncChildLoader) {
        self.engine.set_loader(loader);
    }

    /// Installs a remote search delegate. Local filtering stops.
    pub fn set_search_delegate<D>(&mut self, delegate: D)
    where
        D: SearchDelegate + 'static,
    {
        self.search_delegate = Some(Box::new(delegate));
        self.rederive();
    }

    // ===== Data Flow =====

    /// Replaces the data.
    ///
    /// Expansion ids absent from the new data are pruned; the selection is
    /// left untouched. With a non-empty query the new tree is fully expanded
    /// again (when configured), since remote search results arrive here.
    pub fn set_data(&mut self, data: Vec<TreeNode>) {
        let _span = debug_span!("set_data", roots = data.len()).entered();
        self.data = data;
        self.data_index.rebuild(&self.data);
        self.engine.prune_expansion(&self.data_index);
        self.rebuild_tree();
        if !self.interaction.input_value().is_empty() && self.config.expand_all_on_search {
            self.engine.expand_all();
        }
        self.refresh_rows();
    }

    /// Merges loaded children into the data (sets `children`, marks loaded).
    ///
    /// # Returns
    /// `false` if `node_id` is not in the data.
    pub fn merge_children(&mut self, node_id: &str, children: Vec<TreeNode>) -> bool {
        if !tree_operations::merge_children(&mut self.data, node_id, children) {
            debug!(node_id, "merge target not found");
            return false;
        }
        self.data_index.rebuild(&self.data);
        self.rederive();
        true
    }

    /// Applies one completed load.
    ///
    /// Successful loads with children are merged. A load that returned
    /// nothing or failed changes nothing, so the node stays expandable.
    ///
    /// # Returns
    /// `true` if the data changed.
    pub fn apply_load(&mut self, result: LoadResult) -> bool {
        match result {
            LoadResult::Loaded { node_id, children: Some(children) } => {
                self.merge_children(&node_id, children)
            }
            LoadResult::Loaded { children: None, .. } | LoadResult::Failed { .. } => false,
        }
    }

    /// Collects and applies every completed load (non-blocking).
    ///
    /// # Returns
    /// The completed loads, for embedders that surface failures.
    pub fn poll_loads(&mut self) -> Vec<LoadResult> {
        let results = self.engine.poll_loads();
        let mut merged = false;
        for result in &results {
            if let LoadResult::Loaded { node_id, children: Some(children) } = result {
                merged |= tree_operations::merge_children(&mut self.data, node_id, children.clone());
            }
        }
        if merged {
            self.data_index.rebuild(&self.data);
            self.rederive();
        }
        results
    }

    /// Blocks up to `timeout` for the next completed load and applies it.
    pub fn wait_for_load(&mut self, timeout: Duration) -> Option<LoadResult> {
        let result = self.engine.wait_for_load(timeout)?;
        if let LoadResult::Loaded { node_id, children: Some(children) } = &result {
            self.merge_children(node_id, children.clone());
        }
        Some(result)
    }

    /// Handles a text input change.
    ///
    /// Opens the list and notifies the search delegate, or filters locally
    /// when there is none. A non-empty query expands everything; clearing the
    /// query under local filtering collapses everything.
    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.interaction.set_input_value(value);
        let query = self.interaction.input_value().to_owned();

        match &self.search_delegate {
            Some(delegate) => delegate.on_query_change(&query),
            None => self.rebuild_tree(),
        }

        if !query.is_empty() {
            if self.config.expand_all_on_search {
                self.engine.expand_all();
            }
        } else if self.search_delegate.is_none() && self.config.collapse_all_on_clear {
            self.engine.collapse_all();
        }

        self.refresh_rows();
        self.viewport.reset();
        // Row indices changed; the old active row is meaningless
        self.interaction.set_active_index(None);
    }

    // ===== Keyboard =====

    /// Handles one key press.
    ///
    /// # Returns
    /// Whether the host must suppress the key's default action.
    pub fn handle_key(&mut self, key: Key) -> KeyResult {
        let (is_open, active_index) = self.interaction.for_input_handler();
        let result = key_handler::handle_key(key, &self.rows, is_open, active_index);

        if let Some(action) = &result.action {
            self.apply_action(action);
        }
        if let Some(index) = self.interaction.active_index() {
            self.viewport.scroll_into_view(self.rows.len(), index);
        }
        result
    }

    fn apply_action(&mut self, action: &RowAction) {
        match action {
            RowAction::SelectSingle(id) => self.engine.toggle_selection(id, false),
            RowAction::SelectCascade(id) => self.engine.toggle_selection(id, true),
            RowAction::ToggleExpansion(id) => {
                self.engine.toggle_expansion(id);
            }
        }
        self.refresh_rows();
    }

    // ===== Pointer =====

    /// Row click: cascading select.
    pub fn click_row(&mut self, node_id: &str) {
        self.apply_action(&RowAction::SelectCascade(node_id.to_owned()));
    }

    /// Expander (chevron) click.
    pub fn click_expander(&mut self, node_id: &str) {
        self.apply_action(&RowAction::ToggleExpansion(node_id.to_owned()));
    }

    /// Tag remove button: deselects only that node.
    pub fn remove_tag(&mut self, node_id: &str) {
        self.apply_action(&RowAction::SelectSingle(node_id.to_owned()));
    }

    /// Pointer hover over a row.
    pub fn set_active_index(&mut self, index: Option<usize>) {
        self.interaction.set_active_index(index.filter(|&i| i < self.rows.len()));
    }

    pub fn open(&mut self) {
        self.interaction.open();
    }

    pub fn close(&mut self) {
        self.interaction.close();
    }

    /// Chevron button on the input.
    pub fn toggle(&mut self) {
        self.interaction.toggle();
    }

    /// Focus left the widget (click outside).
    pub fn blur(&mut self) {
        self.close();
    }

    // ===== Viewport =====

    /// Scroll notification from the list container.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.viewport.set_scroll_offset(offset);
    }

    /// Resize notification from the list container.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport.set_viewport_height(height);
    }

    // ===== View Model =====

    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    pub fn engine(&self) -> &TreeEngine {
        &self.engine
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn data(&self) -> &[TreeNode] {
        &self.data
    }

    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    pub fn is_open(&self) -> bool {
        self.interaction.is_open()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.interaction.active_index()
    }

    pub fn input_value(&self) -> &str {
        self.interaction.input_value()
    }

    /// The full row list.
    pub fn rows(&self) -> &[FlatTreeNode] {
        &self.rows
    }

    /// Rows to draw for the current scroll position.
    pub fn visible_rows(&self) -> Vec<VisibleRow<'_>> {
        VirtualScrollManager::collect_visible_rows(&self.rows, &self.viewport, self.active_index())
    }

    /// Height of the scrollable content.
    pub fn total_size(&self) -> f32 {
        self.viewport.layout(self.rows.len()).total_size()
    }

    /// Explicitly selected nodes present in the data, in tree order.
    pub fn selected_tags(&self) -> Vec<SelectedTag> {
        self.data_index
            .ids()
            .filter(|id| self.engine.is_selected(id))
            .filter_map(|id| {
                self.data_index.get(id).map(|entry| SelectedTag {
                    id: id.to_owned(),
                    label: entry.label.clone(),
                })
            })
            .collect()
    }

    /// Id of the keyboard-focused row, for `aria-activedescendant`.
    pub fn active_descendant_id(&self) -> Option<&str> {
        let index = self.interaction.active_index()?;
        self.rows.get(index).map(|row| row.id.as_str())
    }

    /// Live-region text while open.
    pub fn announcement(&self) -> Option<String> {
        self.is_open().then(|| format_result_count(self.rows.len()))
    }

    /// Placeholder text for an empty list.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.rows.is_empty() {
            return None;
        }
        Some(if self.input_value().is_empty() {
            "No items"
        } else {
            "No results found"
        })
    }

    // ===== Derivation =====

    /// Re-filters the data into the engine and re-derives rows.
    fn rederive(&mut self) {
        self.rebuild_tree();
        self.refresh_rows();
    }

    fn rebuild_tree(&mut self) {
        let tree = if self.search_delegate.is_some() {
            self.data.clone()
        } else {
            filter::filter_tree(&self.data, self.interaction.input_value()).into_owned()
        };
        self.engine.set_tree(tree);
    }

    fn refresh_rows(&mut self) {
        self.rows = self.engine.flat_list();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample() -> Vec<TreeNode> {
        vec![
            TreeNode::new("1", "Parent 1").with_children(vec![
                TreeNode::new("1-1", "Child 1-1"),
                TreeNode::new("1-2", "Child 1-2"),
            ]),
            TreeNode::new("2", "Parent 2").with_children(vec![]),
        ]
    }

    fn row_ids(combobox: &Combobox) -> Vec<&str> {
        combobox.rows().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_local_search_filters_and_expands() {
        let mut combobox = Combobox::default().with_data(sample());
        combobox.set_input_value("child 1-1");
        assert!(combobox.is_open());
        assert_eq!(row_ids(&combobox), vec!["1", "1-1"]);

        combobox.set_input_value("");
        assert_eq!(row_ids(&combobox), vec!["1", "2"]);
    }

    #[test]
    fn test_no_match_message() {
        let mut combobox = Combobox::default().with_data(sample());
        combobox.set_input_value("zzz");
        assert!(combobox.rows().is_empty());
        assert_eq!(combobox.empty_message(), Some("No results found"));

        let empty = Combobox::default();
        assert_eq!(empty.empty_message(), Some("No items"));
    }

    #[test]
    fn test_delegate_bypasses_local_filter() {
        let queries = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&queries);

        let mut combobox = Combobox::default().with_data(sample());
        combobox.set_search_delegate(move |q: &str| seen.borrow_mut().push(q.to_owned()));
        combobox.set_input_value("zzz");

        assert_eq!(*queries.borrow(), vec!["zzz".to_string()]);
        // Data is not filtered locally; expand-all still applies
        assert_eq!(row_ids(&combobox), vec!["1", "1-1", "1-2", "2"]);

        // Remote results arrive and get expanded
        combobox.set_data(vec![TreeNode::new("9", "Remote")
            .with_children(vec![TreeNode::new("9-1", "zzz")])]);
        assert_eq!(row_ids(&combobox), vec!["9", "9-1"]);
    }

    #[test]
    fn test_click_row_cascades_and_remove_tag_does_not() {
        let mut combobox = Combobox::default().with_data(sample());
        combobox.click_row("1");
        let tags: Vec<String> = combobox.selected_tags().into_iter().map(|t| t.id).collect();
        assert_eq!(tags, vec!["1", "1-1", "1-2"]);

        combobox.remove_tag("1-1");
        let tags: Vec<String> = combobox.selected_tags().into_iter().map(|t| t.id).collect();
        assert_eq!(tags, vec!["1", "1-2"]);
    }

    #[test]
    fn test_keyboard_flow() {
        let mut combobox = Combobox::default().with_data(sample());
        combobox.handle_key(Key::ArrowDown);
        assert!(combobox.is_open());
        assert_eq!(combobox.active_descendant_id(), Some("1"));

        let result = combobox.handle_key(Key::ArrowRight);
        assert!(result.prevent_default);
        assert_eq!(row_ids(&combobox), vec!["1", "1-1", "1-2", "2"]);

        combobox.handle_key(Key::ArrowDown);
        combobox.handle_key(Key::Space);
        assert!(combobox.engine().is_selected("1-1"));
        assert!(combobox.rows()[0].is_indeterminate);

        combobox.handle_key(Key::ArrowLeft);
        assert_eq!(combobox.active_index(), Some(0));

        combobox.handle_key(Key::Escape);
        assert!(!combobox.is_open());
        assert_eq!(combobox.active_descendant_id(), None);
    }

    #[test]
    fn test_announcement_only_when_open() {
        let mut combobox = Combobox::default().with_data(sample());
        assert_eq!(combobox.announcement(), None);
        combobox.open();
        assert_eq!(combobox.announcement().as_deref(), Some("2 results available."));
        combobox.blur();
        assert!(!combobox.is_open());
    }

    #[test]
    fn test_set_data_prunes_expansion_keeps_selection() {
        let mut combobox = Combobox::default().with_data(sample());
        combobox.click_expander("1");
        combobox.click_row("1-2");
        combobox.set_data(vec![TreeNode::new("2", "Parent 2")]);
        assert!(!combobox.engine().is_expanded("1"));
        assert!(combobox.engine().is_selected("1-2"));
        assert!(combobox.selected_tags().is_empty());
    }

    #[test]
    fn test_keyboard_scrolls_active_row_into_view() {
        let config = ComboboxConfig {
            item_height: 10.0,
            viewport_height: 30.0,
            ..Default::default()
        };
        let mut combobox = Combobox::new(config).with_data(crate::io::generate_flat(50));
        combobox.handle_key(Key::ArrowDown);
        for _ in 0..5 {
            combobox.handle_key(Key::ArrowDown);
        }
        assert_eq!(combobox.active_index(), Some(5));
        assert_eq!(combobox.viewport().scroll_offset(), 30.0);

        combobox.handle_key(Key::Home);
        assert_eq!(combobox.viewport().scroll_offset(), 0.0);
    }

    #[test]
    fn test_total_size() {
        let combobox = Combobox::default().with_data(crate::io::generate_flat(10));
        assert_eq!(combobox.total_size(), 320.0);
        assert!(!combobox.visible_rows().is_empty());
    }
}
