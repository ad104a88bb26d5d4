//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    widgets::{Table, TableState},
    Frame,
};

/// Render a table that keeps the selected row visible.
///
/// # Example
/// ```ignore
/// let table = Table::new(rows, widths).block(block);
/// render_scrollable_table(frame, area, table, app.state.campaigns.selected_row);
/// ```
pub fn render_scrollable_table(frame: &mut Frame, area: Rect, table: Table, selected_row: usize) {
    let mut table_state = TableState::default().with_selected(Some(selected_row));
    frame.render_stateful_widget(table, area, &mut table_state);
}
