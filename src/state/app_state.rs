//! Application state definitions

use super::agent_page::AgentPage;
use super::campaigns::CampaignList;
use super::forms::CampaignCreateForm;
use super::toast::Toast;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Campaigns,
    AgentForm,
}

impl View {
    pub fn is_form_view(&self) -> bool {
        matches!(self, Self::AgentForm)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Campaigns => "Campaigns",
            Self::AgentForm => "Agent",
        }
    }
}

/// Campaign waiting for delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub campaign_id: String,
    pub campaign_name: String,
    /// Delete is highlighted instead of Cancel
    pub delete_selected: bool,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Campaigns
    pub campaigns: CampaignList,
    /// Keystrokes go to the search box
    pub search_focused: bool,
    pub create_campaign: Option<CampaignCreateForm>,
    pub pending_delete: Option<PendingDelete>,

    // Agent form, present while the view is open
    pub agent_page: Option<AgentPage>,

    pub toasts: Vec<Toast>,
}

impl AppState {
    pub fn new(campaigns: CampaignList) -> Self {
        Self {
            campaigns,
            ..Default::default()
        }
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Drop toasts that have been shown long enough
    pub fn prune_toasts(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Most recent toast, shown in the status bar
    pub fn latest_toast(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// True while a modal dialog owns the keyboard
    pub fn has_dialog(&self) -> bool {
        self.create_campaign.is_some() || self.pending_delete.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::campaigns::sample_campaigns;
    use crate::state::toast::ToastKind;

    #[test]
    fn test_default_view_is_campaigns() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Campaigns);
        assert!(!state.current_view.is_form_view());
        assert!(View::AgentForm.is_form_view());
    }

    #[test]
    fn test_latest_toast_is_last_pushed() {
        let mut state = AppState::new(CampaignList::new(sample_campaigns()));
        assert!(state.latest_toast().is_none());
        state.push_toast(Toast::success("first"));
        state.push_toast(Toast::error("second"));

        let toast = state.latest_toast().unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.kind, ToastKind::Error);

        state.prune_toasts();
        assert_eq!(state.toasts.len(), 2);
    }

    #[test]
    fn test_has_dialog() {
        let mut state = AppState::default();
        assert!(!state.has_dialog());
        state.create_campaign = Some(CampaignCreateForm::new());
        assert!(state.has_dialog());
        state.create_campaign = None;
        state.pending_delete = Some(PendingDelete {
            campaign_id: "1".to_string(),
            campaign_name: "Q1 Lead Outreach".to_string(),
            delete_selected: false,
        });
        assert!(state.has_dialog());
    }
}
