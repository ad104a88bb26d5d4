//! Application state and core logic

use crate::api::{ApiClient, CallboardApi};
use crate::config::TuiConfig;
use crate::platform::is_shortcut;
use crate::state::{
    sample_campaigns, AgentFieldId, AgentFormInitialData, AgentPage, AgentSection, AppState,
    CampaignCreateForm, CampaignList, DialogButton, Form, FormMode, LocalFile, PendingDelete, Toast,
    View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// REST API used by the agent form
    api: Box<dyn CallboardApi>,
    config: TuiConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create the app from user configuration
    pub fn new(config: TuiConfig) -> Result<Self> {
        let api = ApiClient::new(&config.api_base_url(), config.request_timeout())?;
        let campaigns = match &config.campaigns_file {
            Some(path) => CampaignList::load_file(path)?,
            None => sample_campaigns(),
        };
        tracing::info!(
            base_url = api.base_url(),
            campaigns = campaigns.len(),
            "Starting callboard"
        );
        Ok(Self::with_api(
            Box::new(api),
            CampaignList::new(campaigns),
            config,
        ))
    }

    pub fn with_api(api: Box<dyn CallboardApi>, campaigns: CampaignList, config: TuiConfig) -> Self {
        Self {
            state: AppState::new(campaigns),
            api,
            config,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_toast(Toast::error(message));
    }

    pub fn push_success(&mut self, message: impl Into<String>) {
        self.state.push_toast(Toast::success(message));
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Dialogs are modal
        if self.state.has_dialog() {
            if self.state.create_campaign.is_some() {
                self.handle_create_dialog_key(key);
            } else {
                self.handle_delete_dialog_key(key);
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Campaigns => self.handle_campaigns_key(key).await?,
            View::AgentForm => self.handle_agent_form_key(key).await?,
        }
        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        // Skip form views in history to go back to the last non-form view
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            if self.state.current_view == View::AgentForm {
                self.state.agent_page = None;
            }
            self.state.current_view = view;
            return;
        }
    }

    /// Handle keys in Campaigns view
    async fn handle_campaigns_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.search_focused {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Down => self.state.search_focused = false,
                KeyCode::Backspace => self.state.campaigns.pop_search_char(),
                KeyCode::Char(c) => self.state.campaigns.push_search_char(c),
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('/') => self.state.search_focused = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.campaigns.select_next_row(),
            KeyCode::Char('k') | KeyCode::Up => self.state.campaigns.select_prev_row(),
            KeyCode::Char('l') | KeyCode::Right => self.state.campaigns.next_page(),
            KeyCode::Char('h') | KeyCode::Left => self.state.campaigns.prev_page(),
            KeyCode::Char(' ') => {
                if let Some(id) = self.state.campaigns.selected().map(|c| c.id.clone()) {
                    self.state.campaigns.toggle_enabled(&id);
                }
            }
            KeyCode::Char('n') => self.state.create_campaign = Some(CampaignCreateForm::new()),
            KeyCode::Char('d') => {
                if let Some(campaign) = self.state.campaigns.selected() {
                    self.state.pending_delete = Some(PendingDelete {
                        campaign_id: campaign.id.clone(),
                        campaign_name: campaign.name.clone(),
                        delete_selected: false,
                    });
                }
            }
            KeyCode::Char('a') => {
                self.open_agent_form(FormMode::Create, AgentFormInitialData::default())
                    .await;
            }
            KeyCode::Char('e') => {
                if let Some(agent) = self.state.campaigns.selected().map(|c| c.agent.clone()) {
                    let initial = AgentFormInitialData {
                        agent_name: Some(agent),
                        ..Default::default()
                    };
                    self.open_agent_form(FormMode::Edit, initial).await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the create-campaign dialog
    fn handle_create_dialog_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.create_campaign.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc => {
                self.state.create_campaign = None;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left | KeyCode::Right if form.is_buttons_row_active() => {
                form.selected_button.toggle();
            }
            KeyCode::Left => {
                if let Some(field) = form.get_active_field_mut() {
                    field.select_prev();
                }
            }
            KeyCode::Right => {
                if let Some(field) = form.get_active_field_mut() {
                    field.select_next();
                }
            }
            KeyCode::Enter if form.is_buttons_row_active() => {
                let button = form.selected_button;
                match button {
                    DialogButton::Cancel => self.state.create_campaign = None,
                    DialogButton::Confirm => self.submit_create_campaign(),
                }
            }
            KeyCode::Enter => form.next_field(),
            KeyCode::Backspace => {
                if let Some(field) = form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            _ => {}
        }
    }

    fn submit_create_campaign(&mut self) {
        let Some(form) = self.state.create_campaign.as_ref() else {
            return;
        };
        let Some((name, call_type)) = form.submission() else {
            self.push_error("Campaign name is required.");
            return;
        };

        self.state.campaigns.create(&name, &call_type);
        self.state.create_campaign = None;
        self.push_success(format!("Campaign \"{name}\" created."));
    }

    /// Handle keys in the delete confirmation dialog
    fn handle_delete_dialog_key(&mut self, key: KeyEvent) {
        let Some(pending) = self.state.pending_delete.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => self.state.pending_delete = None,
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                pending.delete_selected = !pending.delete_selected;
            }
            KeyCode::Char('y') => self.confirm_delete(),
            KeyCode::Enter => {
                if pending.delete_selected {
                    self.confirm_delete();
                } else {
                    self.state.pending_delete = None;
                }
            }
            _ => {}
        }
    }

    fn confirm_delete(&mut self) {
        let Some(pending) = self.state.pending_delete.take() else {
            return;
        };
        if self.state.campaigns.delete(&pending.campaign_id).is_some() {
            tracing::info!(campaign = %pending.campaign_name, "Deleted campaign");
            self.push_success(format!("Campaign \"{}\" deleted.", pending.campaign_name));
        }
    }

    /// Open the agent form and fetch its reference data
    pub async fn open_agent_form(&mut self, mode: FormMode, initial: AgentFormInitialData) {
        let mut page = AgentPage::new(mode, &initial);
        if let Err(err) = page.reference.load(self.api.as_ref()).await {
            let message = page
                .reference
                .error
                .clone()
                .unwrap_or_else(|| err.message().to_string());
            self.push_error(message);
        }
        self.state.agent_page = Some(page);
        self.navigate(View::AgentForm);
    }

    /// Handle keys in the agent form
    async fn handle_agent_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(page) = self.state.agent_page.as_mut() else {
            return Ok(());
        };

        if is_shortcut(key.modifiers) {
            match key.code {
                KeyCode::Char('s') => self.save_agent().await,
                KeyCode::Char('t') => self.start_test_call().await,
                _ => {}
            }
            return Ok(());
        }

        let focused = page.focused();
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Tab => page.focus_next(),
            KeyCode::BackTab => page.focus_prev(),
            KeyCode::Left => page.adjust(false),
            KeyCode::Right => page.adjust(true),
            KeyCode::Enter => match focused {
                AgentFieldId::Section(_) => {
                    page.toggle_focused_section();
                }
                AgentFieldId::AllowHangUp
                | AgentFieldId::AllowCallback
                | AgentFieldId::LiveTransfer => page.toggle_focused_tool(),
                AgentFieldId::FilePath => self.upload_pending_files().await,
                AgentFieldId::StartTestCall => self.start_test_call().await,
                AgentFieldId::Save => self.save_agent().await,
                field if field.is_multiline() => page.insert_char('\n'),
                _ => page.focus_next(),
            },
            KeyCode::Char(' ') if !focused.is_text_input() => match focused {
                AgentFieldId::Section(_) => {
                    page.toggle_focused_section();
                }
                _ => page.toggle_focused_tool(),
            },
            KeyCode::Delete | KeyCode::Backspace if matches!(focused, AgentFieldId::UploadedFile(_)) => {
                page.remove_focused_upload();
            }
            KeyCode::Backspace => page.backspace(),
            KeyCode::Char(c) => page.insert_char(c),
            _ => {}
        }
        Ok(())
    }

    /// Save the open agent, reporting the outcome as a toast
    async fn save_agent(&mut self) {
        let Some(page) = self.state.agent_page.as_mut() else {
            return;
        };

        if !page.can_save() {
            let message = if page.form.is_saving() {
                "A save is already in progress.".to_string()
            } else if page.uploads.is_uploading() {
                "Please wait for uploads to finish.".to_string()
            } else {
                if !page.is_open(AgentSection::BasicSettings) {
                    page.editor.toggle_section(AgentSection::BasicSettings);
                }
                page.editor.focus_field(AgentFieldId::Name, page.uploads.len());
                format!(
                    "{} required field(s) missing in Basic Settings.",
                    page.form.basic_settings_missing()
                )
            };
            self.push_error(message);
            return;
        }

        let result = page.form.save(self.api.as_ref()).await;
        match result {
            Ok(()) => self.push_success("Agent saved successfully!"),
            Err(err) => self.push_error(err.message()),
        }
    }

    /// Start a test call with the open agent
    async fn start_test_call(&mut self) {
        let Some(page) = self.state.agent_page.as_mut() else {
            return;
        };

        if let Some(reason) = page.test_call_blocker() {
            self.push_error(reason);
            return;
        }

        let request = page
            .editor
            .test_call
            .to_request(self.config.default_country_code.as_deref());
        page.testing = true;
        let result = page.form.test_call(self.api.as_ref(), &request).await;
        page.testing = false;

        match result {
            Ok(()) => self.push_success("Test call started successfully!"),
            Err(err) => self.push_error(err.message()),
        }
    }

    /// Upload the files named in the Reference Data path input.
    ///
    /// Several paths may be given, separated like `PATH` entries.
    async fn upload_pending_files(&mut self) {
        let Some(page) = self.state.agent_page.as_mut() else {
            return;
        };
        let Some(input) = page.pending_file_path() else {
            return;
        };

        let paths: Vec<PathBuf> = std::env::split_paths(&input)
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        let mut files = Vec::with_capacity(paths.len());
        let mut rejected = Vec::new();
        for path in &paths {
            match LocalFile::read(path).await {
                Ok(file) => files.push(file),
                Err(err) => rejected.push(err.to_string()),
            }
        }

        if !files.is_empty() {
            page.editor.file_path.clear();
            let api = self.api.as_ref();
            let results = match <[LocalFile; 1]>::try_from(files) {
                Ok([file]) => vec![page.uploads.upload_file(api, file).await],
                Err(files) => page.uploads.upload_files(api, files).await,
            };
            page.sync_attachments();
            rejected.extend(
                results
                    .into_iter()
                    .filter_map(Result::err)
                    .map(|err| err.message().to_string()),
            );
        }

        if !rejected.is_empty() {
            self.push_error(rejected.join("; "));
        }
    }
}
