//! Campaign list: search, pagination and the enable toggle
//!
//! Campaigns have no backend endpoint yet; the list lives in memory and is
//! seeded from sample data or a JSON file.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rows per page in the campaigns table
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Running,
    Completed,
}

impl CampaignStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    /// Contact list the campaign dials
    pub list: String,
    pub agent: String,
    #[serde(with = "created_date")]
    pub created_at: NaiveDate,
    pub dials: u32,
    pub answered: u32,
    pub minutes_used: u32,
    pub status: CampaignStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_type: Option<String>,
}

impl Campaign {
    pub fn created_label(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }
}

/// `createdAt` is written as an ISO date; reading also accepts the
/// display form (`Jan 15, 2025`).
mod created_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const ISO: &str = "%Y-%m-%d";
    const DISPLAY: &str = "%b %d, %Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(ISO))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, ISO)
            .or_else(|_| NaiveDate::parse_from_str(raw, DISPLAY))
            .map_err(|_| D::Error::custom(format!("invalid createdAt date: {raw:?}")))
    }
}

/// In-memory campaign table state
#[derive(Debug, Clone)]
pub struct CampaignList {
    campaigns: Vec<Campaign>,
    search: String,
    /// 1-based page number
    page: usize,
    /// Selected row within the current page
    pub selected_row: usize,
}

impl Default for CampaignList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CampaignList {
    pub fn new(campaigns: Vec<Campaign>) -> Self {
        Self {
            campaigns,
            search: String::new(),
            page: 1,
            selected_row: 0,
        }
    }

    /// Load campaigns from a JSON array on disk
    pub fn load_file(path: &Path) -> Result<Vec<Campaign>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading campaigns from {}", path.display()))?;
        let campaigns = serde_json::from_str(&content)
            .with_context(|| format!("parsing campaigns in {}", path.display()))?;
        Ok(campaigns)
    }

    pub fn all(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the search text and jump back to page 1
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
        self.selected_row = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut search = std::mem::take(&mut self.search);
        search.push(c);
        self.set_search(search);
    }

    pub fn pop_search_char(&mut self) {
        let mut search = std::mem::take(&mut self.search);
        search.pop();
        self.set_search(search);
    }

    /// Campaigns whose name contains the search text, ignoring case
    pub fn filtered(&self) -> Vec<&Campaign> {
        let needle = self.search.to_lowercase();
        self.campaigns
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Number of pages for the filtered list; 0 when nothing matches
    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(PAGE_SIZE)
    }

    /// Rows of the current page
    pub fn page_items(&self) -> Vec<&Campaign> {
        self.filtered()
            .into_iter()
            .skip((self.page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.page += 1;
            self.selected_row = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.has_prev_page() {
            self.page -= 1;
            self.selected_row = 0;
        }
    }

    pub fn select_next_row(&mut self) {
        let rows = self.page_items().len();
        if rows > 0 && self.selected_row < rows - 1 {
            self.selected_row += 1;
        }
    }

    pub fn select_prev_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn selected(&self) -> Option<&Campaign> {
        self.page_items().get(self.selected_row).copied()
    }

    /// Flip the enabled flag of one campaign. Returns the new value.
    pub fn toggle_enabled(&mut self, id: &str) -> Option<bool> {
        let campaign = self.campaigns.iter_mut().find(|c| c.id == id)?;
        campaign.enabled = !campaign.enabled;
        tracing::debug!(campaign = %campaign.name, enabled = campaign.enabled, "Toggled campaign");
        Some(campaign.enabled)
    }

    /// Append a new, disabled campaign with no activity
    pub fn create(&mut self, name: &str, call_type: &str) -> &Campaign {
        let call_type = (!call_type.is_empty()).then(|| call_type.to_string());
        self.campaigns.push(Campaign {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            enabled: false,
            list: String::new(),
            agent: String::new(),
            created_at: Local::now().date_naive(),
            dials: 0,
            answered: 0,
            minutes_used: 0,
            status: CampaignStatus::Running,
            call_type,
        });
        let created = &self.campaigns[self.campaigns.len() - 1];
        tracing::info!(campaign = %created.name, "Created campaign");
        created
    }

    /// Remove a campaign, keeping the page and selection in range
    pub fn delete(&mut self, id: &str) -> Option<Campaign> {
        let idx = self.campaigns.iter().position(|c| c.id == id)?;
        let removed = self.campaigns.remove(idx);

        let pages = self.total_pages().max(1);
        self.page = self.page.min(pages);
        let rows = self.page_items().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));

        Some(removed)
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    name: &str,
    enabled: bool,
    list: &str,
    agent: &str,
    created: (i32, u32, u32),
    stats: (u32, u32, u32),
    status: CampaignStatus,
) -> Campaign {
    Campaign {
        id: id.to_string(),
        name: name.to_string(),
        enabled,
        list: list.to_string(),
        agent: agent.to_string(),
        created_at: NaiveDate::from_ymd_opt(created.0, created.1, created.2).unwrap_or_default(),
        dials: stats.0,
        answered: stats.1,
        minutes_used: stats.2,
        status,
        call_type: None,
    }
}

/// Sample campaigns shown when no campaigns file is configured
pub fn sample_campaigns() -> Vec<Campaign> {
    use CampaignStatus::{Completed, Running};
    vec![
        sample("1", "Q1 Lead Outreach", true, "Acme Corporation", "Outreach Agent", (2025, 1, 15), (320, 185, 412), Running),
        sample("2", "Customer Satisfaction Survey", true, "Global Solutions Ltd.", "Survey Caller", (2025, 1, 10), (150, 98, 203), Running),
        sample("3", "Renewal Reminders", false, "CloudNine Services", "Retention Agent", (2024, 12, 20), (540, 312, 678), Completed),
        sample("4", "Product Demo Booking", false, "TechStart Inc.", "Appointment Setter", (2025, 1, 5), (210, 127, 295), Completed),
        sample("5", "Win-Back Campaign", true, "NextGen Media", "Retention Agent", (2025, 1, 22), (88, 42, 96), Running),
        sample("6", "Onboarding Calls", false, "Pioneer Healthcare", "Onboarding Guide", (2025, 1, 18), (75, 61, 154), Completed),
        sample("7", "Upsell Blitz", true, "Sunrise Retail", "Sales Assistant", (2025, 1, 25), (45, 20, 48), Running),
        sample("8", "Payment Follow-Up", false, "BlueWave Logistics", "Billing Helper", (2024, 12, 15), (390, 245, 520), Completed),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn names(items: &[&Campaign]) -> Vec<String> {
        items.iter().map(|c| c.name.clone()).collect()
    }

    fn two_campaigns() -> CampaignList {
        let all = sample_campaigns();
        CampaignList::new(vec![all[0].clone(), all[4].clone()])
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut list = two_campaigns();
        list.set_search("win");
        assert_eq!(names(&list.filtered()), vec!["Win-Back Campaign"]);

        list.set_search("LEAD");
        assert_eq!(names(&list.filtered()), vec!["Q1 Lead Outreach"]);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let list = CampaignList::new(sample_campaigns());
        assert_eq!(list.filtered().len(), 8);
    }

    #[test]
    fn test_total_pages_is_ceiling_of_filtered() {
        let mut list = CampaignList::new(sample_campaigns());
        assert_eq!(list.total_pages(), 2);

        list.set_search("campaign");
        // "Win-Back Campaign" only
        assert_eq!(list.total_pages(), 1);

        list.set_search("no such campaign");
        assert_eq!(list.total_pages(), 0);
        assert!(list.page_items().is_empty());
    }

    #[test]
    fn test_pagination_slices_filtered_list() {
        let mut list = CampaignList::new(sample_campaigns());
        assert_eq!(list.page_items().len(), 5);
        assert!(!list.has_prev_page());
        assert!(list.has_next_page());

        list.next_page();
        assert_eq!(list.page(), 2);
        assert_eq!(
            names(&list.page_items()),
            vec!["Onboarding Calls", "Upsell Blitz", "Payment Follow-Up"]
        );
        assert!(!list.has_next_page());

        list.next_page();
        assert_eq!(list.page(), 2);

        list.prev_page();
        assert_eq!(list.page(), 1);
        list.prev_page();
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_search_resets_page() {
        let mut list = CampaignList::new(sample_campaigns());
        list.next_page();
        list.push_search_char('o');
        assert_eq!(list.page(), 1);
        assert_eq!(list.search(), "o");
        list.pop_search_char();
        assert_eq!(list.search(), "");
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let mut list = CampaignList::new(sample_campaigns());
        let before: Vec<bool> = list.all().iter().map(|c| c.enabled).collect();

        assert_eq!(list.toggle_enabled("3"), Some(true));

        for (campaign, was) in list.all().iter().zip(before) {
            if campaign.id == "3" {
                assert_ne!(campaign.enabled, was);
            } else {
                assert_eq!(campaign.enabled, was);
            }
        }
        assert_eq!(list.toggle_enabled("missing"), None);
    }

    #[test]
    fn test_row_selection_stays_on_page() {
        let mut list = CampaignList::new(sample_campaigns());
        for _ in 0..10 {
            list.select_next_row();
        }
        assert_eq!(list.selected_row, 4);
        assert_eq!(list.selected().unwrap().name, "Win-Back Campaign");

        list.next_page();
        assert_eq!(list.selected_row, 0);
        list.select_prev_row();
        assert_eq!(list.selected_row, 0);
    }

    #[test]
    fn test_create_appends_disabled_campaign() {
        let mut list = CampaignList::new(sample_campaigns());
        let created = list.create("Spring Promo", "outbound").clone();

        assert_eq!(list.all().len(), 9);
        assert!(!created.enabled);
        assert_eq!(created.dials, 0);
        assert_eq!(created.status, CampaignStatus::Running);
        assert_eq!(created.call_type.as_deref(), Some("outbound"));
        assert_eq!(list.total_pages(), 2);
    }

    #[test]
    fn test_delete_clamps_page() {
        let mut list = CampaignList::new(sample_campaigns());
        list.set_search("Payment");
        assert_eq!(list.filtered().len(), 1);
        list.set_search("");
        list.next_page();
        for id in ["6", "7", "8"] {
            assert!(list.delete(id).is_some());
        }
        assert_eq!(list.page(), 1);
        assert_eq!(list.total_pages(), 1);
        assert!(list.delete("8").is_none());
    }

    #[test]
    fn test_created_label_format() {
        let list = CampaignList::new(sample_campaigns());
        assert_eq!(list.all()[0].created_label(), "Jan 15, 2025");
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&sample_campaigns()[..2]).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = CampaignList::load_file(file.path()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].name, "Customer Satisfaction Survey");
        assert_eq!(loaded[1].status, CampaignStatus::Running);
    }

    #[test]
    fn test_load_file_accepts_display_dates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = r#"[{
            "id": "1",
            "name": "Q1 Lead Outreach",
            "enabled": true,
            "list": "Acme Corporation",
            "agent": "Outreach Agent",
            "createdAt": "Jan 5, 2025",
            "dials": 320,
            "answered": 185,
            "minutesUsed": 412,
            "status": "running"
        }]"#;
        file.write_all(json.as_bytes()).unwrap();

        let loaded = CampaignList::load_file(file.path()).unwrap();
        assert_eq!(loaded[0].created_at, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(loaded[0].created_label(), "Jan 5, 2025");
    }

    #[test]
    fn test_created_at_serializes_as_iso() {
        let value = serde_json::to_value(&sample_campaigns()[0]).unwrap();
        assert_eq!(value["createdAt"], "2025-01-15");
    }

    #[test]
    fn test_load_file_rejects_bad_date() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut value = serde_json::to_value(&sample_campaigns()[..1]).unwrap();
        value[0]["createdAt"] = "someday".into();
        file.write_all(value.to_string().as_bytes()).unwrap();
        assert!(CampaignList::load_file(file.path()).is_err());
    }

    #[test]
    fn test_load_file_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(CampaignList::load_file(file.path()).is_err());
    }
}
