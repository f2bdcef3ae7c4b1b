/// Project store
///
/// Ordered, in-memory list of projects. Position in the list is only used to
/// render the 1-based display index; edits and deletes go through the stable
/// `ProjectId` each project gets when it is created.

use crate::core::validators::{parse_amount, parse_date};
use crate::error::{CrowdfundError, Result};
use crate::models::{Listing, Project, ProjectDraft, ProjectId, ProjectSummary};
use tracing::{debug, info};

impl ProjectDraft {
    /// Validate raw project input
    ///
    /// Checks run amount, start date, end date, then the range, and the first
    /// failure is returned. Title and details are free text.
    pub fn parse(
        title: &str,
        details: &str,
        target_raw: &str,
        start_raw: &str,
        end_raw: &str,
    ) -> Result<Self> {
        let target = parse_amount(target_raw)?;
        let start_date = parse_date(start_raw)?;
        let end_date = parse_date(end_raw)?;

        if start_date >= end_date {
            return Err(CrowdfundError::InvalidDateRange {
                start: start_raw.to_string(),
                end: end_raw.to_string(),
            });
        }

        Ok(Self {
            title: title.to_string(),
            details: details.to_string(),
            target,
            start_date,
            end_date,
        })
    }
}

/// Holds every project in creation order
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    next_id: u64,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a new project owned by `owner_email`
    pub fn create(
        &mut self,
        owner_email: &str,
        title: &str,
        details: &str,
        target_raw: &str,
        start_raw: &str,
        end_raw: &str,
    ) -> Result<ProjectId> {
        let draft = ProjectDraft::parse(title, details, target_raw, start_raw, end_raw)?;
        Ok(self.insert(owner_email, draft))
    }

    // Append an already validated project
    fn insert(&mut self, owner_email: &str, draft: ProjectDraft) -> ProjectId {
        self.next_id += 1;
        let id = ProjectId(self.next_id);

        self.projects.push(Project {
            id,
            title: draft.title,
            details: draft.details,
            target: draft.target,
            start_date: draft.start_date,
            end_date: draft.end_date,
            owner_email: owner_email.to_string(),
        });

        info!(%id, owner = owner_email, "project created");
        id
    }

    /// Every project in insertion order, numbered from 1
    pub fn list(&self) -> Listing {
        if self.projects.is_empty() {
            return Listing::Empty;
        }

        let summaries = self
            .projects
            .iter()
            .enumerate()
            .map(|(i, project)| ProjectSummary {
                index: i + 1,
                title: project.title.clone(),
                target: project.target,
                start_date: project.start_date,
                end_date: project.end_date,
            })
            .collect();

        Listing::Projects(summaries)
    }

    /// Resolve a display index (as typed by the user) to a project id
    pub fn id_at(&self, display_index: usize) -> Result<ProjectId> {
        self.get_at(display_index)
            .map(|project| project.id)
            .ok_or_else(|| CrowdfundError::IndexOutOfRange {
                index: display_index.to_string(),
                count: self.projects.len(),
            })
    }

    /// Project currently shown at a 1-based display index
    pub fn get_at(&self, display_index: usize) -> Option<&Project> {
        display_index
            .checked_sub(1)
            .and_then(|i| self.projects.get(i))
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Replace all editable fields of a project the caller owns
    pub fn update(&mut self, owner_email: &str, id: ProjectId, draft: ProjectDraft) -> Result<()> {
        let position = self.owned_position(owner_email, id)?;
        self.projects[position].apply(draft);

        info!(%id, owner = owner_email, "project updated");
        Ok(())
    }

    /// Remove a project the caller owns
    pub fn remove(&mut self, owner_email: &str, id: ProjectId) -> Result<Project> {
        let position = self.owned_position(owner_email, id)?;
        let removed = self.projects.remove(position);

        info!(%id, owner = owner_email, "project deleted");
        Ok(removed)
    }

    /// Edit the project at a display index
    ///
    /// Index and ownership are checked before any field, and every field is
    /// validated before anything changes.
    #[allow(clippy::too_many_arguments)]
    pub fn edit(
        &mut self,
        owner_email: &str,
        display_index: usize,
        title: &str,
        details: &str,
        target_raw: &str,
        start_raw: &str,
        end_raw: &str,
    ) -> Result<()> {
        let id = self.id_at(display_index)?;
        self.owned_position(owner_email, id)?;

        let draft = ProjectDraft::parse(title, details, target_raw, start_raw, end_raw)?;
        self.update(owner_email, id, draft)
    }

    /// Delete the project at a display index. Later indices shift down by one.
    pub fn delete(&mut self, owner_email: &str, display_index: usize) -> Result<()> {
        let id = self.id_at(display_index)?;
        self.remove(owner_email, id).map(|_| ())
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    // Where the project sits now, if it exists and the caller owns it.
    // A stale id is reported as out of range.
    fn owned_position(&self, owner_email: &str, id: ProjectId) -> Result<usize> {
        let position = self
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or_else(|| CrowdfundError::IndexOutOfRange {
                index: id.to_string(),
                count: self.projects.len(),
            })?;

        if !self.projects[position].is_owned_by(owner_email) {
            debug!(%id, caller = owner_email, "rejected change to someone else's project");
            return Err(CrowdfundError::NotOwner);
        }

        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const ANN: &str = "ann@x.com";
    const BOB: &str = "bob@x.com";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn setup() -> ProjectStore {
        let mut store = ProjectStore::new();
        store
            .create(ANN, "Well", "Clean water", "5000", "2025-01-01", "2025-02-01")
            .unwrap();
        store
            .create(BOB, "School", "Books", "1200.50", "2025-03-01", "2025-06-01")
            .unwrap();
        store
    }

    #[test]
    fn test_create_and_list() {
        let store = setup();

        let listing = store.list();
        let items = listing.summaries();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].index, 1);
        assert_eq!(items[0].title, "Well");
        assert_eq!(items[0].target, 5000.0);
        assert_eq!(items[1].index, 2);
        assert_eq!(items[1].title, "School");
        assert_eq!(items[1].start_date, date("2025-03-01"));
        assert_eq!(items[1].end_date, date("2025-06-01"));
    }

    #[test]
    fn test_empty_listing() {
        let store = ProjectStore::new();
        assert_eq!(store.list(), Listing::Empty);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_invalid_amount() {
        let mut store = ProjectStore::new();

        let result = store.create(ANN, "T", "D", "lots", "bad-date", "2025-01-01");

        // Amount is checked before dates
        assert!(matches!(result, Err(CrowdfundError::InvalidAmount(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_invalid_dates() {
        let mut store = ProjectStore::new();

        let start = store.create(ANN, "T", "D", "10", "2025-02-30", "2025-03-01");
        let end = store.create(ANN, "T", "D", "10", "2025-01-01", "01/03/2025");

        assert!(matches!(start, Err(CrowdfundError::InvalidDate(d)) if d == "2025-02-30"));
        assert!(matches!(end, Err(CrowdfundError::InvalidDate(d)) if d == "01/03/2025"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_date_range() {
        let mut store = ProjectStore::new();

        let same_day = store.create(ANN, "T", "D", "10", "2025-01-01", "2025-01-01");
        assert!(matches!(same_day, Err(CrowdfundError::InvalidDateRange { .. })));

        let backwards = store.create(ANN, "T", "D", "10", "2025-02-01", "2025-01-01");
        assert!(matches!(backwards, Err(CrowdfundError::InvalidDateRange { .. })));

        assert!(store.create(ANN, "T", "D", "10", "2025-01-01", "2025-01-02").is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ids_are_stable_and_not_reused() {
        let mut store = setup();
        let first = store.id_at(1).unwrap();
        let second = store.id_at(2).unwrap();
        assert_ne!(first, second);

        store.delete(ANN, 1).unwrap();
        assert_eq!(store.id_at(1).unwrap(), second);

        let third = store
            .create(ANN, "New", "D", "1", "2025-01-01", "2025-01-02")
            .unwrap();
        assert_ne!(third, first);
        assert_ne!(third, second);
        assert!(store.get(first).is_none());
    }

    #[test]
    fn test_edit_success() {
        let mut store = setup();

        store
            .edit(ANN, 1, "Big Well", "More water", "7500", "2025-01-15", "2025-03-01")
            .unwrap();

        let project = store.get_at(1).unwrap();
        assert_eq!(project.title, "Big Well");
        assert_eq!(project.details, "More water");
        assert_eq!(project.target, 7500.0);
        assert_eq!(project.start_date, date("2025-01-15"));
        assert_eq!(project.end_date, date("2025-03-01"));
        assert_eq!(project.owner_email, ANN);
    }

    #[test]
    fn test_edit_is_all_or_nothing() {
        let mut store = setup();

        let result = store.edit(ANN, 1, "Renamed", "Changed", "9000", "2025-05-01", "2025-04-01");

        assert!(matches!(result, Err(CrowdfundError::InvalidDateRange { .. })));
        let project = store.get_at(1).unwrap();
        assert_eq!(project.title, "Well");
        assert_eq!(project.details, "Clean water");
        assert_eq!(project.target, 5000.0);
    }

    #[test]
    fn test_edit_invalid_amount_leaves_project() {
        let mut store = setup();

        let result = store.edit(ANN, 1, "Renamed", "Changed", "a lot", "2025-01-01", "2025-02-01");

        assert!(matches!(result, Err(CrowdfundError::InvalidAmount(raw)) if raw == "a lot"));
        let project = store.get_at(1).unwrap();
        assert_eq!(project.title, "Well");
        assert_eq!(project.details, "Clean water");
        assert_eq!(project.target, 5000.0);
    }

    #[test]
    fn test_edit_invalid_date_leaves_project() {
        let mut store = setup();

        let bad_start = store.edit(ANN, 1, "Renamed", "Changed", "9000", "2025-02-30", "2025-04-01");
        assert!(matches!(bad_start, Err(CrowdfundError::InvalidDate(raw)) if raw == "2025-02-30"));

        let bad_end = store.edit(ANN, 1, "Renamed", "Changed", "9000", "2025-01-01", "next week");
        assert!(matches!(bad_end, Err(CrowdfundError::InvalidDate(raw)) if raw == "next week"));

        let project = store.get_at(1).unwrap();
        assert_eq!(project.title, "Well");
        assert_eq!(project.details, "Clean water");
        assert_eq!(project.target, 5000.0);
        assert_eq!(project.end_date, date("2025-02-01"));
    }

    #[test]
    fn test_delete_index_out_of_range() {
        let mut store = setup();

        for index in [0, store.len() + 1] {
            let result = store.delete(ANN, index);
            assert!(
                matches!(result, Err(CrowdfundError::IndexOutOfRange { count: 2, .. })),
                "index {index}"
            );
        }

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_edit_index_out_of_range() {
        let mut store = setup();

        for index in [0, 3, 100] {
            let result = store.edit(ANN, index, "T", "D", "1", "2025-01-01", "2025-01-02");
            assert!(
                matches!(result, Err(CrowdfundError::IndexOutOfRange { count: 2, .. })),
                "index {index}"
            );
        }
    }

    #[test]
    fn test_not_owner_regardless_of_field_validity() {
        let mut store = setup();

        // Bob's project at index 2; Ann sends garbage fields and still gets NotOwner
        let edit = store.edit(ANN, 2, "T", "D", "abc", "nope", "nope");
        assert!(matches!(edit, Err(CrowdfundError::NotOwner)));

        let delete = store.delete(ANN, 2);
        assert!(matches!(delete, Err(CrowdfundError::NotOwner)));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get_at(2).unwrap().title, "School");
    }

    #[test]
    fn test_delete_shifts_indices() {
        let mut store = setup();
        store
            .create(ANN, "Clinic", "Beds", "300", "2025-01-01", "2025-12-31")
            .unwrap();

        store.delete(ANN, 1).unwrap();

        let listing = store.list();
        let titles: Vec<_> = listing.summaries().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["School", "Clinic"]);
        assert_eq!(listing.summaries()[1].index, 2);
    }

    #[test]
    fn test_stale_index_cannot_touch_other_owner() {
        let mut store = setup();

        store.delete(ANN, 1).unwrap();

        // Index 2 is gone; index 1 is now Bob's project
        let stale = store.edit(ANN, 2, "X", "X", "1", "2025-01-01", "2025-01-02");
        assert!(matches!(stale, Err(CrowdfundError::IndexOutOfRange { .. })));

        let shifted = store.edit(ANN, 1, "X", "X", "1", "2025-01-01", "2025-01-02");
        assert!(matches!(shifted, Err(CrowdfundError::NotOwner)));
        assert_eq!(store.get_at(1).unwrap().title, "School");
    }

    #[test]
    fn test_stale_id_is_out_of_range() {
        let mut store = setup();
        let id = store.id_at(1).unwrap();
        store.remove(ANN, id).unwrap();

        let draft = ProjectDraft::parse("T", "D", "1", "2025-01-01", "2025-01-02").unwrap();
        assert!(matches!(
            store.update(ANN, id, draft),
            Err(CrowdfundError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            store.remove(ANN, id),
            Err(CrowdfundError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_create_then_delete_leaves_empty_listing() {
        let mut store = ProjectStore::new();
        let id = store
            .create(ANN, "Well", "D", "5000", "2025-01-01", "2025-02-01")
            .unwrap();
        assert_eq!(store.id_at(1).unwrap(), id);

        store.delete(ANN, 1).unwrap();

        assert_eq!(store.list(), Listing::Empty);
    }
}
