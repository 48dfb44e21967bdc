//! Catalog of dishes and promos.
//!
//! The catalog is addressed by position, matching how administrators pick an
//! entry from the rendered list. Deleting an entry shifts every later position
//! down by one; callers that need a durable handle use [`DishId`] with
//! [`CatalogStore::dish_position`].

use std::fmt;

use serde_json::json;

use super::{Dish, DishDraft, DishId, DishTag, EateryError, Promo, PromoDraft};

/// Which collection an out-of-range index referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogList {
    /// The dish list.
    Dishes,
    /// The promo list.
    Promos,
}

impl CatalogList {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Dishes => "dish",
            Self::Promos => "promo",
        }
    }
}

/// Raised when a positional edit targets a slot that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOutOfRange {
    /// The list the index referred to.
    pub list: CatalogList,
    /// The rejected index.
    pub index: usize,
    /// The list length at the time of the call.
    pub len: usize,
}

impl fmt::Display for IndexOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} index {} is out of range (list holds {})",
            self.list.as_str(),
            self.index,
            self.len
        )
    }
}

impl std::error::Error for IndexOutOfRange {}

impl From<IndexOutOfRange> for EateryError {
    fn from(value: IndexOutOfRange) -> Self {
        let details = json!({ "list": value.list.as_str(), "index": value.index, "len": value.len });
        Self::invalid_request(value.to_string()).with_details(details)
    }
}

/// Filter accepted by [`CatalogStore::list_dishes`].
///
/// A category filter and a search query are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MenuFilter {
    /// Every dish.
    #[default]
    All,
    /// Dishes whose category equals the value exactly.
    Category(String),
    /// Dishes whose name or description contains the value, ignoring case.
    Search(String),
}

/// A dish paired with its current position in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry<'a> {
    /// Index usable with positional catalog operations.
    pub position: usize,
    /// The dish at that position.
    pub dish: &'a Dish,
}

/// Dishes sharing a category, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection<'a> {
    /// Category heading.
    pub category: &'a str,
    /// Entries in insertion order.
    pub entries: Vec<MenuEntry<'a>>,
}

/// Ordered dish and promo lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStore {
    dishes: Vec<Dish>,
    promos: Vec<Promo>,
}

impl CatalogStore {
    /// Build a catalog from previously persisted lists.
    #[must_use]
    pub const fn from_parts(dishes: Vec<Dish>, promos: Vec<Promo>) -> Self {
        Self { dishes, promos }
    }

    /// Validate and append a dish, returning its position.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request [`EateryError`] when the draft fails validation.
    pub fn add_dish(&mut self, draft: DishDraft) -> Result<usize, EateryError> {
        let dish = Dish::new(draft)?;
        self.dishes.push(dish);
        Ok(self.dishes.len() - 1)
    }

    /// Replace the dish at `index`, keeping its identifier.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request [`EateryError`] for an out-of-range index or an
    /// invalid draft.
    pub fn update_dish(&mut self, index: usize, draft: DishDraft) -> Result<(), EateryError> {
        let len = self.dishes.len();
        let slot = self.dishes.get_mut(index).ok_or(IndexOutOfRange {
            list: CatalogList::Dishes,
            index,
            len,
        })?;
        *slot = slot.revised(draft)?;
        Ok(())
    }

    /// Remove and return the dish at `index`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request [`EateryError`] for an out-of-range index.
    pub fn delete_dish(&mut self, index: usize) -> Result<Dish, EateryError> {
        if index >= self.dishes.len() {
            return Err(IndexOutOfRange {
                list: CatalogList::Dishes,
                index,
                len: self.dishes.len(),
            }
            .into());
        }
        Ok(self.dishes.remove(index))
    }

    /// The dish at `index`, if any.
    #[must_use]
    pub fn dish(&self, index: usize) -> Option<&Dish> {
        self.dishes.get(index)
    }

    /// Every dish in catalog order.
    #[must_use]
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Current position of the dish with the given identifier.
    #[must_use]
    pub fn dish_position(&self, id: DishId) -> Option<usize> {
        self.dishes.iter().position(|dish| dish.id() == id)
    }

    /// Dishes matching `filter`, grouped by category.
    ///
    /// Categories appear in the order they are first seen in the catalog and
    /// dishes keep their catalog order inside each section.
    ///
    /// # Examples
    ///
    /// ```
    /// use eatery::domain::{CatalogStore, DishDraft, MenuFilter};
    ///
    /// let mut catalog = CatalogStore::default();
    /// for (name, category) in [("Adobo", "Mains"), ("Leche Flan", "Desserts"), ("Sisig", "Mains")] {
    ///     catalog
    ///         .add_dish(DishDraft {
    ///             name: name.to_owned(),
    ///             category: category.to_owned(),
    ///             price: 100,
    ///             ..DishDraft::default()
    ///         })
    ///         .expect("valid dish");
    /// }
    /// let sections = catalog.list_dishes(&MenuFilter::All);
    /// let headings: Vec<_> = sections.iter().map(|s| s.category).collect();
    /// assert_eq!(headings, ["Mains", "Desserts"]);
    /// ```
    #[must_use]
    pub fn list_dishes(&self, filter: &MenuFilter) -> Vec<MenuSection<'_>> {
        let needle = match filter {
            MenuFilter::Search(query) => Some(query.to_lowercase()),
            MenuFilter::All | MenuFilter::Category(_) => None,
        };
        let mut sections: Vec<MenuSection<'_>> = Vec::new();
        for (position, dish) in self.dishes.iter().enumerate() {
            let keep = match filter {
                MenuFilter::All => true,
                MenuFilter::Category(category) => dish.category() == category.as_str(),
                MenuFilter::Search(_) => needle
                    .as_deref()
                    .is_some_and(|lowered| dish.matches_lowercase(lowered)),
            };
            if !keep {
                continue;
            }
            let entry = MenuEntry { position, dish };
            match sections
                .iter_mut()
                .find(|section| section.category == dish.category())
            {
                Some(section) => section.entries.push(entry),
                None => sections.push(MenuSection {
                    category: dish.category(),
                    entries: vec![entry],
                }),
            }
        }
        sections
    }

    /// Dishes carrying `tag`, in catalog order.
    #[must_use]
    pub fn dishes_tagged(&self, tag: DishTag) -> Vec<MenuEntry<'_>> {
        self.dishes
            .iter()
            .enumerate()
            .filter(|(_, dish)| dish.has_tag(tag))
            .map(|(position, dish)| MenuEntry { position, dish })
            .collect()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for dish in &self.dishes {
            if !seen.contains(&dish.category()) {
                seen.push(dish.category());
            }
        }
        seen
    }

    /// Validate and append a promo, returning its position.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request [`EateryError`] for a blank title.
    pub fn add_promo(&mut self, draft: PromoDraft) -> Result<usize, EateryError> {
        let promo = Promo::new(draft)?;
        self.promos.push(promo);
        Ok(self.promos.len() - 1)
    }

    /// Remove and return the promo at `index`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request [`EateryError`] for an out-of-range index.
    pub fn delete_promo(&mut self, index: usize) -> Result<Promo, EateryError> {
        if index >= self.promos.len() {
            return Err(IndexOutOfRange {
                list: CatalogList::Promos,
                index,
                len: self.promos.len(),
            }
            .into());
        }
        Ok(self.promos.remove(index))
    }

    /// Every promo in insertion order.
    #[must_use]
    pub fn promos(&self) -> &[Promo] {
        &self.promos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};
    use std::collections::BTreeSet;

    fn draft(name: &str, category: &str, description: &str) -> DishDraft {
        DishDraft {
            name: name.to_owned(),
            description: description.to_owned(),
            price: 100,
            category: category.to_owned(),
            ..DishDraft::default()
        }
    }

    #[fixture]
    fn catalog() -> CatalogStore {
        let mut catalog = CatalogStore::default();
        for dish in [
            draft("Adobo", "Mains", "Pork braised in vinegar"),
            draft("Halo-halo", "Desserts", "Shaved ice with beans"),
            draft("Sisig", "Mains", "Sizzling pork"),
            draft("Leche Flan", "Desserts", "Caramel custard"),
        ] {
            catalog.add_dish(dish).expect("valid dish");
        }
        catalog
    }

    fn names<'a>(section: &MenuSection<'a>) -> Vec<&'a str> {
        section.entries.iter().map(|entry| entry.dish.name()).collect()
    }

    #[rstest]
    fn add_returns_positions(mut catalog: CatalogStore) {
        let position = catalog
            .add_dish(draft("Sinigang", "Soups", ""))
            .expect("valid dish");
        assert_eq!(position, 4);
        assert_eq!(catalog.dishes().len(), 5);
    }

    #[rstest]
    fn grouping_keeps_first_seen_category_order(catalog: CatalogStore) {
        let sections = catalog.list_dishes(&MenuFilter::All);
        let headings: Vec<_> = sections.iter().map(|s| s.category).collect();
        assert_eq!(headings, ["Mains", "Desserts"]);
        let first = sections.first().expect("mains section");
        assert_eq!(names(first), ["Adobo", "Sisig"]);
        let positions: Vec<_> = first.entries.iter().map(|e| e.position).collect();
        assert_eq!(positions, [0, 2]);
    }

    #[rstest]
    fn category_filter_is_exact(catalog: CatalogStore) {
        let sections = catalog.list_dishes(&MenuFilter::Category("desserts".to_owned()));
        assert!(sections.is_empty());
        let sections = catalog.list_dishes(&MenuFilter::Category("Desserts".to_owned()));
        assert_eq!(sections.len(), 1);
    }

    #[rstest]
    #[case("PORK", vec!["Adobo", "Sisig"])]
    #[case("flan", vec!["Leche Flan"])]
    #[case("lumpia", vec![])]
    fn search_matches_name_or_description(
        catalog: CatalogStore,
        #[case] query: &str,
        #[case] expected: Vec<&str>,
    ) {
        let sections = catalog.list_dishes(&MenuFilter::Search(query.to_owned()));
        let found: Vec<_> = sections.iter().flat_map(names).collect();
        assert_eq!(found, expected);
    }

    #[rstest]
    fn delete_shifts_positions(mut catalog: CatalogStore) {
        let sisig = catalog.dish(2).expect("sisig").id();
        let removed = catalog.delete_dish(0).expect("in range");
        assert_eq!(removed.name(), "Adobo");
        assert_eq!(catalog.dishes().len(), 3);
        assert_eq!(catalog.dish_position(sisig), Some(1));
        assert_eq!(catalog.dish_position(removed.id()), None);
    }

    #[rstest]
    fn update_replaces_in_place(mut catalog: CatalogStore) {
        let id = catalog.dish(1).expect("halo-halo").id();
        catalog
            .update_dish(1, draft("Halo-halo Special", "Desserts", "Extra ube"))
            .expect("valid update");
        let updated = catalog.dish(1).expect("still there");
        assert_eq!(updated.name(), "Halo-halo Special");
        assert_eq!(updated.id(), id);
        assert_eq!(catalog.dishes().len(), 4);
    }

    #[rstest]
    fn out_of_range_edits_are_rejected(mut catalog: CatalogStore) {
        let update = catalog
            .update_dish(4, draft("Ghost", "Mains", ""))
            .expect_err("index 4 is past the end");
        assert_eq!(update.code(), ErrorCode::InvalidRequest);
        let delete = catalog.delete_dish(10).expect_err("index 10 is past the end");
        assert_eq!(
            delete.details(),
            Some(&json!({ "list": "dish", "index": 10, "len": 4 }))
        );
        let promo = catalog.delete_promo(0).expect_err("no promos yet");
        assert_eq!(promo.code(), ErrorCode::InvalidRequest);
        assert_eq!(catalog.dishes().len(), 4);
    }

    #[rstest]
    fn invalid_update_leaves_dish_untouched(mut catalog: CatalogStore) {
        let before = catalog.clone();
        let err = catalog
            .update_dish(0, draft("", "Mains", ""))
            .expect_err("blank name");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(catalog, before);
    }

    #[rstest]
    fn tagged_and_categories(mut catalog: CatalogStore) {
        catalog
            .add_dish(DishDraft {
                tags: BTreeSet::from([DishTag::Featured]),
                ..draft("Kare-kare", "Stews", "Oxtail in peanut sauce")
            })
            .expect("valid dish");
        let featured = catalog.dishes_tagged(DishTag::Featured);
        assert_eq!(featured.len(), 1);
        assert_eq!(featured.first().map(|e| e.position), Some(4));
        assert_eq!(catalog.categories(), ["Mains", "Desserts", "Stews"]);
    }

    #[rstest]
    fn promos_add_and_delete(mut catalog: CatalogStore) {
        for title in ["Buy one", "Free rice"] {
            catalog
                .add_promo(PromoDraft {
                    title: title.to_owned(),
                    ..PromoDraft::default()
                })
                .expect("valid promo");
        }
        let removed = catalog.delete_promo(0).expect("in range");
        assert_eq!(removed.title(), "Buy one");
        let titles: Vec<_> = catalog.promos().iter().map(Promo::title).collect();
        assert_eq!(titles, ["Free rice"]);
    }
}
