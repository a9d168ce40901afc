use castdex_model::{CatalogFilter, Character, PageMeta, PageNumber};

/// Immutable view of the engine handed to consumers.
///
/// Published as one value so readers never observe a partial update of the
/// loading/has-more flags.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    pub items: Vec<Character>,
    pub filter: CatalogFilter,
    pub page: PageNumber,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_more: bool,
    pub loading_first_page: bool,
    pub loading_more: bool,
}

impl EngineSnapshot {
    pub fn is_loading(&self) -> bool {
        self.loading_first_page || self.loading_more
    }
}

/// The engine's single mutable record.
///
/// Mutated exclusively by the worker task through the transition methods
/// below; every issued fetch is tagged with the generation current at issue
/// time, and a completion whose tag no longer matches must be discarded
/// without calling any transition.
#[derive(Debug)]
pub(crate) struct EngineState {
    filter: CatalogFilter,
    page: PageNumber,
    items: Vec<Character>,
    meta: PageMeta,
    has_more: bool,
    loading_first_page: bool,
    loading_more: bool,
    generation: u64,
}

impl EngineState {
    pub fn new(filter: CatalogFilter, page: PageNumber) -> Self {
        Self {
            filter,
            page: page.max(1),
            items: Vec::new(),
            meta: PageMeta::default(),
            has_more: true,
            loading_first_page: false,
            loading_more: false,
            generation: 0,
        }
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn page(&self) -> PageNumber {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading_first_page || self.loading_more
    }

    /// A page advance is admissible only when more pages exist and nothing
    /// is in flight.
    pub fn can_advance(&self) -> bool {
        self.has_more && !self.is_loading()
    }

    /// Start over under a new filter (or the initial one): the accumulated
    /// list is dropped and any in-flight fetch is invalidated by the
    /// generation bump. Returns the new generation for tagging the fetch.
    pub fn begin_refresh(&mut self, filter: CatalogFilter, page: PageNumber) -> u64 {
        self.filter = filter;
        self.page = page.max(1);
        self.items.clear();
        self.has_more = true;
        self.loading_first_page = true;
        self.loading_more = false;
        self.generation += 1;
        self.generation
    }

    /// Move to the next page for an append fetch. Caller must have checked
    /// [`EngineState::can_advance`]. Returns the tag for the fetch.
    pub fn begin_advance(&mut self) -> (u64, PageNumber) {
        self.page += 1;
        self.loading_more = true;
        (self.generation, self.page)
    }

    /// Apply a successful, still-current fetch. `items` have already been
    /// narrowed by the client-side created-date filter.
    pub fn complete(&mut self, items: Vec<Character>, meta: PageMeta, append: bool) {
        if append {
            self.items.extend(items);
        } else {
            self.items = items;
        }
        self.meta = meta;
        self.has_more = self.page < self.meta.total_pages;
        if append {
            self.loading_more = false;
        } else {
            self.loading_first_page = false;
        }
    }

    /// Apply a failed, still-current fetch. A failed replace empties the
    /// list; a failed append keeps the pages accumulated so far. Either way
    /// further advances stay inert until the filter changes again.
    pub fn fail(&mut self, append: bool) {
        if append {
            self.loading_more = false;
        } else {
            self.items.clear();
            self.loading_first_page = false;
        }
        self.has_more = false;
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            items: self.items.clone(),
            filter: self.filter.clone(),
            page: self.page,
            total_count: self.meta.total_count,
            total_pages: self.meta.total_pages,
            has_more: self.has_more,
            loading_first_page: self.loading_first_page,
            loading_more: self.loading_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castdex_model::{CharacterGender, CharacterStatus, LocationRef};
    use time::macros::datetime;

    fn character(id: u64) -> Character {
        Character {
            id,
            name: format!("character-{id}"),
            status: CharacterStatus::Alive,
            species: "Human".to_string(),
            gender: CharacterGender::Male,
            origin: LocationRef {
                name: "unknown".to_string(),
                url: String::new(),
            },
            location: LocationRef {
                name: "unknown".to_string(),
                url: String::new(),
            },
            image: String::new(),
            created: datetime!(2017-11-04 18:48:46.250 UTC),
        }
    }

    fn meta(total_count: u64, total_pages: u32) -> PageMeta {
        PageMeta {
            total_count,
            total_pages,
        }
    }

    #[test]
    fn new_state_is_idle_with_empty_items() {
        let state = EngineState::new(CatalogFilter::empty(), 1);

        assert!(!state.is_loading());
        assert!(state.can_advance());
        assert_eq!(state.generation(), 0);
        assert!(state.snapshot().items.is_empty());
    }

    #[test]
    fn page_is_clamped_to_one() {
        let state = EngineState::new(CatalogFilter::empty(), 0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn refresh_bumps_generation_and_clears_items() {
        let mut state = EngineState::new(CatalogFilter::empty(), 1);
        state.begin_refresh(CatalogFilter::empty(), 1);
        state.complete(vec![character(1), character(2)], meta(2, 1), false);

        let generation =
            state.begin_refresh(CatalogFilter::empty().with_name("rick"), 1);

        assert_eq!(generation, 2);
        assert!(state.snapshot().items.is_empty());
        assert!(state.snapshot().has_more);
        assert!(state.snapshot().loading_first_page);
        assert!(!state.snapshot().loading_more);
    }

    #[test]
    fn complete_replace_sets_items_and_meta() {
        let mut state = EngineState::new(CatalogFilter::empty(), 1);
        state.begin_refresh(CatalogFilter::empty(), 1);
        state.complete(vec![character(1)], meta(826, 42), false);

        let snap = state.snapshot();
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.total_count, 826);
        assert_eq!(snap.total_pages, 42);
        assert!(snap.has_more);
        assert!(!snap.is_loading());
    }

    #[test]
    fn complete_append_preserves_prior_order() {
        let mut state = EngineState::new(CatalogFilter::empty(), 1);
        state.begin_refresh(CatalogFilter::empty(), 1);
        state.complete(vec![character(1), character(2)], meta(5, 3), false);

        let (_, page) = state.begin_advance();
        assert_eq!(page, 2);
        state.complete(vec![character(3)], meta(5, 3), true);

        let ids: Vec<u64> = state.snapshot().items.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(state.snapshot().has_more);
    }

    #[test]
    fn has_more_clears_on_last_page() {
        let mut state = EngineState::new(CatalogFilter::empty(), 1);
        state.begin_refresh(CatalogFilter::empty(), 1);
        state.complete(vec![character(1)], meta(1, 1), false);

        assert!(!state.snapshot().has_more);
        assert!(!state.can_advance());
    }

    #[test]
    fn meta_is_replaced_even_on_append() {
        let mut state = EngineState::new(CatalogFilter::empty(), 1);
        state.begin_refresh(CatalogFilter::empty(), 1);
        state.complete(vec![character(1)], meta(10, 5), false);

        state.begin_advance();
        state.complete(vec![character(2)], meta(9, 4), true);

        assert_eq!(state.snapshot().total_count, 9);
        assert_eq!(state.snapshot().total_pages, 4);
    }

    #[test]
    fn advance_is_inadmissible_while_loading() {
        let mut state = EngineState::new(CatalogFilter::empty(), 1);
        state.begin_refresh(CatalogFilter::empty(), 1);
        assert!(!state.can_advance());

        state.complete(vec![character(1)], meta(5, 3), false);
        assert!(state.can_advance());

        state.begin_advance();
        assert!(!state.can_advance());
    }

    #[test]
    fn failed_replace_empties_the_list() {
        let mut state = EngineState::new(CatalogFilter::empty(), 1);
        state.begin_refresh(CatalogFilter::empty(), 1);
        state.complete(vec![character(1)], meta(5, 3), false);

        state.begin_refresh(CatalogFilter::empty().with_name("rick"), 1);
        state.fail(false);

        let snap = state.snapshot();
        assert!(snap.items.is_empty());
        assert!(!snap.has_more);
        assert!(!snap.is_loading());
    }

    #[test]
    fn failed_append_keeps_accumulated_pages() {
        let mut state = EngineState::new(CatalogFilter::empty(), 1);
        state.begin_refresh(CatalogFilter::empty(), 1);
        state.complete(vec![character(1), character(2)], meta(84, 42), false);

        state.begin_advance();
        state.fail(true);

        let snap = state.snapshot();
        assert_eq!(snap.items.len(), 2);
        assert!(!snap.has_more);
        assert!(!snap.loading_more);
    }

    #[test]
    fn at_most_one_loading_flag_is_set() {
        let mut state = EngineState::new(CatalogFilter::empty(), 1);

        state.begin_refresh(CatalogFilter::empty(), 1);
        let snap = state.snapshot();
        assert!(snap.loading_first_page && !snap.loading_more);

        state.complete(vec![], meta(5, 3), false);
        state.begin_advance();
        let snap = state.snapshot();
        assert!(!snap.loading_first_page && snap.loading_more);
    }

    #[test]
    fn refresh_during_append_clears_the_more_flag() {
        let mut state = EngineState::new(CatalogFilter::empty(), 1);
        state.begin_refresh(CatalogFilter::empty(), 1);
        state.complete(vec![character(1)], meta(5, 3), false);
        state.begin_advance();

        state.begin_refresh(CatalogFilter::empty().with_name("beth"), 1);

        let snap = state.snapshot();
        assert!(snap.loading_first_page);
        assert!(!snap.loading_more);
        assert_eq!(snap.page, 1);
    }
}
