use std::sync::{Arc, mpsc};

use cinestream_state::{Entry, EntryDraft, EntryId};

use crate::{
    Catalogue, CatalogueError, cg,
    categories::{category_index, form_categories},
    enrichment::EnrichmentTracker,
    form::{EditForm, FormOutcome},
    navigator::{
        self, CatalogueChange, CatalogueView, Effect, FocusState, FocusTarget, Input, Transition,
    },
    overlay::{BackTarget, Overlay},
    playback::PlayerView,
    store::KeyValueStore,
    tokio_thread::TokioThread,
};

pub struct LogicArgs {
    pub store: Box<dyn KeyValueStore>,
    pub storage_key: String,
    pub back_target: BackTarget,
    /// The suggestion client; auto-fill is unavailable without one.
    pub enricher: Option<cg::Client>,
}

type SuggestionResult = (u64, cg::ClientResult<cg::Suggestion>);

struct Enricher {
    client: Arc<cg::Client>,
    tokio: TokioThread,
}

/// Owns the catalogue and the focus state, and routes input between the navigator and
/// whichever overlay is open.
pub struct Logic {
    catalogue: Catalogue,
    focus: FocusState,
    categories: Vec<String>,
    filtered: Vec<Entry>,

    form: Option<EditForm>,
    player: Option<PlayerView>,

    tracker: EnrichmentTracker,
    enricher: Option<Enricher>,
    suggestion_tx: mpsc::Sender<SuggestionResult>,
    suggestion_rx: mpsc::Receiver<SuggestionResult>,

    notice: Option<String>,
}
impl Logic {
    const AUTO_FILL_UNAVAILABLE: &str = "Auto-fill unavailable";

    pub fn new(args: LogicArgs) -> Self {
        let LogicArgs {
            store,
            storage_key,
            back_target,
            enricher,
        } = args;

        let enricher = enricher.and_then(|client| match TokioThread::new() {
            Ok(tokio) => {
                tracing::info!("auto-fill enabled using {}", client.model());
                Some(Enricher {
                    client: Arc::new(client),
                    tokio,
                })
            }
            Err(e) => {
                tracing::error!("failed to start background runtime, auto-fill disabled: {e}");
                None
            }
        });

        let (suggestion_tx, suggestion_rx) = mpsc::channel();
        let mut logic = Self {
            catalogue: Catalogue::load(store, storage_key),
            focus: FocusState::new(back_target),
            categories: vec![],
            filtered: vec![],
            form: None,
            player: None,
            tracker: EnrichmentTracker::new(),
            enricher,
            suggestion_tx,
            suggestion_rx,
            notice: None,
        };
        logic.refresh_view();
        logic.notice = logic.catalogue.take_persist_error();
        logic
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    /// The category index, `All` first.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The entries in the active category.
    pub fn filtered(&self) -> &[Entry] {
        &self.filtered
    }

    pub fn current_entry(&self) -> Option<&Entry> {
        self.focus.current_entry(&self.view())
    }

    pub fn form(&self) -> Option<&EditForm> {
        self.form.as_ref()
    }

    pub fn player(&self) -> Option<&PlayerView> {
        self.player.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn has_auto_fill(&self) -> bool {
        self.enricher.is_some()
    }

    /// Routes `input` to the open overlay, or to the navigator if there isn't one.
    ///
    /// Returns the effects the shell should carry out.
    pub fn handle_input(&mut self, input: Input) -> Vec<Effect> {
        let Some(form) = self.form.as_mut() else {
            return self.navigate(input);
        };
        match form.handle_input(input) {
            FormOutcome::None => vec![],
            FormOutcome::Cancel => self.navigate(Input::Back),
            FormOutcome::Submit(draft) => self.submit(draft),
            FormOutcome::AutoFill(title) => {
                self.request_suggestion(title);
                vec![]
            }
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(form) = self.form.as_mut() {
            form.insert_char(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.delete_char();
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.clear_field();
        }
    }

    /// Opens the form for a new entry. Ignored if an overlay is open.
    pub fn open_create(&mut self) -> bool {
        self.open_overlay(Overlay::Edit { editing: None })
    }

    /// Opens the form for the current entry. Ignored if an overlay is open or nothing is focused.
    pub fn edit_current(&mut self) -> bool {
        let Some(entry) = self.current_entry().cloned() else {
            return false;
        };
        self.open_overlay(Overlay::Edit {
            editing: Some(entry),
        })
    }

    /// Deletes the current entry. Ignored while an overlay is open.
    pub fn delete_current(&mut self) -> Vec<Effect> {
        if self.focus.overlay().is_some() {
            return vec![];
        }
        let Some(id) = self.current_entry().map(|e| e.id.clone()) else {
            return vec![];
        };
        self.delete(&id)
    }

    /// Deletes an entry by ID. A missing ID is logged and otherwise ignored.
    pub fn delete(&mut self, id: &EntryId) -> Vec<Effect> {
        match self.catalogue.delete(id) {
            Ok(entry) => {
                self.notice = Some(format!("Deleted \"{}\"", entry.title));
                vec![self.after_catalogue_change(CatalogueChange::Deleted)]
            }
            Err(e) => {
                tracing::warn!("delete ignored: {e}");
                vec![]
            }
        }
    }

    /// Moves focus to a clicked target, then activates it.
    pub fn activate_at(&mut self, target: FocusTarget) -> Vec<Effect> {
        if self.focus.overlay().is_some() {
            return vec![];
        }
        let view = CatalogueView {
            categories: &self.categories,
            filtered: &self.filtered,
        };
        self.focus.focus_target(target, &view);
        self.navigate(Input::Activate)
    }

    /// Applies any suggestion results that have arrived since the last call.
    pub fn update(&mut self) {
        while let Ok((request_id, result)) = self.suggestion_rx.try_recv() {
            if !self.tracker.accept(request_id) {
                tracing::debug!("discarding stale suggestion (request {request_id})");
                continue;
            }
            let Some(form) = self.form.as_mut() else {
                continue;
            };
            match result {
                Ok(suggestion) => {
                    if form.apply_suggestion(&suggestion) {
                        tracing::info!("applied suggestion (request {request_id})");
                        self.notice = Some("Auto-fill applied".to_string());
                    } else {
                        tracing::info!("suggestion had nothing new (request {request_id})");
                        self.notice = Some("Auto-fill found nothing; no changes applied".to_string());
                    }
                }
                Err(e) => {
                    tracing::warn!("auto-fill failed: {e}");
                    form.set_busy(false);
                    self.notice = Some("Auto-fill failed; no changes applied".to_string());
                }
            }
        }
    }

    fn view(&self) -> CatalogueView<'_> {
        CatalogueView {
            categories: &self.categories,
            filtered: &self.filtered,
        }
    }

    fn navigate(&mut self, input: Input) -> Vec<Effect> {
        let Transition { state, effects } = navigator::transition(&self.focus, input, &self.view());
        self.focus = state;
        self.sync_overlay();
        self.refresh_view();
        effects
    }

    fn open_overlay(&mut self, overlay: Overlay) -> bool {
        if !self.focus.open_overlay(overlay) {
            return false;
        }
        self.sync_overlay();
        true
    }

    /// Builds or drops the form and player to match the overlay the focus state says is open.
    fn sync_overlay(&mut self) {
        match self.focus.overlay() {
            Some(Overlay::Edit { editing }) => {
                if self.form.is_none() {
                    let options = form_categories(self.catalogue.entries());
                    self.form = Some(match editing {
                        Some(entry) => EditForm::edit(entry, options),
                        None => EditForm::create(options),
                    });
                }
            }
            Some(Overlay::Player { entry }) => {
                if self.player.is_none() {
                    self.player = Some(PlayerView::new(entry.clone()));
                }
            }
            None => {
                if self.form.take().is_some() {
                    self.tracker.cancel();
                }
                self.player = None;
            }
        }
    }

    fn refresh_view(&mut self) {
        self.categories = category_index(self.catalogue.entries());
        self.focus.reconcile(&self.categories);
        self.filtered = self.catalogue.list(self.focus.active_category());
    }

    /// Persist failures replace whatever notice is showing.
    fn after_catalogue_change(&mut self, change: CatalogueChange) -> Effect {
        self.refresh_view();
        let effect = self.focus.after_catalogue_change(change, self.filtered.len());
        if let Some(error) = self.catalogue.take_persist_error() {
            self.notice = Some(error);
        }
        effect
    }

    fn submit(&mut self, draft: EntryDraft) -> Vec<Effect> {
        let editing = self.form.as_ref().and_then(|f| f.editing().cloned());
        let result = match &editing {
            Some(id) => self
                .catalogue
                .update(id, draft)
                .map(|e| (CatalogueChange::Updated, e)),
            None => self
                .catalogue
                .create(draft)
                .map(|e| (CatalogueChange::Created, e)),
        };

        match result {
            Ok((change, entry)) => {
                let mut effects = self.navigate(Input::Back);
                self.notice = Some(format!("Saved \"{}\"", entry.title));
                effects.push(self.after_catalogue_change(change));
                effects
            }
            Err(CatalogueError::Validation(e)) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_error(e.to_string());
                }
                vec![]
            }
            Err(e @ CatalogueError::NotFound(_)) => {
                tracing::warn!("save ignored: {e}");
                self.navigate(Input::Back)
            }
        }
    }

    fn request_suggestion(&mut self, title: String) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let Some(enricher) = &self.enricher else {
            form.set_error(Self::AUTO_FILL_UNAVAILABLE);
            return;
        };

        let request_id = self.tracker.begin();
        form.set_busy(true);
        tracing::info!("requesting suggestion for `{title}` (request {request_id})");

        let client = enricher.client.clone();
        let categories = form_categories(self.catalogue.entries());
        let tx = self.suggestion_tx.clone();
        enricher.tokio.spawn(async move {
            let result = client.suggest(&title, &categories).await;
            // The receiver only goes away when the app is shutting down.
            let _ = tx.send((request_id, result));
        });
    }
}

#[cfg(test)]
mod tests {
    use cinestream_state::ALL_CATEGORY;

    use super::*;
    use crate::{
        catalogue::DEFAULT_STORAGE_KEY, form::FormField, navigator::Region, store::MemoryStore,
    };

    fn entry(id: &str, category: &str) -> Entry {
        Entry {
            id: EntryId::from(id),
            title: id.to_string(),
            playback_url: format!("https://youtu.be/{id}"),
            poster_url: String::new(),
            description: None,
            category: category.to_string(),
            year: None,
            rating: None,
        }
    }

    fn logic_with(entries: &[Entry]) -> (Logic, MemoryStore) {
        let json = serde_json::to_string(entries).unwrap();
        let store = MemoryStore::with_value(DEFAULT_STORAGE_KEY, json);
        let logic = Logic::new(LogicArgs {
            store: Box::new(store.clone()),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            back_target: BackTarget::Contextual,
            enricher: None,
        });
        (logic, store)
    }

    fn select_category(logic: &mut Logic, category: &str) {
        let index = logic
            .categories()
            .iter()
            .position(|c| c == category)
            .unwrap();
        logic.activate_at(FocusTarget::Sidebar(index));
        assert_eq!(logic.focus().active_category(), category);
    }

    fn type_into(logic: &mut Logic, field: FormField, text: &str) {
        let form = logic.form.as_mut().unwrap();
        form.focus(field);
        form.clear_field();
        text.chars().for_each(|c| logic.type_char(c));
    }

    fn press_save(logic: &mut Logic) -> Vec<Effect> {
        logic.form.as_mut().unwrap().focus(FormField::Save);
        logic.handle_input(Input::Activate)
    }

    #[test]
    fn play_then_back_keeps_the_shelf_position() {
        let entries = [entry("A", "Sci-Fi"), entry("B", "Action")];
        let (mut logic, _) = logic_with(&entries);

        logic.handle_input(Input::Right);
        assert_eq!(logic.focus().shelf_index(), 1);
        logic.handle_input(Input::Activate);
        assert_eq!(
            logic.player().map(|p| &p.entry.id),
            Some(&EntryId::from("B"))
        );

        logic.handle_input(Input::Back);
        assert_eq!(logic.focus().region(), Region::Hero);
        assert_eq!(logic.focus().shelf_index(), 1);
        assert!(logic.player().is_none());
    }

    #[test]
    fn deleting_the_only_match_leaves_an_empty_view() {
        let entries = [entry("A", "Sci-Fi"), entry("B", "Action")];
        let (mut logic, _) = logic_with(&entries);

        select_category(&mut logic, "Action");
        assert_eq!(logic.filtered(), [entries[1].clone()].as_slice());

        let effects = logic.delete_current();
        assert_eq!(effects, [Effect::RevealShelfItem(0)]);
        assert!(logic.catalogue().get(&EntryId::from("B")).is_none());
        assert!(logic.filtered().is_empty());
        assert_eq!(logic.focus().active_category(), "Action");
        assert_eq!(logic.focus().shelf_index(), 0);

        assert!(logic.handle_input(Input::Activate).is_empty());
        assert!(logic.player().is_none());
        assert!(logic.focus().overlay().is_none());
    }

    #[test]
    fn deleting_the_last_custom_entry_resets_to_all() {
        let entries = [entry("A", "Anime"), entry("B", "Drama")];
        let (mut logic, _) = logic_with(&entries);
        select_category(&mut logic, "Anime");

        logic.delete_current();
        assert_eq!(logic.focus().active_category(), ALL_CATEGORY);
        assert!(!logic.categories().iter().any(|c| c == "Anime"));
        assert_eq!(logic.filtered().len(), 1);
    }

    #[test]
    fn deleting_at_the_end_of_the_shelf_stays_in_bounds() {
        let entries = [entry("A", "Drama"), entry("B", "Drama"), entry("C", "Drama")];
        let (mut logic, _) = logic_with(&entries);
        logic.handle_input(Input::Right);
        logic.handle_input(Input::Right);
        assert_eq!(logic.focus().shelf_index(), 2);

        logic.delete_current();
        assert!(logic.focus().shelf_index() < logic.filtered().len());
    }

    #[test]
    fn creating_through_the_form_prepends_and_persists() {
        let (mut logic, store) = logic_with(&[entry("A", "Drama")]);
        assert!(logic.open_create());
        assert!(!logic.open_create());
        assert_eq!(logic.focus().region(), Region::EditOverlay);

        type_into(&mut logic, FormField::Title, "Heat");
        type_into(&mut logic, FormField::PlaybackUrl, "https://youtu.be/heat");
        press_save(&mut logic);

        assert!(logic.form().is_none());
        assert_eq!(logic.focus().region(), Region::Shelf);
        assert_eq!(logic.focus().shelf_index(), 0);
        assert_eq!(logic.catalogue().entries()[0].title, "Heat");
        assert_eq!(logic.current_entry().map(|e| e.title.as_str()), Some("Heat"));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn saving_a_new_entry_reveals_the_first_card() {
        let entries: Vec<Entry> = (0..8).map(|i| entry(&format!("E{i}"), "Drama")).collect();
        let (mut logic, _) = logic_with(&entries);
        for _ in 0..7 {
            logic.handle_input(Input::Right);
        }
        assert_eq!(logic.focus().shelf_index(), 7);

        logic.open_create();
        type_into(&mut logic, FormField::Title, "Heat");
        type_into(&mut logic, FormField::PlaybackUrl, "https://youtu.be/heat");
        let effects = press_save(&mut logic);

        assert_eq!(logic.focus().region(), Region::Shelf);
        assert_eq!(logic.focus().shelf_index(), 0);
        assert_eq!(effects.last(), Some(&Effect::RevealShelfItem(0)));
    }

    /// Holds entries but refuses every write.
    struct ReadOnlyStore {
        value: String,
    }
    impl KeyValueStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> Option<String> {
            Some(self.value.clone())
        }

        fn save(&mut self, _key: &str, _value: &str) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn failed_saves_keep_the_change_and_raise_a_notice() {
        let store = ReadOnlyStore {
            value: serde_json::to_string(&[entry("A", "Drama")]).unwrap(),
        };
        let mut logic = Logic::new(LogicArgs {
            store: Box::new(store),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            back_target: BackTarget::Contextual,
            enricher: None,
        });
        assert_eq!(logic.notice(), None);

        logic.open_create();
        type_into(&mut logic, FormField::Title, "Heat");
        type_into(&mut logic, FormField::PlaybackUrl, "https://youtu.be/heat");
        press_save(&mut logic);

        assert!(logic.form().is_none());
        assert_eq!(logic.catalogue().len(), 2);
        assert_eq!(logic.catalogue().entries()[0].title, "Heat");
        assert!(
            logic
                .notice()
                .is_some_and(|n| n.starts_with("Failed to save catalogue")),
            "unexpected notice: {:?}",
            logic.notice()
        );
    }

    #[test]
    fn invalid_save_keeps_the_form_open_without_persisting() {
        let (mut logic, store) = logic_with(&[entry("A", "Drama")]);
        logic.open_create();
        type_into(&mut logic, FormField::Title, "X");
        press_save(&mut logic);

        let form = logic.form().unwrap();
        assert!(form.error().is_some());
        assert_eq!(logic.catalogue().len(), 1);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn editing_keeps_id_and_position() {
        let entries = [entry("A", "Drama"), entry("B", "Drama")];
        let (mut logic, _) = logic_with(&entries);
        logic.handle_input(Input::Right);
        assert!(logic.edit_current());

        type_into(&mut logic, FormField::Title, "Renamed");
        press_save(&mut logic);

        assert_eq!(logic.catalogue().entries()[1].id, EntryId::from("B"));
        assert_eq!(logic.catalogue().entries()[1].title, "Renamed");
        assert_eq!(logic.focus().shelf_index(), 1);
    }

    #[test]
    fn back_cancels_the_form() {
        let (mut logic, store) = logic_with(&[entry("A", "Drama")]);
        logic.open_create();
        type_into(&mut logic, FormField::Title, "Unsaved");
        logic.handle_input(Input::Back);
        assert!(logic.form().is_none());
        assert_eq!(logic.catalogue().len(), 1);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn auto_fill_without_a_client_is_unavailable() {
        let (mut logic, _) = logic_with(&[]);
        logic.open_create();
        type_into(&mut logic, FormField::Title, "Alien");
        logic.form.as_mut().unwrap().focus(FormField::AutoFill);
        logic.handle_input(Input::Activate);

        let form = logic.form().unwrap();
        assert_eq!(form.error(), Some(Logic::AUTO_FILL_UNAVAILABLE));
        assert!(!form.is_busy());
    }

    #[test]
    fn suggestions_apply_only_while_awaited() {
        let (mut logic, _) = logic_with(&[]);
        logic.open_create();

        let request_id = logic.tracker.begin();
        logic.form.as_mut().unwrap().set_busy(true);
        let suggestion = cg::Suggestion {
            description: Some("A haunted ship.".to_string()),
            ..Default::default()
        };
        logic
            .suggestion_tx
            .send((request_id, Ok(suggestion.clone())))
            .unwrap();
        logic.update();
        let form = logic.form().unwrap();
        assert_eq!(form.value(FormField::Description), Some("A haunted ship."));
        assert!(!form.is_busy());

        // A result arriving after the form closed is dropped.
        let request_id = logic.tracker.begin();
        logic.handle_input(Input::Back);
        logic.open_create();
        logic.suggestion_tx.send((request_id, Ok(suggestion))).unwrap();
        logic.update();
        assert_eq!(
            logic.form().unwrap().value(FormField::Description),
            Some("")
        );
    }

    #[test]
    fn failed_suggestions_clear_the_busy_state() {
        let (mut logic, _) = logic_with(&[]);
        logic.open_create();
        let request_id = logic.tracker.begin();
        logic.form.as_mut().unwrap().set_busy(true);
        logic
            .suggestion_tx
            .send((request_id, Err(cg::ClientError::EmptyResponse)))
            .unwrap();
        logic.update();
        assert!(!logic.form().unwrap().is_busy());
        assert!(logic.notice().is_some());
    }

    #[test]
    fn clicks_focus_then_activate() {
        let entries = [entry("A", "Sci-Fi"), entry("B", "Action")];
        let (mut logic, _) = logic_with(&entries);
        logic.activate_at(FocusTarget::Shelf(1));
        assert_eq!(
            logic.player().map(|p| &p.entry.id),
            Some(&EntryId::from("B"))
        );
        assert!(logic.activate_at(FocusTarget::Hero).is_empty());

        logic.handle_input(Input::Back);
        let add_slot = logic.categories().len();
        logic.activate_at(FocusTarget::Sidebar(add_slot));
        assert!(logic.form().is_some());
    }

    #[test]
    fn player_activate_launches_externally() {
        let (mut logic, _) = logic_with(&[entry("A", "Drama")]);
        logic.handle_input(Input::Activate);
        assert_eq!(
            logic.handle_input(Input::Activate),
            [Effect::LaunchExternal("https://youtu.be/A".to_string())]
        );
    }
}
