//! The add/edit form shown in the edit overlay.
use cinestream_gemini::Suggestion;
use cinestream_state::{CategoryChoice, Entry, EntryDraft, EntryId, placeholder_poster_url};

use crate::navigator::Input;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    PlaybackUrl,
    PosterUrl,
    Category,
    CustomCategory,
    Description,
    Year,
    Rating,
    AutoFill,
    Save,
    Cancel,
}
impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::PlaybackUrl => "Playback URL",
            FormField::PosterUrl => "Poster URL",
            FormField::Category => "Category",
            FormField::CustomCategory => "Custom category",
            FormField::Description => "Description",
            FormField::Year => "Year",
            FormField::Rating => "Rating",
            FormField::AutoFill => "Auto-fill",
            FormField::Save => "Save",
            FormField::Cancel => "Cancel",
        }
    }

    pub fn is_button(&self) -> bool {
        matches!(
            self,
            FormField::AutoFill | FormField::Save | FormField::Cancel
        )
    }
}

/// What the owner of the form should do after an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    None,
    /// The form validated; save this draft.
    Submit(EntryDraft),
    /// Close the form without saving.
    Cancel,
    /// Request a suggestion for this title.
    AutoFill(String),
}

/// Label of the picker option that switches to a typed-in category.
pub const CUSTOM_CATEGORY_LABEL: &str = "Custom…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    editing: Option<EntryId>,
    title: String,
    playback_url: String,
    poster_url: String,
    description: String,
    year: String,
    rating: String,
    category_options: Vec<String>,
    /// Index into `category_options`; equal to its length when the custom option is selected.
    category_index: usize,
    custom_category: String,
    focused: FormField,
    busy: bool,
    error: Option<String>,
}
impl EditForm {
    /// An empty form for a new entry, with the first category preselected.
    pub fn create(category_options: Vec<String>) -> Self {
        Self {
            editing: None,
            title: String::new(),
            playback_url: String::new(),
            poster_url: String::new(),
            description: String::new(),
            year: String::new(),
            rating: String::new(),
            category_options,
            category_index: 0,
            custom_category: String::new(),
            focused: FormField::Title,
            busy: false,
            error: None,
        }
    }

    /// A form pre-filled from `entry`.
    ///
    /// A generated placeholder poster is left blank so that it follows the title if renamed.
    pub fn edit(entry: &Entry, category_options: Vec<String>) -> Self {
        let mut form = Self::create(category_options);
        form.editing = Some(entry.id.clone());
        form.title = entry.title.clone();
        form.playback_url = entry.playback_url.clone();
        if entry.poster_url != placeholder_poster_url(&entry.title) {
            form.poster_url = entry.poster_url.clone();
        }
        form.description = entry.description.clone().unwrap_or_default();
        form.year = entry.year.clone().unwrap_or_default();
        form.rating = entry.rating.clone().unwrap_or_default();
        match form
            .category_options
            .iter()
            .position(|c| c == &entry.category)
        {
            Some(index) => form.category_index = index,
            None => {
                form.category_index = form.category_options.len();
                form.custom_category = entry.category.clone();
            }
        }
        form
    }

    /// The ID of the entry being edited, or `None` in create mode.
    pub fn editing(&self) -> Option<&EntryId> {
        self.editing.as_ref()
    }

    pub fn focused(&self) -> FormField {
        self.focused
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn is_custom_category(&self) -> bool {
        self.category_index >= self.category_options.len()
    }

    /// The picker's current label.
    pub fn category_label(&self) -> &str {
        self.category_options
            .get(self.category_index)
            .map(String::as_str)
            .unwrap_or(CUSTOM_CATEGORY_LABEL)
    }

    /// The visible fields, in order. The custom category field only appears when selected.
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Title,
            FormField::PlaybackUrl,
            FormField::PosterUrl,
            FormField::Category,
        ];
        if self.is_custom_category() {
            fields.push(FormField::CustomCategory);
        }
        fields.extend([
            FormField::Description,
            FormField::Year,
            FormField::Rating,
            FormField::AutoFill,
            FormField::Save,
            FormField::Cancel,
        ]);
        fields
    }

    /// The contents of a text field; `None` for the picker and buttons.
    pub fn value(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::Title => &self.title,
            FormField::PlaybackUrl => &self.playback_url,
            FormField::PosterUrl => &self.poster_url,
            FormField::CustomCategory => &self.custom_category,
            FormField::Description => &self.description,
            FormField::Year => &self.year,
            FormField::Rating => &self.rating,
            FormField::Category | FormField::AutoFill | FormField::Save | FormField::Cancel => {
                return None;
            }
        };
        Some(value.as_str())
    }

    pub fn focus(&mut self, field: FormField) {
        if self.fields().contains(&field) {
            self.focused = field;
        }
    }

    pub fn handle_input(&mut self, input: Input) -> FormOutcome {
        match input {
            Input::Up => self.move_focus(-1),
            Input::Down => self.move_focus(1),
            Input::Left if self.focused == FormField::Category => self.cycle_category(-1),
            Input::Right if self.focused == FormField::Category => self.cycle_category(1),
            Input::Left | Input::Right => {}
            Input::Back => return FormOutcome::Cancel,
            Input::Activate => return self.activate(),
        }
        FormOutcome::None
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(value) = self.focused_value_mut() {
            value.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(value) = self.focused_value_mut() {
            value.pop();
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(value) = self.focused_value_mut() {
            value.clear();
        }
    }

    /// The draft described by the form. Empty optional fields are left out.
    pub fn draft(&self) -> EntryDraft {
        fn optional(value: &str) -> Option<String> {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }

        let category = match self.category_options.get(self.category_index) {
            Some(name) => CategoryChoice::Known(name.clone()),
            None => CategoryChoice::Custom(self.custom_category.clone()),
        };
        EntryDraft {
            title: self.title.trim().to_string(),
            playback_url: self.playback_url.trim().to_string(),
            poster_url: optional(&self.poster_url),
            description: optional(&self.description),
            category,
            year: optional(&self.year),
            rating: optional(&self.rating),
        }
    }

    /// Merges a suggestion into the form and clears the busy flag.
    ///
    /// A suggested category is only taken if it names one of the picker's options.
    /// Returns whether any field changed.
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) -> bool {
        self.busy = false;
        let mut changed = false;
        let mut set = |slot: &mut String, value: &Option<String>| {
            if let Some(value) = value.as_deref().map(str::trim)
                && !value.is_empty()
                && slot.as_str() != value
            {
                *slot = value.to_string();
                changed = true;
            }
        };
        set(&mut self.description, &suggestion.description);
        set(&mut self.year, &suggestion.year);
        set(&mut self.rating, &suggestion.rating);

        if let Some(category) = &suggestion.category
            && let Some(index) = self
                .category_options
                .iter()
                .position(|c| c.eq_ignore_ascii_case(category.trim()))
            && index != self.category_index
        {
            self.category_index = index;
            changed = true;
        }
        changed
    }

    fn activate(&mut self) -> FormOutcome {
        match self.focused {
            FormField::AutoFill => {
                if self.busy {
                    return FormOutcome::None;
                }
                let title = self.title.trim();
                if title.is_empty() {
                    self.error = Some("Enter a title to auto-fill".to_string());
                    return FormOutcome::None;
                }
                FormOutcome::AutoFill(title.to_string())
            }
            FormField::Save => {
                let draft = self.draft();
                match draft.validate() {
                    Ok(()) => {
                        self.error = None;
                        FormOutcome::Submit(draft)
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        FormOutcome::None
                    }
                }
            }
            FormField::Cancel => FormOutcome::Cancel,
            _ => {
                self.move_focus(1);
                FormOutcome::None
            }
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let fields = self.fields();
        let current = fields
            .iter()
            .position(|f| *f == self.focused)
            .unwrap_or_default();
        let next = current.saturating_add_signed(delta).min(fields.len() - 1);
        self.focused = fields[next];
    }

    fn cycle_category(&mut self, delta: isize) {
        // One extra slot for the custom option.
        let slots = self.category_options.len() + 1;
        self.category_index =
            (self.category_index as isize + delta).rem_euclid(slots as isize) as usize;
    }

    fn focused_value_mut(&mut self) -> Option<&mut String> {
        Some(match self.focused {
            FormField::Title => &mut self.title,
            FormField::PlaybackUrl => &mut self.playback_url,
            FormField::PosterUrl => &mut self.poster_url,
            FormField::CustomCategory => &mut self.custom_category,
            FormField::Description => &mut self.description,
            FormField::Year => &mut self.year,
            FormField::Rating => &mut self.rating,
            FormField::Category | FormField::AutoFill | FormField::Save | FormField::Cancel => {
                return None;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use cinestream_state::{ValidationError, seed_entries};

    use super::*;

    fn options() -> Vec<String> {
        ["Action", "Drama", "Sci-Fi"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn type_into(form: &mut EditForm, field: FormField, text: &str) {
        form.focus(field);
        form.clear_field();
        text.chars().for_each(|c| form.insert_char(c));
    }

    fn focus_button(form: &mut EditForm, button: FormField) {
        form.focus(button);
        assert_eq!(form.focused(), button);
    }

    #[test]
    fn create_mode_starts_blank_on_first_category() {
        let form = EditForm::create(options());
        assert_eq!(form.editing(), None);
        assert_eq!(form.focused(), FormField::Title);
        assert_eq!(form.category_label(), "Action");
        assert!(!form.fields().contains(&FormField::CustomCategory));
    }

    #[test]
    fn placeholder_posters_follow_a_renamed_title() {
        let mut entry = seed_entries().remove(0);
        entry.poster_url = placeholder_poster_url(&entry.title);
        let mut form = EditForm::edit(&entry, options());
        assert_eq!(form.value(FormField::PosterUrl), Some(""));

        type_into(&mut form, FormField::Title, "Inception Redux");
        let renamed = form.draft().into_entry(entry.id.clone());
        assert_eq!(renamed.poster_url, placeholder_poster_url("Inception Redux"));

        entry.poster_url = "https://example.com/poster.jpg".to_string();
        let form = EditForm::edit(&entry, options());
        assert_eq!(
            form.value(FormField::PosterUrl),
            Some("https://example.com/poster.jpg")
        );
    }

    #[test]
    fn edit_mode_prefills_and_detects_custom_category() {
        let mut entry = seed_entries().remove(0);
        let form = EditForm::edit(&entry, options());
        assert_eq!(form.editing(), Some(&entry.id));
        assert_eq!(form.value(FormField::Title), Some("Inception"));
        assert_eq!(form.category_label(), "Sci-Fi");

        entry.category = "Anime".to_string();
        let form = EditForm::edit(&entry, options());
        assert!(form.is_custom_category());
        assert_eq!(form.value(FormField::CustomCategory), Some("Anime"));
        assert!(form.fields().contains(&FormField::CustomCategory));
    }

    #[test]
    fn save_without_url_reports_inline() {
        let mut form = EditForm::create(options());
        type_into(&mut form, FormField::Title, "X");
        focus_button(&mut form, FormField::Save);
        assert_eq!(form.handle_input(Input::Activate), FormOutcome::None);
        assert_eq!(
            form.error(),
            Some(ValidationError::MissingPlaybackUrl.to_string().as_str())
        );
    }

    #[test]
    fn save_builds_a_draft_without_empty_optionals() {
        let mut form = EditForm::create(options());
        type_into(&mut form, FormField::Title, "  Heat ");
        type_into(&mut form, FormField::PlaybackUrl, "https://youtu.be/heat");
        type_into(&mut form, FormField::Year, "1995");
        focus_button(&mut form, FormField::Save);

        let FormOutcome::Submit(draft) = form.handle_input(Input::Activate) else {
            panic!("expected a submission");
        };
        assert_eq!(draft.title, "Heat");
        assert_eq!(draft.year.as_deref(), Some("1995"));
        assert_eq!(draft.description, None);
        assert_eq!(draft.poster_url, None);
        assert_eq!(draft.category, CategoryChoice::Known("Action".to_string()));
    }

    #[test]
    fn blank_custom_category_resolves_to_uncategorized() {
        let mut form = EditForm::create(options());
        form.focus(FormField::Category);
        form.handle_input(Input::Left);
        assert!(form.is_custom_category());
        assert_eq!(form.category_label(), CUSTOM_CATEGORY_LABEL);
        assert_eq!(form.draft().category.resolve(), cinestream_state::UNCATEGORIZED);

        form.handle_input(Input::Down);
        assert_eq!(form.focused(), FormField::CustomCategory);
        "Anime".chars().for_each(|c| form.insert_char(c));
        assert_eq!(form.draft().category, CategoryChoice::Custom("Anime".to_string()));

        form.focus(FormField::Category);
        form.handle_input(Input::Right);
        assert_eq!(form.category_label(), "Action");
    }

    #[test]
    fn focus_moves_clamp_at_the_ends() {
        let mut form = EditForm::create(options());
        form.handle_input(Input::Up);
        assert_eq!(form.focused(), FormField::Title);
        for _ in 0..20 {
            form.handle_input(Input::Down);
        }
        assert_eq!(form.focused(), FormField::Cancel);
        assert_eq!(form.handle_input(Input::Activate), FormOutcome::Cancel);
    }

    #[test]
    fn activate_on_a_text_field_advances() {
        let mut form = EditForm::create(options());
        form.handle_input(Input::Activate);
        assert_eq!(form.focused(), FormField::PlaybackUrl);
    }

    #[test]
    fn typing_and_editing_text() {
        let mut form = EditForm::create(options());
        type_into(&mut form, FormField::Title, "Alien");
        form.delete_char();
        assert_eq!(form.value(FormField::Title), Some("Alie"));
        form.clear_field();
        assert_eq!(form.value(FormField::Title), Some(""));

        form.focus(FormField::Category);
        form.insert_char('z');
        assert_eq!(form.category_label(), "Action");
    }

    #[test]
    fn auto_fill_needs_a_title_and_is_not_repeated_while_busy() {
        let mut form = EditForm::create(options());
        focus_button(&mut form, FormField::AutoFill);
        assert_eq!(form.handle_input(Input::Activate), FormOutcome::None);
        assert!(form.error().is_some());

        type_into(&mut form, FormField::Title, "Alien");
        focus_button(&mut form, FormField::AutoFill);
        assert_eq!(
            form.handle_input(Input::Activate),
            FormOutcome::AutoFill("Alien".to_string())
        );
        form.set_busy(true);
        assert_eq!(form.handle_input(Input::Activate), FormOutcome::None);
    }

    #[test]
    fn suggestion_only_takes_known_categories() {
        let mut form = EditForm::create(options());
        type_into(&mut form, FormField::Description, "old");
        form.set_busy(true);

        let changed = form.apply_suggestion(&Suggestion {
            description: Some("A space thriller.".to_string()),
            category: Some("Space Opera".to_string()),
            rating: None,
            year: Some("1979".to_string()),
        });
        assert!(changed);
        assert!(!form.is_busy());
        assert_eq!(form.value(FormField::Description), Some("A space thriller."));
        assert_eq!(form.value(FormField::Year), Some("1979"));
        assert_eq!(form.value(FormField::Rating), Some(""));
        assert_eq!(form.category_label(), "Action");

        form.apply_suggestion(&Suggestion {
            category: Some("sci-fi".to_string()),
            ..Default::default()
        });
        assert_eq!(form.category_label(), "Sci-Fi");
    }

    #[test]
    fn empty_suggestion_changes_nothing() {
        let mut form = EditForm::create(options());
        type_into(&mut form, FormField::Description, "keep me");
        assert!(!form.apply_suggestion(&Suggestion::default()));
        assert_eq!(form.value(FormField::Description), Some("keep me"));
    }
}
