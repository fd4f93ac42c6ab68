//! Button form state and validation.
//!
//! Holds the text of each input, the field-level errors and the baseline the
//! form resets to. Validation runs when a field loses focus and on submit.

use crate::api::models::{Button, ButtonCreate, ButtonUpdate, DEFAULT_BUTTON_TYPE, format_number};
use std::collections::BTreeMap;

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Form inputs in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Type,
    Title,
    Description,
    Source,
    Duration,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Type,
        Field::Title,
        Field::Description,
        Field::Source,
        Field::Duration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Type => "Type",
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Source => "Source",
            Field::Duration => "Duration",
        }
    }

    /// Server-side length limit for text fields.
    fn max_len(self) -> Option<usize> {
        match self {
            Field::Type => Some(50),
            Field::Title | Field::Description | Field::Source => Some(255),
            Field::Duration => None,
        }
    }

    fn index(self) -> usize {
        Field::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    pub fn prev(self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

/// Raw text of every input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub button_type: String,
    pub title: String,
    pub description: String,
    pub source: String,
    pub duration: String,
}

impl FormValues {
    /// Values of an empty create form.
    pub fn create_defaults() -> Self {
        Self {
            button_type: DEFAULT_BUTTON_TYPE.to_string(),
            ..Self::default()
        }
    }

    /// Values pre-filled from an existing record.
    pub fn from_button(button: &Button) -> Self {
        Self {
            button_type: button.button_type.clone(),
            title: button.title.clone(),
            description: button.description.clone().unwrap_or_default(),
            source: button.source.clone().unwrap_or_default(),
            duration: button.duration.map(format_number).unwrap_or_default(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Type => &self.button_type,
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Source => &self.source,
            Field::Duration => &self.duration,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Type => &mut self.button_type,
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Source => &mut self.source,
            Field::Duration => &mut self.duration,
        }
    }
}

/// Field-level validation messages.
pub type FormErrors = BTreeMap<Field, String>;

/// Form state for the create and edit dialogs.
#[derive(Debug, Clone)]
pub struct ButtonForm {
    pub mode: FormMode,
    pub values: FormValues,
    /// Values the form resets to
    baseline: FormValues,
    pub focus: Field,
    pub errors: FormErrors,
}

impl ButtonForm {
    pub fn create() -> Self {
        Self::with_values(FormMode::Create, FormValues::create_defaults())
    }

    pub fn edit(button: &Button) -> Self {
        Self::with_values(FormMode::Edit, FormValues::from_button(button))
    }

    fn with_values(mode: FormMode, values: FormValues) -> Self {
        Self {
            mode,
            baseline: values.clone(),
            values,
            focus: Field::Type,
            errors: FormErrors::new(),
        }
    }

    /// Append a character to the focused input.
    pub fn input_char(&mut self, ch: char) {
        self.values.get_mut(self.focus).push(ch);
        self.revalidate_if_flagged(self.focus);
    }

    /// Remove the last character of the focused input.
    pub fn backspace(&mut self) {
        self.values.get_mut(self.focus).pop();
        self.revalidate_if_flagged(self.focus);
    }

    /// Move focus forward, validating the field being left.
    pub fn focus_next(&mut self) {
        self.blur();
        self.focus = self.focus.next();
    }

    /// Move focus backward, validating the field being left.
    pub fn focus_prev(&mut self) {
        self.blur();
        self.focus = self.focus.prev();
    }

    fn blur(&mut self) {
        self.validate_field(self.focus);
    }

    fn revalidate_if_flagged(&mut self, field: Field) {
        if self.errors.contains_key(&field) {
            self.validate_field(field);
        }
    }

    /// Validate one field and record or clear its error.
    pub fn validate_field(&mut self, field: Field) -> bool {
        match check_field(self.mode, field, self.values.get(field)) {
            Some(message) => {
                self.errors.insert(field, message);
                false
            }
            None => {
                self.errors.remove(&field);
                true
            }
        }
    }

    /// Validate every field, recording all errors.
    pub fn validate_all(&mut self) -> bool {
        Field::ALL
            .iter()
            .fold(true, |ok, field| self.validate_field(*field) && ok)
    }

    /// Whether every field currently passes validation.
    pub fn is_valid(&self) -> bool {
        Field::ALL
            .iter()
            .all(|field| check_field(self.mode, *field, self.values.get(*field)).is_none())
    }

    /// Whether the inputs differ from the baseline.
    pub fn is_dirty(&self) -> bool {
        self.values != self.baseline
    }

    /// Restore the baseline and drop all errors.
    pub fn reset(&mut self) {
        self.values = self.baseline.clone();
        self.errors.clear();
        self.focus = Field::Type;
    }

    /// Make the current inputs the new baseline.
    pub fn commit_baseline(&mut self) {
        self.baseline = self.values.clone();
    }

    /// Validate and build a create body.
    pub fn to_create(&mut self) -> Result<ButtonCreate, FormErrors> {
        if !self.validate_all() {
            return Err(self.errors.clone());
        }
        Ok(ButtonCreate {
            title: self.values.title.trim().to_string(),
            button_type: self.values.button_type.trim().to_string(),
            description: optional_text(&self.values.description),
            duration: parse_duration(&self.values.duration),
            source: optional_text(&self.values.source),
        })
    }

    /// Validate and build an update body. Empty optional inputs are omitted.
    pub fn to_update(&mut self) -> Result<ButtonUpdate, FormErrors> {
        if !self.validate_all() {
            return Err(self.errors.clone());
        }
        Ok(ButtonUpdate {
            title: Some(self.values.title.trim().to_string()),
            button_type: optional_text(&self.values.button_type),
            description: optional_text(&self.values.description),
            duration: parse_duration(&self.values.duration),
            source: optional_text(&self.values.source),
        })
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_duration(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Validation rule for one field.
fn check_field(mode: FormMode, field: Field, value: &str) -> Option<String> {
    let trimmed = value.trim();
    let required = match field {
        Field::Title => true,
        Field::Type => mode == FormMode::Create,
        _ => false,
    };

    if required && trimmed.is_empty() {
        return Some(format!("{} is required.", field.label()));
    }

    if field == Field::Duration && !trimmed.is_empty() {
        let positive = trimmed
            .parse::<f64>()
            .is_ok_and(|d| d.is_finite() && d > 0.0);
        if !positive {
            return Some("Duration must be a positive number.".to_string());
        }
    }

    if let Some(max) = field.max_len()
        && trimmed.chars().count() > max
    {
        return Some(format!(
            "{} must be at most {} characters.",
            field.label(),
            max
        ));
    }

    None
}
