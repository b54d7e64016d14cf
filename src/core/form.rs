//! # Forms
//!
//! Text-backed input forms for the create and edit screens, plus the
//! client-side validation that turns them into entities.
//!
//! A form is a flat list of fields. Each field keeps the raw text the user
//! typed; nothing is parsed until submission, so a half-typed number never
//! loses characters.

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::entity::{Animal, EntityKind, EntitySnapshot, Habitat, Keeper, iso_datetime};

/// Client-side validation failures. Never sent to the network.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} must be a whole number of zero or more")]
    NotACount(&'static str),
    #[error("{0} must look like 2024-01-31T09:30")]
    BadDateTime(&'static str),
    #[error("{0} must look like 2024-01-31")]
    BadDate(&'static str),
    #[error("{0} must be a valid email address")]
    BadEmail(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Positive integer id; becomes read-only when editing.
    Id,
    Integer,
    Decimal,
    DateTime,
    Date,
    Flag,
    /// Optional reference to another entity's id; blank means unassigned.
    Reference,
}

impl FieldKind {
    fn accepts(self, c: char, current: &str) -> bool {
        match self {
            FieldKind::Text => !c.is_control(),
            FieldKind::Id | FieldKind::Integer | FieldKind::Reference => c.is_ascii_digit(),
            FieldKind::Decimal => c.is_ascii_digit() || (c == '.' && !current.contains('.')),
            FieldKind::DateTime => c.is_ascii_digit() || matches!(c, '-' | ':' | 'T' | ' '),
            FieldKind::Date => c.is_ascii_digit() || c == '-',
            FieldKind::Flag => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub flag: bool,
    pub read_only: bool,
}

impl Field {
    fn text(label: &'static str, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            label,
            kind,
            value: value.into(),
            flag: false,
            read_only: false,
        }
    }

    fn flag(label: &'static str, flag: bool) -> Self {
        Self {
            label,
            kind: FieldKind::Flag,
            value: String::new(),
            flag,
            read_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl Form {
    fn new(fields: Vec<Field>) -> Self {
        let mut form = Self { fields, focus: 0 };
        if form.fields.first().is_some_and(|f| f.read_only) {
            form.focus_next();
        }
        form
    }

    /// Blank form for creating an entity of `kind`.
    pub fn blank(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Animal => Self::new(vec![
                Field::text("ID", FieldKind::Id, ""),
                Field::text("Name", FieldKind::Text, ""),
                Field::text("Weight (kg)", FieldKind::Decimal, ""),
                Field::text("Born", FieldKind::DateTime, ""),
                Field::flag("Wild", false),
                Field::text("Habitat ID", FieldKind::Reference, ""),
            ]),
            EntityKind::Habitat => Self::new(vec![
                Field::text("ID", FieldKind::Id, ""),
                Field::text("Name", FieldKind::Text, ""),
                Field::text("Area (m²)", FieldKind::Decimal, ""),
                Field::text("Established", FieldKind::DateTime, ""),
                Field::flag("Visitor accessible", false),
                Field::flag("Covered", false),
            ]),
            EntityKind::Keeper => Self::new(vec![
                Field::text("ID", FieldKind::Id, ""),
                Field::text("First name", FieldKind::Text, ""),
                Field::text("Last name", FieldKind::Text, ""),
                Field::text("Email", FieldKind::Text, ""),
                Field::text("Hire date", FieldKind::Date, ""),
                Field::text("Specialization", FieldKind::Text, ""),
                Field::flag("Active", true),
                Field::text("Years of experience", FieldKind::Integer, "0"),
            ]),
        }
    }

    /// Form pre-filled from a snapshot, with the id locked.
    pub fn editing(snapshot: &EntitySnapshot) -> Self {
        let mut form = Self::blank(snapshot.kind());
        let values: Vec<(String, bool)> = match snapshot {
            EntitySnapshot::Animal(a) => vec![
                (a.id.to_string(), false),
                (a.name.clone(), false),
                (a.weight.to_string(), false),
                (iso_datetime::format(&a.birth_date_time), false),
                (String::new(), a.is_wild),
                (a.habitat_id.map(|id| id.to_string()).unwrap_or_default(), false),
            ],
            EntitySnapshot::Habitat(h) => vec![
                (h.id.to_string(), false),
                (h.name.clone(), false),
                (h.area.to_string(), false),
                (iso_datetime::format(&h.established_date), false),
                (String::new(), h.is_visitor_accessible),
                (String::new(), h.is_covered),
            ],
            EntitySnapshot::Keeper(k) => vec![
                (k.id.to_string(), false),
                (k.first_name.clone(), false),
                (k.last_name.clone(), false),
                (k.email.clone(), false),
                (k.hire_date.to_string(), false),
                (k.specialization.clone(), false),
                (String::new(), k.is_active),
                (k.years_of_experience.to_string(), false),
            ],
        };
        for (field, (value, flag)) in form.fields.iter_mut().zip(values) {
            field.value = value;
            field.flag = flag;
            field.read_only = field.kind == FieldKind::Id;
        }
        form.focus = 0;
        form.focus_next();
        form
    }

    pub fn focused(&self) -> Option<&Field> {
        self.fields.get(self.focus)
    }

    pub fn focus_next(&mut self) {
        let len = self.fields.len();
        for step in 1..=len {
            let idx = (self.focus + step) % len;
            if !self.fields[idx].read_only {
                self.focus = idx;
                return;
            }
        }
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields.len();
        for step in 1..=len {
            let idx = (self.focus + len - step) % len;
            if !self.fields[idx].read_only {
                self.focus = idx;
                return;
            }
        }
    }

    /// Typed character. Space toggles a flag field; other fields filter
    /// characters by kind.
    pub fn insert_char(&mut self, c: char) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        if field.read_only {
            return;
        }
        if field.kind == FieldKind::Flag {
            if c == ' ' {
                field.flag = !field.flag;
            }
            return;
        }
        if field.kind.accepts(c, &field.value) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && !field.read_only
        {
            field.value.pop();
        }
    }

    pub fn toggle(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.kind == FieldKind::Flag
            && !field.read_only
        {
            field.flag = !field.flag;
        }
    }

    /// Validate and build the entity this form describes.
    ///
    /// `base` carries fields the form does not edit (e.g. an animal's
    /// keeper), so an update never clears them.
    pub fn build(
        &self,
        kind: EntityKind,
        base: Option<&EntitySnapshot>,
    ) -> Result<EntitySnapshot, ValidationError> {
        let v = |i: usize| self.fields[i].value.as_str();
        let f = |i: usize| self.fields[i].flag;
        let l = |i: usize| self.fields[i].label;
        match kind {
            EntityKind::Animal => {
                let keeper_id = match base {
                    Some(EntitySnapshot::Animal(a)) => a.keeper_id,
                    _ => None,
                };
                Ok(EntitySnapshot::Animal(Animal {
                    id: parse_id(v(0), l(0))?,
                    name: required(v(1), l(1))?,
                    weight: parse_positive(v(2), l(2))?,
                    birth_date_time: parse_datetime(v(3), l(3))?,
                    is_wild: f(4),
                    habitat_id: parse_reference(v(5), l(5))?,
                    keeper_id,
                }))
            }
            EntityKind::Habitat => Ok(EntitySnapshot::Habitat(Habitat {
                id: parse_id(v(0), l(0))?,
                name: required(v(1), l(1))?,
                area: parse_positive(v(2), l(2))?,
                established_date: parse_datetime(v(3), l(3))?,
                is_visitor_accessible: f(4),
                is_covered: f(5),
                animals: None,
            })),
            EntityKind::Keeper => Ok(EntitySnapshot::Keeper(Keeper {
                id: parse_id(v(0), l(0))?,
                first_name: required(v(1), l(1))?,
                last_name: required(v(2), l(2))?,
                email: parse_email(v(3), l(3))?,
                hire_date: parse_date(v(4), l(4))?,
                specialization: required(v(5), l(5))?,
                is_active: f(6),
                years_of_experience: parse_count(v(7), l(7))?,
            })),
        }
    }
}

// ============================================================================
// Field parsers
// ============================================================================

pub fn required(raw: &str, label: &'static str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(label));
    }
    Ok(trimmed.to_string())
}

/// Positive integer identifier, as typed into a lookup box or id field.
pub fn parse_id(raw: &str, label: &'static str) -> Result<i64, ValidationError> {
    let trimmed = required(raw, label)?;
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::NotPositive(label)),
    }
}

pub fn parse_positive(raw: &str, label: &'static str) -> Result<f64, ValidationError> {
    let trimmed = required(raw, label)?;
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(label))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive(label))
    }
}

pub fn parse_count(raw: &str, label: &'static str) -> Result<u32, ValidationError> {
    required(raw, label)?
        .parse()
        .map_err(|_| ValidationError::NotACount(label))
}

fn parse_reference(raw: &str, label: &'static str) -> Result<Option<i64>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_id(raw, label).map(Some)
}

fn parse_datetime(raw: &str, label: &'static str) -> Result<chrono::NaiveDateTime, ValidationError> {
    let trimmed = required(raw, label)?;
    iso_datetime::parse(&trimmed).ok_or(ValidationError::BadDateTime(label))
}

fn parse_date(raw: &str, label: &'static str) -> Result<NaiveDate, ValidationError> {
    let trimmed = required(raw, label)?;
    NaiveDate::parse_from_str(&trimmed, "%Y-%m-%d").map_err(|_| ValidationError::BadDate(label))
}

fn parse_email(raw: &str, label: &'static str) -> Result<String, ValidationError> {
    let trimmed = required(raw, label)?;
    match trimmed.split_once('@') {
        Some((user, domain)) if !user.is_empty() && domain.contains('.') && !domain.starts_with('.') => {
            Ok(trimmed)
        }
        _ => Err(ValidationError::BadEmail(label)),
    }
}
