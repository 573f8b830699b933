use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::db::models::author::{Author, NewAuthor};

/// Longest accepted value of any author field, in characters.
pub const MAX_FIELD_LENGTH: usize = 100;

/// Author form submission. Missing fields deserialize as empty and fail validation.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AuthorForm {
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Country of origin.
    pub country: String,
}

/// Validation errors keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

impl AuthorForm {
    /// Validate the submission into the editable fields of an author.
    ///
    /// # Errors
    /// Errors with the messages of every invalid field.
    pub fn validate(&self) -> Result<NewAuthor, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = clean(&mut errors, "name", &self.name);
        let surname = clean(&mut errors, "surname", &self.surname);
        let country = clean(&mut errors, "country", &self.country);
        if errors.is_empty() {
            Ok(NewAuthor {
                name,
                surname,
                country,
            })
        } else {
            Err(errors)
        }
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            name: author.name.clone(),
            surname: author.surname.clone(),
            country: author.country.clone(),
        }
    }
}

/// Trim a field and record why it is invalid, if it is.
fn clean(errors: &mut FieldErrors, field: &'static str, raw: &str) -> String {
    let value = raw.trim();
    let length = value.chars().count();
    if length == 0 {
        errors
            .entry(field)
            .or_default()
            .push("This field is required.".to_owned());
    } else if length > MAX_FIELD_LENGTH {
        errors.entry(field).or_default().push(format!(
            "Ensure this value has at most {MAX_FIELD_LENGTH} characters (it has {length})."
        ));
    }
    value.to_owned()
}

/// Query of the paginated author listing.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct PageQuery {
    /// Page number, or `last`.
    pub page: Option<String>,
}
