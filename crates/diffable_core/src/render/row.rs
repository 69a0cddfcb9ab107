//! Row content variants and their render descriptions.
//!
//! The presentation layer switches on `RowContent` and draws whatever
//! `describe_row` returns; the reconciler never sees either type.

use crate::model::contact::{Contact, ContactSection};
use serde::{Deserialize, Serialize};

pub const CONTACT_ICON: &str = "person.fill";
pub const FAVOURITE_ICON: &str = "star.fill";
pub const NOT_FAVOURITE_ICON: &str = "star";

/// Everything the list can draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowContent {
    Header { section: ContactSection },
    Contact { name: String, is_favourite: bool },
}

impl From<&Contact> for RowContent {
    fn from(value: &Contact) -> Self {
        Self::Contact {
            name: value.name.clone(),
            is_favourite: value.is_favourite,
        }
    }
}

/// Toolkit-neutral description of one drawn row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowDescription {
    pub title: String,
    pub leading_icon: Option<&'static str>,
    pub trailing_icon: Option<&'static str>,
}

/// Maps one content variant to what should be drawn.
pub fn describe_row(content: &RowContent) -> RowDescription {
    match content {
        RowContent::Header { section } => RowDescription {
            title: section.title().to_string(),
            leading_icon: None,
            trailing_icon: None,
        },
        RowContent::Contact { name, is_favourite } => RowDescription {
            title: name.clone(),
            leading_icon: Some(CONTACT_ICON),
            trailing_icon: Some(if *is_favourite {
                FAVOURITE_ICON
            } else {
                NOT_FAVOURITE_ICON
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{describe_row, RowContent, FAVOURITE_ICON, NOT_FAVOURITE_ICON};
    use crate::model::contact::{Contact, ContactSection};

    #[test]
    fn header_uses_section_title() {
        let description = describe_row(&RowContent::Header {
            section: ContactSection::Secondary,
        });
        assert_eq!(description.title, "Peasants");
        assert_eq!(description.leading_icon, None);
    }

    #[test]
    fn favourite_flag_picks_star_icon() {
        let contact = Contact::new("Diana");
        let plain = describe_row(&RowContent::from(&contact));
        assert_eq!(plain.title, "Diana");
        assert_eq!(plain.trailing_icon, Some(NOT_FAVOURITE_ICON));

        let starred = describe_row(&RowContent::from(&contact.toggled_favourite()));
        assert_eq!(starred.trailing_icon, Some(FAVOURITE_ICON));
    }
}
