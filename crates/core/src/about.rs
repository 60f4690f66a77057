//! About-page section schema.
//!
//! Each `about_contents` row has a `section_type` and a free-form JSON
//! `content` column. The shape of `content` depends on the section type and
//! is enforced here on every write; stored rows always match their type.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lowest and highest year accepted for a milestone.
const MIN_MILESTONE_YEAR: i32 = 1900;
const MAX_MILESTONE_YEAR: i32 = 2100;

/// The kinds of section an about page is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Hero,
    Story,
    Mission,
    Values,
    Team,
    Milestones,
    Cta,
}

impl SectionType {
    pub const ALL: [SectionType; 7] = [
        SectionType::Hero,
        SectionType::Story,
        SectionType::Mission,
        SectionType::Values,
        SectionType::Team,
        SectionType::Milestones,
        SectionType::Cta,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Hero => "hero",
            SectionType::Story => "story",
            SectionType::Mission => "mission",
            SectionType::Values => "values",
            SectionType::Team => "team",
            SectionType::Milestones => "milestones",
            SectionType::Cta => "cta",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                CoreError::Validation(format!(
                    "Unknown section type '{value}'. Expected one of: {}",
                    allowed.join(", ")
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Content shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroContent {
    pub headline: String,
    pub subheadline: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryContent {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MissionContent {
    pub heading: String,
    pub statement: String,
    pub vision: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueItem {
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValuesContent {
    pub heading: Option<String>,
    pub items: Vec<ValueItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamContent {
    pub heading: Option<String>,
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Milestone {
    pub year: i32,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MilestonesContent {
    pub heading: Option<String>,
    pub items: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CtaContent {
    pub heading: String,
    pub body: Option<String>,
    pub button_label: String,
    pub button_url: String,
}

/// A validated about-page section.
#[derive(Debug, Clone, PartialEq)]
pub enum AboutSection {
    Hero(HeroContent),
    Story(StoryContent),
    Mission(MissionContent),
    Values(ValuesContent),
    Team(TeamContent),
    Milestones(MilestonesContent),
    Cta(CtaContent),
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Parse `content` as the shape required by `section_type` and check it.
///
/// Unknown fields, missing required fields, blank required strings and empty
/// lists are all rejected with [`CoreError::Validation`].
pub fn validate_section(
    section_type: SectionType,
    content: &serde_json::Value,
) -> Result<AboutSection, CoreError> {
    let section = match section_type {
        SectionType::Hero => AboutSection::Hero(parse(section_type, content)?),
        SectionType::Story => AboutSection::Story(parse(section_type, content)?),
        SectionType::Mission => AboutSection::Mission(parse(section_type, content)?),
        SectionType::Values => AboutSection::Values(parse(section_type, content)?),
        SectionType::Team => AboutSection::Team(parse(section_type, content)?),
        SectionType::Milestones => AboutSection::Milestones(parse(section_type, content)?),
        SectionType::Cta => AboutSection::Cta(parse(section_type, content)?),
    };
    check_section(&section)?;
    Ok(section)
}

fn parse<T: serde::de::DeserializeOwned>(
    section_type: SectionType,
    content: &serde_json::Value,
) -> Result<T, CoreError> {
    T::deserialize(content).map_err(|e| {
        CoreError::Validation(format!(
            "Invalid content for '{}' section: {e}",
            section_type.as_str()
        ))
    })
}

fn check_section(section: &AboutSection) -> Result<(), CoreError> {
    match section {
        AboutSection::Hero(c) => required("headline", &c.headline),
        AboutSection::Story(c) => {
            required("heading", &c.heading)?;
            non_empty_list("paragraphs", &c.paragraphs)?;
            c.paragraphs
                .iter()
                .try_for_each(|p| required("paragraphs[]", p))
        }
        AboutSection::Mission(c) => {
            required("heading", &c.heading)?;
            required("statement", &c.statement)
        }
        AboutSection::Values(c) => {
            non_empty_list("items", &c.items)?;
            c.items.iter().try_for_each(|item| {
                required("items[].title", &item.title)?;
                required("items[].description", &item.description)
            })
        }
        AboutSection::Team(c) => {
            non_empty_list("members", &c.members)?;
            c.members.iter().try_for_each(|m| {
                required("members[].name", &m.name)?;
                required("members[].role", &m.role)
            })
        }
        AboutSection::Milestones(c) => {
            non_empty_list("items", &c.items)?;
            c.items.iter().try_for_each(|m| {
                required("items[].title", &m.title)?;
                if !(MIN_MILESTONE_YEAR..=MAX_MILESTONE_YEAR).contains(&m.year) {
                    return Err(CoreError::Validation(format!(
                        "items[].year must be between {MIN_MILESTONE_YEAR} and {MAX_MILESTONE_YEAR}, got {}",
                        m.year
                    )));
                }
                Ok(())
            })
        }
        AboutSection::Cta(c) => {
            required("heading", &c.heading)?;
            required("button_label", &c.button_label)?;
            required("button_url", &c.button_url)
        }
    }
}

fn required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}

fn non_empty_list<T>(field: &str, items: &[T]) -> Result<(), CoreError> {
    if items.is_empty() {
        return Err(CoreError::Validation(format!(
            "{field} must contain at least one entry"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn section_type_round_trips_through_str() {
        for t in SectionType::ALL {
            assert_eq!(SectionType::parse(t.as_str()).unwrap(), t);
        }
    }

    #[test]
    fn unknown_section_type_is_rejected() {
        let err = SectionType::parse("gallery").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("hero"));
    }

    #[test]
    fn hero_with_optional_fields_omitted() {
        let section = validate_section(SectionType::Hero, &json!({ "headline": "We build" }))
            .unwrap();
        assert_matches!(section, AboutSection::Hero(h) if h.subheadline.is_none());
    }

    #[test]
    fn hero_blank_headline_rejected() {
        let result = validate_section(SectionType::Hero, &json!({ "headline": "   " }));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("headline"));
    }

    #[test]
    fn unknown_field_rejected() {
        let result = validate_section(
            SectionType::Mission,
            &json!({ "heading": "Mission", "statement": "Ship", "colour": "red" }),
        );
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("colour"));
    }

    #[test]
    fn story_requires_paragraphs() {
        let result = validate_section(
            SectionType::Story,
            &json!({ "heading": "Our story", "paragraphs": [] }),
        );
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("paragraphs"));
    }

    #[test]
    fn team_member_requires_role() {
        let result = validate_section(
            SectionType::Team,
            &json!({ "members": [{ "name": "Ada", "role": "" }] }),
        );
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn milestone_year_out_of_range() {
        let result = validate_section(
            SectionType::Milestones,
            &json!({ "items": [{ "year": 1850, "title": "Founded" }] }),
        );
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("1850"));
    }

    #[test]
    fn valid_values_section() {
        let section = validate_section(
            SectionType::Values,
            &json!({
                "heading": "What we value",
                "items": [
                    { "title": "Craft", "description": "Details matter" },
                    { "title": "Honesty", "description": "No surprises", "icon": "handshake" }
                ]
            }),
        )
        .unwrap();
        assert_matches!(section, AboutSection::Values(v) if v.items.len() == 2);
    }

    #[test]
    fn content_of_wrong_type_rejected() {
        let result = validate_section(SectionType::Cta, &json!(["not", "an", "object"]));
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("cta"));
    }
}
