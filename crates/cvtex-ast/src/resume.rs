//! Resume sections
//!
//! [`RecordSet`] holds the raw mapping loaded for each section. [`Resume`]
//! is the typed view the formatters work from: every field is optional in
//! the records and falls back to an empty value here.

use serde::Serialize;

use crate::value::{Mapping, Value};

/// Default role for side projects without one
pub const DEFAULT_ROLE: &str = "Solo developer";

/// Url value meaning "no link to show"
pub const URL_NOT_PUBLIC: &str = "Not public yet";

/// The sections a resume is assembled from, one record file each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Profile,
    Experience,
    Diplomas,
    HardSkills,
    SoftSkills,
    Languages,
    Interests,
    SideProjects,
}

impl Section {
    /// All sections in load order
    pub const ALL: [Section; 8] = [
        Section::Profile,
        Section::Experience,
        Section::Diplomas,
        Section::HardSkills,
        Section::SoftSkills,
        Section::Languages,
        Section::Interests,
        Section::SideProjects,
    ];

    /// File name (without extension) of the record file for this section
    pub fn file_stem(self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::Experience => "Professional_experience",
            Section::Diplomas => "diplomas",
            Section::HardSkills => "hard_skills",
            Section::SoftSkills => "soft_skills",
            Section::Languages => "languages",
            Section::Interests => "Interest",
            Section::SideProjects => "side_projects",
        }
    }
}

/// Raw records for every section; absent files leave an empty mapping
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecordSet {
    pub profile: Mapping,
    pub experience: Mapping,
    pub diplomas: Mapping,
    pub hard_skills: Mapping,
    pub soft_skills: Mapping,
    pub languages: Mapping,
    pub interests: Mapping,
    pub side_projects: Mapping,
}

impl RecordSet {
    /// Create an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the record for a section
    pub fn get(&self, section: Section) -> &Mapping {
        match section {
            Section::Profile => &self.profile,
            Section::Experience => &self.experience,
            Section::Diplomas => &self.diplomas,
            Section::HardSkills => &self.hard_skills,
            Section::SoftSkills => &self.soft_skills,
            Section::Languages => &self.languages,
            Section::Interests => &self.interests,
            Section::SideProjects => &self.side_projects,
        }
    }

    /// Replace the record for a section
    pub fn set(&mut self, section: Section, record: Mapping) {
        let slot = match section {
            Section::Profile => &mut self.profile,
            Section::Experience => &mut self.experience,
            Section::Diplomas => &mut self.diplomas,
            Section::HardSkills => &mut self.hard_skills,
            Section::SoftSkills => &mut self.soft_skills,
            Section::Languages => &mut self.languages,
            Section::Interests => &mut self.interests,
            Section::SideProjects => &mut self.side_projects,
        };
        *slot = record;
    }
}

/// Header information
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    pub summary: String,
    pub contact: Option<Contact>,
}

/// Contact lines, each present only if its key was in the record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub age: Option<String>,
}

/// One job
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub location: String,
    pub highlights: Vec<String>,
    pub tags: Vec<String>,
}

/// One diploma, keyed by its title
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diploma {
    pub title: String,
    pub school: String,
    pub years: String,
    pub location: String,
}

/// A named list of skills or interests.
///
/// `items` is `None` when the record value was not a list; such a category
/// renders nothing but still occupies a position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Category {
    pub name: String,
    pub items: Option<Vec<String>>,
}

/// One spoken language
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Language {
    pub name: String,
    pub level: String,
    pub descriptor: String,
}

/// One side project
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SideProject {
    pub title: String,
    pub role: String,
    pub dates: String,
    pub location: String,
    pub highlights: Vec<String>,
    pub tags: Vec<String>,
    pub url: String,
}

impl SideProject {
    /// Link targets to render, in order. Empty when the url is missing or
    /// not public.
    pub fn links(&self) -> Vec<String> {
        if self.url.is_empty() || self.url == URL_NOT_PUBLIC {
            return Vec::new();
        }
        if self.url.contains(',') {
            self.url.split(',').map(|u| u.trim().to_string()).collect()
        } else {
            vec![self.url.clone()]
        }
    }
}

/// Typed view of a whole resume
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resume {
    pub profile: Option<Profile>,
    pub experience: Vec<Experience>,
    pub diplomas: Vec<Diploma>,
    pub hard_skills: Vec<Category>,
    pub soft_skills: Vec<Category>,
    pub languages: Vec<Language>,
    pub interests: Vec<Category>,
    pub side_projects: Vec<SideProject>,
}

impl Resume {
    /// Build the typed view from raw records
    pub fn from_records(records: &RecordSet) -> Self {
        Self {
            profile: profile_from(&records.profile),
            experience: records
                .experience
                .iter()
                .map(|(id, v)| experience_from(id, v))
                .collect(),
            diplomas: records
                .diplomas
                .iter()
                .map(|(title, v)| diploma_from(title, v))
                .collect(),
            hard_skills: categories_from(&records.hard_skills),
            soft_skills: categories_from(&records.soft_skills),
            languages: records
                .languages
                .iter()
                .map(|(name, v)| language_from(name, v))
                .collect(),
            interests: categories_from(&records.interests),
            side_projects: records
                .side_projects
                .iter()
                .map(|(id, v)| side_project_from(id, v))
                .collect(),
        }
    }
}

impl From<&RecordSet> for Resume {
    fn from(records: &RecordSet) -> Self {
        Self::from_records(records)
    }
}

fn entry_fields(value: &Value) -> Mapping {
    value.as_mapping().cloned().unwrap_or_default()
}

fn profile_from(record: &Mapping) -> Option<Profile> {
    if record.is_empty() {
        return None;
    }
    let summary = match record.get("summary") {
        Some(v) if v.is_truthy() => v.to_text(),
        _ => String::new(),
    };
    let contact = record
        .get("contact")
        .and_then(Value::as_mapping)
        .map(|c| Contact {
            email: c.get("email").map(Value::to_text),
            phone: c.get("phone").map(Value::to_text),
            location: c.get("location").map(Value::to_text),
            linkedin: c.get("linkedin").map(Value::to_text),
            age: c.get("age").map(Value::to_text),
        });
    Some(Profile {
        name: record.text("name"),
        tagline: record.text("tagline"),
        summary,
        contact,
    })
}

fn experience_from(id: &str, value: &Value) -> Experience {
    let f = entry_fields(value);
    Experience {
        title: f.text_or("title", id),
        company: f.text("company"),
        dates: f.text("dates"),
        location: f.text("location"),
        highlights: f.text_list("highlights"),
        tags: f.text_list("tags"),
    }
}

fn diploma_from(title: &str, value: &Value) -> Diploma {
    let f = entry_fields(value);
    Diploma {
        title: title.to_string(),
        school: f.text("school"),
        years: f.text("years"),
        location: f.text("location"),
    }
}

fn categories_from(record: &Mapping) -> Vec<Category> {
    record
        .iter()
        .map(|(name, v)| Category {
            name: name.to_string(),
            items: v
                .as_list()
                .map(|items| items.iter().map(Value::to_text).collect()),
        })
        .collect()
}

fn language_from(name: &str, value: &Value) -> Language {
    let f = entry_fields(value);
    Language {
        name: name.to_string(),
        level: f.text("level"),
        descriptor: f.text("descriptor"),
    }
}

fn side_project_from(id: &str, value: &Value) -> SideProject {
    let f = entry_fields(value);
    let url = match f.get("url") {
        Some(v) if v.is_truthy() => v.to_text(),
        _ => String::new(),
    };
    SideProject {
        title: f.text_or("title", id),
        role: f.text_or("role", DEFAULT_ROLE),
        dates: f.text("dates"),
        location: f.text("location"),
        highlights: f.text_list("highlights"),
        tags: f.text_list("tags"),
        url,
    }
}
