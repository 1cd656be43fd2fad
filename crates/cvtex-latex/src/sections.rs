//! Section formatters
//!
//! One formatter per resume section. Each returns the LaTeX fragment for
//! its section, or an empty string when the section has no data.

use cvtex_ast::{Category, Contact, Diploma, Experience, Language, SideProject};

use crate::escape::{escape_latex, markdown_bold, url_label};

/// Separator placed between the items of a category
pub const ITEM_SEPARATOR: &str = " \\textbar{} ";

/// Vertical space inserted between two list entries.
///
/// An entry with more than `max_highlights` highlights or more than
/// `max_tags` tags is followed by the `large` token, otherwise by `small`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySpacing {
    pub large: &'static str,
    pub small: &'static str,
    pub max_highlights: usize,
    pub max_tags: usize,
}

impl EntrySpacing {
    /// Token to place after an entry with the given counts
    pub fn after(&self, highlights: usize, tags: usize) -> &'static str {
        if highlights > self.max_highlights || tags > self.max_tags {
            self.large
        } else {
            self.small
        }
    }
}

/// Spacing between professional experience entries
pub const EXPERIENCE_SPACING: EntrySpacing = EntrySpacing {
    large: "\\vspace{4pt}",
    small: "\\vspace{2pt}",
    max_highlights: 3,
    max_tags: 5,
};

/// Spacing between side project entries
pub const SIDE_PROJECT_SPACING: EntrySpacing = EntrySpacing {
    large: "\\vspace{6pt}",
    small: "\\vspace{4pt}",
    max_highlights: 2,
    max_tags: 4,
};

/// Spacing between hard skill categories
pub const HARD_SKILL_SPACING: &str = "\\vspace{0.5pt}";

/// Spacing between soft skill (and interest) categories
pub const SOFT_SKILL_SPACING: &str = "\\vspace{1pt}";

/// Formatters for each resume section
pub struct SectionFormatter;

impl SectionFormatter {
    /// Contact lines for the `\personalinfo{}` block
    pub fn contact_info(contact: Option<&Contact>) -> String {
        let Some(contact) = contact else {
            return String::new();
        };

        let mut lines = Vec::new();
        if let Some(ref email) = contact.email {
            lines.push(format!("\\email{{{}}}", escape_latex(email)));
        }
        if let Some(ref phone) = contact.phone {
            lines.push(format!("\\phone{{{}}}", escape_latex(phone)));
        }
        if let Some(ref location) = contact.location {
            lines.push(format!("\\location{{{}}}", escape_latex(location)));
        }
        if let Some(ref linkedin) = contact.linkedin {
            lines.push(format!("\\linkedin{{{}}}", escape_latex(linkedin)));
        }
        if let Some(ref age) = contact.age {
            lines.push(format!("\\textbf{{Age}}: {}", age));
        }

        lines.join("\n    ")
    }

    /// Professional experience entries
    pub fn experience(entries: &[Experience]) -> String {
        let mut parts = Vec::new();

        for (i, job) in entries.iter().enumerate() {
            parts.push(Self::event_entry(
                &job.title,
                &job.company,
                &job.dates,
                &job.location,
                &job.highlights,
                &[],
                &job.tags,
            ));

            if i + 1 < entries.len() {
                parts.push(
                    EXPERIENCE_SPACING
                        .after(job.highlights.len(), job.tags.len())
                        .to_string(),
                );
            }
        }

        parts.join("\n")
    }

    /// Side project entries, with links listed after the highlights
    pub fn side_projects(entries: &[SideProject]) -> String {
        let mut parts = Vec::new();

        for (i, project) in entries.iter().enumerate() {
            parts.push(Self::event_entry(
                &project.title,
                &project.role,
                &project.dates,
                &project.location,
                &project.highlights,
                &project.links(),
                &project.tags,
            ));

            if i + 1 < entries.len() {
                parts.push(
                    SIDE_PROJECT_SPACING
                        .after(project.highlights.len(), project.tags.len())
                        .to_string(),
                );
            }
        }

        parts.join("\n")
    }

    /// One `\cvevent` with its itemized highlights and tag row.
    ///
    /// Links are only listed when there are highlights to attach them to.
    fn event_entry(
        title: &str,
        subtitle: &str,
        dates: &str,
        location: &str,
        highlights: &[String],
        links: &[String],
        tags: &[String],
    ) -> String {
        let mut entry = format!(
            "\\cvevent{{\\textbf{{{}}}}}{{{}}}{{{}}}{{{}}}\n",
            escape_latex(title),
            escape_latex(subtitle),
            escape_latex(dates),
            escape_latex(location)
        );

        if !highlights.is_empty() {
            entry.push_str("\\begin{itemize}\n");
            for highlight in highlights {
                entry.push_str(&format!(
                    "  \\item {}\n",
                    escape_latex(&markdown_bold(highlight))
                ));
            }
            for url in links {
                entry.push_str(&format!(
                    "  \\item \\href{{{}}}{{\\faExternalLink\\ {}}}\n",
                    url,
                    url_label(url)
                ));
            }
            entry.push_str("\\end{itemize}\n");
        }

        if !tags.is_empty() {
            for tag in tags {
                entry.push_str(&format!("\\cvtag{{{}}}", escape_latex(tag)));
            }
            entry.push('\n');
        }

        entry
    }

    /// Diploma entries
    pub fn diplomas(entries: &[Diploma]) -> String {
        entries
            .iter()
            .map(|d| {
                format!(
                    "\\cvevent{{\\faMortarBoard \\textbf{{{}}}}}{{{}}}{{{}}}{{{}}}",
                    escape_latex(&d.title),
                    escape_latex(&d.school),
                    escape_latex(&d.years),
                    escape_latex(&d.location)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Hard skill categories
    pub fn hard_skills(categories: &[Category]) -> String {
        Self::categories(categories, HARD_SKILL_SPACING).join("\n\n")
    }

    /// Soft skill categories
    pub fn soft_skills(categories: &[Category]) -> String {
        Self::categories(categories, SOFT_SKILL_SPACING).join("\n\n")
    }

    /// Interest categories, laid out like skills
    pub fn interests(categories: &[Category]) -> String {
        Self::categories(categories, SOFT_SKILL_SPACING).join("\n\n")
    }

    /// Hard and soft skills as one block under their own headers.
    ///
    /// The document layout places the two lists in separate columns and
    /// does not use this.
    pub fn skills_combined(hard: &[Category], soft: &[Category]) -> String {
        let mut parts = Vec::new();

        if !hard.is_empty() {
            parts.push("\\textcolor{SlateGrey}{\\textbf{Hard Skills}}".to_string());
            parts.extend(Self::categories(hard, SOFT_SKILL_SPACING));
        }

        if !soft.is_empty() {
            if !parts.is_empty() {
                parts.push("\\vspace{3pt}".to_string());
            }
            parts.push("\\textcolor{SlateGrey}{\\textbf{Soft Skills}}".to_string());
            parts.extend(Self::categories(soft, SOFT_SKILL_SPACING));
        }

        parts.join("\n\n")
    }

    /// Category blocks with a spacing token after every position but the
    /// last. Categories without a list render nothing.
    fn categories(categories: &[Category], spacing: &str) -> Vec<String> {
        let mut parts = Vec::new();

        for (i, category) in categories.iter().enumerate() {
            let Some(ref items) = category.items else {
                continue;
            };
            let joined = items.join(ITEM_SEPARATOR);
            parts.push(format!(
                "\\textcolor{{SlateGrey}}{{\\textbf{{{}}}}}\\\\\n{}",
                escape_latex(&category.name),
                escape_latex(&joined)
            ));
            if i + 1 < categories.len() {
                parts.push(spacing.to_string());
            }
        }

        parts
    }

    /// Language list items (without the surrounding itemize)
    pub fn languages(entries: &[Language]) -> String {
        entries
            .iter()
            .map(|l| {
                format!(
                    "  \\item \\textbf{{{}}} \\hfill {} {}",
                    escape_latex(&l.name),
                    escape_latex(&l.level),
                    escape_latex(&l.descriptor)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn job(title: &str, highlights: usize, tags: usize) -> Experience {
        Experience {
            title: title.to_string(),
            company: "Co".to_string(),
            dates: "2020".to_string(),
            location: "Lyon".to_string(),
            highlights: (0..highlights).map(|i| format!("h{}", i)).collect(),
            tags: (0..tags).map(|i| format!("t{}", i)).collect(),
        }
    }

    fn category(name: &str, items: &[&str]) -> Category {
        Category {
            name: name.to_string(),
            items: Some(strings(items)),
        }
    }

    #[test]
    fn test_empty_sections_render_nothing() {
        assert_eq!(SectionFormatter::experience(&[]), "");
        assert_eq!(SectionFormatter::side_projects(&[]), "");
        assert_eq!(SectionFormatter::diplomas(&[]), "");
        assert_eq!(SectionFormatter::hard_skills(&[]), "");
        assert_eq!(SectionFormatter::soft_skills(&[]), "");
        assert_eq!(SectionFormatter::interests(&[]), "");
        assert_eq!(SectionFormatter::languages(&[]), "");
        assert_eq!(SectionFormatter::skills_combined(&[], &[]), "");
        assert_eq!(SectionFormatter::contact_info(None), "");
    }

    #[test]
    fn test_experience_entry_layout() {
        let entry = Experience {
            title: "Engineer".to_string(),
            company: "R&D Lab".to_string(),
            dates: "2020 -- 2022".to_string(),
            location: "Paris".to_string(),
            highlights: strings(&["Built **fast** things", "Cut cost by 30%"]),
            tags: strings(&["Rust", "C++"]),
        };

        let out = SectionFormatter::experience(&[entry]);
        assert_eq!(
            out,
            "\\cvevent{\\textbf{Engineer}}{R\\&D Lab}{2020 -- 2022}{Paris}\n\
             \\begin{itemize}\n\
             \x20 \\item Built \\textbf{fast} things\n\
             \x20 \\item Cut cost by 30\\%\n\
             \\end{itemize}\n\
             \\cvtag{Rust}\\cvtag{C++}\n"
        );
    }

    #[test]
    fn test_experience_spacing_count_and_choice() {
        let jobs = vec![job("a", 4, 0), job("b", 1, 6), job("c", 3, 5), job("d", 9, 9)];
        let out = SectionFormatter::experience(&jobs);

        assert_eq!(out.matches("\\cvevent{").count(), 4);
        assert_eq!(out.matches("\\vspace{").count(), 3);

        let a = out.find("{a}").unwrap();
        let b = out.find("{b}").unwrap();
        let c = out.find("{c}").unwrap();
        let d = out.find("{d}").unwrap();
        assert!(out[a..b].contains("\\vspace{4pt}"));
        assert!(out[b..c].contains("\\vspace{4pt}"));
        assert!(out[c..d].contains("\\vspace{2pt}"));
        assert!(!out[d..].contains("\\vspace{"));
    }

    #[test]
    fn test_experience_without_highlights_or_tags() {
        let out = SectionFormatter::experience(&[job("solo", 0, 0)]);
        assert_eq!(out, "\\cvevent{\\textbf{solo}}{Co}{2020}{Lyon}\n");
    }

    #[test]
    fn test_side_project_links() {
        let project = SideProject {
            title: "Tool".to_string(),
            role: "Solo developer".to_string(),
            highlights: strings(&["Does things"]),
            url: "https://a.x/my_tool, https://b.x".to_string(),
            ..Default::default()
        };

        let out = SectionFormatter::side_projects(&[project]);
        let first = out
            .find("  \\item \\href{https://a.x/my_tool}{\\faExternalLink\\ https://a.x/my\\_tool}\n")
            .expect("first link");
        let second = out
            .find("  \\item \\href{https://b.x}{\\faExternalLink\\ https://b.x}\n")
            .expect("second link");
        assert!(first < second);
        assert!(out.find("Does things").unwrap() < first);
    }

    #[test]
    fn test_side_project_not_public() {
        let project = SideProject {
            title: "Stealth".to_string(),
            role: "Co-founder".to_string(),
            highlights: strings(&["Secret"]),
            url: "Not public yet".to_string(),
            ..Default::default()
        };

        let out = SectionFormatter::side_projects(&[project]);
        assert!(!out.contains("\\href"));
        assert!(out.contains("{Co-founder}"));
    }

    #[test]
    fn test_side_project_links_need_highlights() {
        let project = SideProject {
            title: "Bare".to_string(),
            url: "https://a.x".to_string(),
            ..Default::default()
        };
        assert!(!SectionFormatter::side_projects(&[project]).contains("\\href"));
    }

    #[test]
    fn test_side_project_spacing() {
        let big = SideProject {
            title: "big".to_string(),
            highlights: strings(&["1", "2", "3"]),
            ..Default::default()
        };
        let small = SideProject {
            title: "small".to_string(),
            tags: strings(&["x"]),
            ..Default::default()
        };
        let out = SectionFormatter::side_projects(&[big, small.clone(), small]);
        assert_eq!(out.matches("\\vspace{6pt}").count(), 1);
        assert_eq!(out.matches("\\vspace{4pt}").count(), 1);
    }

    #[test]
    fn test_diplomas() {
        let out = SectionFormatter::diplomas(&[
            Diploma {
                title: "MSc".to_string(),
                school: "INSA".to_string(),
                years: "2015".to_string(),
                location: "Lyon".to_string(),
            },
            Diploma {
                title: "BSc".to_string(),
                ..Default::default()
            },
        ]);
        assert_eq!(
            out,
            "\\cvevent{\\faMortarBoard \\textbf{MSc}}{INSA}{2015}{Lyon}\n\
             \\cvevent{\\faMortarBoard \\textbf{BSc}}{}{}{}"
        );
    }

    #[test]
    fn test_hard_skills_layout() {
        let out = SectionFormatter::hard_skills(&[
            category("Languages", &["Rust", "Go"]),
            category("Data_Stores", &["SQL"]),
        ]);
        assert_eq!(
            out,
            "\\textcolor{SlateGrey}{\\textbf{Languages}}\\\\\nRust \\textbar{} Go\n\n\
             \\vspace{0.5pt}\n\n\
             \\textcolor{SlateGrey}{\\textbf{Data\\_Stores}}\\\\\nSQL"
        );
    }

    #[test]
    fn test_soft_skills_and_interests_spacing() {
        let cats = [category("A", &["x"]), category("B", &["y"])];
        assert!(SectionFormatter::soft_skills(&cats).contains("\\vspace{1pt}"));
        assert!(SectionFormatter::interests(&cats).contains("\\vspace{1pt}"));
    }

    #[test]
    fn test_non_list_category_skipped() {
        let cats = [
            category("A", &["x"]),
            Category {
                name: "Broken".to_string(),
                items: None,
            },
        ];
        let out = SectionFormatter::hard_skills(&cats);
        assert!(!out.contains("Broken"));
        // the skipped category still counts as a later position
        assert!(out.ends_with("\\vspace{0.5pt}"));
    }

    #[test]
    fn test_skill_items_escaped_in_markup_mode() {
        let out = SectionFormatter::soft_skills(&[category("Tools", &["C#", "F#"])]);
        assert!(out.ends_with("C\\# \\textbar{} F\\#"));
    }

    #[test]
    fn test_skills_combined() {
        let out = SectionFormatter::skills_combined(
            &[category("Lang", &["Rust"])],
            &[category("Team", &["Mentoring"])],
        );
        let parts: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(parts[0], "\\textcolor{SlateGrey}{\\textbf{Hard Skills}}");
        assert_eq!(parts[2], "\\vspace{3pt}");
        assert_eq!(parts[3], "\\textcolor{SlateGrey}{\\textbf{Soft Skills}}");
        assert_eq!(parts.len(), 5);
    }

    #[test]
    fn test_skills_combined_soft_only() {
        let out = SectionFormatter::skills_combined(&[], &[category("Team", &["Mentoring"])]);
        assert!(out.starts_with("\\textcolor{SlateGrey}{\\textbf{Soft Skills}}"));
        assert!(!out.contains("\\vspace{3pt}"));
    }

    #[test]
    fn test_languages() {
        let out = SectionFormatter::languages(&[Language {
            name: "English".to_string(),
            level: "C1".to_string(),
            descriptor: "(fluent)".to_string(),
        }]);
        assert_eq!(out, "  \\item \\textbf{English} \\hfill C1 (fluent)");
    }

    #[test]
    fn test_contact_info() {
        let contact = Contact {
            email: Some("a_b@example.com".to_string()),
            phone: None,
            location: Some("Lyon".to_string()),
            linkedin: None,
            age: Some("34".to_string()),
        };
        assert_eq!(
            SectionFormatter::contact_info(Some(&contact)),
            "\\email{a\\_b@example.com}\n    \\location{Lyon}\n    \\textbf{Age}: 34"
        );
    }

    #[test]
    fn test_entry_spacing_thresholds() {
        assert_eq!(EXPERIENCE_SPACING.after(3, 5), "\\vspace{2pt}");
        assert_eq!(EXPERIENCE_SPACING.after(4, 0), "\\vspace{4pt}");
        assert_eq!(EXPERIENCE_SPACING.after(0, 6), "\\vspace{4pt}");
        assert_eq!(SIDE_PROJECT_SPACING.after(2, 4), "\\vspace{4pt}");
        assert_eq!(SIDE_PROJECT_SPACING.after(3, 0), "\\vspace{6pt}");
    }
}
