//! Full altacv document assembly
//!
//! The document is a static preamble, the header block, an optional
//! profile paragraph and two `paracol` regions separated by a page break.

use cvtex_ast::{Profile, Resume};

use crate::escape::escape_latex;
use crate::sections::SectionFormatter;

/// Comment rule framing the banners
pub const RULE: &str =
    "% ----------------------------------------------------------------------";

const PREAMBLE: &[&str] = &[
    "%%%%%%%%%%%%%%%%%",
    "% Curriculum vitae generated by cvtex",
    "%%%%%%%%%%%%%%%%%",
    "",
    "\\documentclass[9pt,a4paper,ragged2e]{altacv}",
    "\\usepackage[T1]{fontenc}",
    "\\usepackage[utf8]{inputenc}",
    "\\usepackage{paracol}",
    "\\usepackage{hyperref}",
    "\\usepackage{fontawesome}",
    "",
    "% Page geometry",
    "\\geometry{%",
    "  left=1.5cm,",
    "  right=1.5cm,",
    "  top=1.5cm,",
    "  bottom=1.5cm,",
    "  marginparwidth=0pt,",
    "  marginparsep=0pt",
    "}",
    "",
    "% Fonts",
    "\\ifxetexorluatex",
    "  \\setmainfont{Carlito}",
    "\\else",
    "  \\usepackage[utf8]{inputenc}",
    "  \\usepackage[T1]{fontenc}",
    "  \\usepackage[default]{lato}",
    "\\fi",
    "",
    "% Colours",
    "\\definecolor{VividPurple}{HTML}{1282a2}",
    "\\definecolor{VividPurplee}{HTML}{006c67}",
    "\\definecolor{SlateGrey}{HTML}{001f54}",
    "\\definecolor{LightGrey}{HTML}{0a1128}",
    "\\colorlet{heading}{VividPurple}",
    "\\colorlet{accent}{VividPurplee}",
    "\\colorlet{emphasis}{SlateGrey}",
    "\\colorlet{body}{LightGrey}",
    "",
    "% Bullet styles",
    "\\renewcommand{\\itemmarker}{{\\small\\textbullet}}",
    "\\renewcommand{\\ratingmarker}{\\faCircle}",
    "",
    "\\addbibresource{sample.bib}",
    "",
];

const CV_HEADER: &[&str] = &[
    "\\begin{fullwidth}",
    "\\makecvheader",
    "\\end{fullwidth}",
    "",
    "% Ensure smaller font for itemize",
    "\\AtBeginEnvironment{itemize}{\\small}",
    "",
];

/// Line buffer joined with `\n` at the end
#[derive(Default)]
struct Lines(Vec<String>);

impl Lines {
    fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    fn extend(&mut self, lines: &[&str]) {
        self.0.extend(lines.iter().map(|l| l.to_string()));
    }

    /// Push a fragment unless it is empty
    fn fragment(&mut self, text: String) {
        if !text.is_empty() {
            self.0.push(text);
        }
    }

    /// Three-line comment banner
    fn banner(&mut self, title: &str) {
        self.push(RULE);
        self.push(title);
        self.push(RULE);
    }

    fn finish(self) -> String {
        self.0.join("\n")
    }
}

/// Assembles the complete LaTeX document
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Build the document for a resume.
    ///
    /// Output has no trailing newline and depends only on the input.
    pub fn assemble(resume: &Resume) -> String {
        let mut out = Lines::default();

        out.extend(PREAMBLE);
        out.banner("%                               HEADER");
        out.push("\\begin{document}");

        if let Some(ref profile) = resume.profile {
            Self::personal_info(&mut out, profile);
        }
        out.extend(CV_HEADER);

        if let Some(ref profile) = resume.profile {
            if !profile.summary.is_empty() {
                out.banner("%                               PROFILE");
                out.push("\\cvsection[]{Profil}");
                out.push(escape_latex(&profile.summary));
                out.push("");
                out.push("\\vspace{4pt}");
                out.push("");
            }
        }

        Self::experience_region(&mut out, resume);
        out.push("\\newpage");
        Self::projects_region(&mut out, resume);

        out.push("\\end{document}");
        out.finish()
    }

    fn personal_info(out: &mut Lines, profile: &Profile) {
        out.push(format!("\\name{{{}}}", escape_latex(&profile.name)));
        out.push(format!("\\tagline{{{}}}", escape_latex(&profile.tagline)));
        out.push("");
        out.push("\\personalinfo{");
        out.fragment(SectionFormatter::contact_info(profile.contact.as_ref()));
        out.push("}");
        out.push("");
    }

    /// Experience and interests beside diplomas and hard skills
    fn experience_region(out: &mut Lines, resume: &Resume) {
        out.banner("%                       PROFESSIONAL EXPERIENCE & DIPLOMAS");
        out.push("\\begin{paracol}{2}");
        out.banner("%                             COLUMN 1");
        out.push("\\cvsection{Professional experience}");

        let experience = SectionFormatter::experience(&resume.experience);
        if experience.is_empty() {
            out.push("\\vspace{4pt}");
        } else {
            out.push(experience);
        }

        if !resume.interests.is_empty() {
            out.push("\\vspace{4pt}");
            out.push("\\cvsection{Interests}");
            out.fragment(SectionFormatter::interests(&resume.interests));
        }

        out.banner("%                             COLUMN 2");
        out.push("\\switchcolumn");
        out.push("\\cvsection{Diplomas}");
        out.fragment(SectionFormatter::diplomas(&resume.diplomas));

        if !resume.hard_skills.is_empty() {
            out.push("\\vspace{2pt}");
            out.push("\\cvsection{Hard Skills}");
            out.fragment(SectionFormatter::hard_skills(&resume.hard_skills));
        }

        out.push("\\end{paracol}");
    }

    /// Side projects beside soft skills and languages
    fn projects_region(out: &mut Lines, resume: &Resume) {
        out.banner("%                         SIDE PROJECTS & SOFT SKILLS");
        out.push("\\begin{paracol}{2}");
        out.banner("%                             COLUMN 1");
        out.push("\\cvsection{Side projects}");
        out.fragment(SectionFormatter::side_projects(&resume.side_projects));

        out.banner("%                             COLUMN 2");
        out.push("\\switchcolumn");

        if !resume.soft_skills.is_empty() {
            out.push("\\cvsection{Soft Skills}");
            out.fragment(SectionFormatter::soft_skills(&resume.soft_skills));
        }

        if !resume.languages.is_empty() {
            out.push("");
            out.push("\\vspace{2pt}");
            out.banner("%                             LANGUAGES");
            out.push("\\cvsection{Languages}");
            let languages = SectionFormatter::languages(&resume.languages);
            if !languages.is_empty() {
                out.push("\\begin{itemize}");
                out.push(languages);
                out.push("\\end{itemize}");
            }
        }

        out.push("\\end{paracol}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvtex_ast::{Category, Contact, Language};

    fn profile(summary: &str) -> Profile {
        Profile {
            name: "Ada Lovelace".to_string(),
            tagline: "Analyst & Writer".to_string(),
            summary: summary.to_string(),
            contact: None,
        }
    }

    #[test]
    fn test_empty_resume_skeleton() {
        let doc = DocumentAssembler::assemble(&Resume::default());

        assert!(doc.starts_with("%%%%%%%%%%%%%%%%%\n"));
        assert!(doc.ends_with("\\end{paracol}\n\\end{document}"));
        assert!(!doc.contains("\\name{"));
        assert!(!doc.contains("\\cvsection[]{Profil}"));
        assert!(!doc.contains("\\cvsection{Interests}"));
        assert!(!doc.contains("\\cvsection{Hard Skills}"));
        assert!(!doc.contains("\\cvsection{Soft Skills}"));
        assert!(!doc.contains("\\cvsection{Languages}"));
        // empty experience column keeps its spacing
        assert!(doc.contains("\\cvsection{Professional experience}\n\\vspace{4pt}\n"));
        assert_eq!(doc.matches("\\begin{paracol}{2}").count(), 2);
        assert_eq!(doc.matches("\\switchcolumn").count(), 2);
        assert_eq!(doc.matches("\\newpage").count(), 1);
    }

    #[test]
    fn test_section_order() {
        let doc = DocumentAssembler::assemble(&Resume::default());
        let order = [
            "\\documentclass[9pt,a4paper,ragged2e]{altacv}",
            "\\addbibresource{sample.bib}",
            "\\begin{document}",
            "\\makecvheader",
            "\\cvsection{Professional experience}",
            "\\cvsection{Diplomas}",
            "\\newpage",
            "\\cvsection{Side projects}",
            "\\end{document}",
        ];
        let positions: Vec<usize> = order.iter().map(|m| doc.find(m).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_header_with_contact() {
        let mut p = profile("");
        p.contact = Some(Contact {
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        });
        let resume = Resume {
            profile: Some(p),
            ..Default::default()
        };

        let doc = DocumentAssembler::assemble(&resume);
        assert!(doc.contains(
            "\\begin{document}\n\
             \\name{Ada Lovelace}\n\
             \\tagline{Analyst \\& Writer}\n\
             \n\
             \\personalinfo{\n\
             \\email{ada@example.com}\n\
             }\n\
             \n\
             \\begin{fullwidth}"
        ));
    }

    #[test]
    fn test_header_without_contact() {
        let resume = Resume {
            profile: Some(profile("")),
            ..Default::default()
        };
        let doc = DocumentAssembler::assemble(&resume);
        assert!(doc.contains("\\personalinfo{\n}\n"));
    }

    #[test]
    fn test_profile_section_needs_summary() {
        let resume = Resume {
            profile: Some(profile("Ten years of 100% uptime")),
            ..Default::default()
        };
        let doc = DocumentAssembler::assemble(&resume);
        assert!(doc.contains("%                               PROFILE\n"));
        assert!(doc.contains(
            "\\cvsection[]{Profil}\nTen years of 100\\% uptime\n\n\\vspace{4pt}\n\n"
        ));
    }

    #[test]
    fn test_languages_wrapped_in_itemize() {
        let resume = Resume {
            languages: vec![Language {
                name: "French".to_string(),
                level: "Native".to_string(),
                descriptor: String::new(),
            }],
            ..Default::default()
        };
        let doc = DocumentAssembler::assemble(&resume);
        assert!(doc.contains(
            "\\switchcolumn\n\n\\vspace{2pt}\n"
        ));
        assert!(doc.contains(
            "\\cvsection{Languages}\n\\begin{itemize}\n  \\item \\textbf{French} \\hfill Native \n\\end{itemize}\n\\end{paracol}"
        ));
    }

    #[test]
    fn test_hard_skills_and_interests_placement() {
        let cat = Category {
            name: "Tools".to_string(),
            items: Some(vec!["Git".to_string()]),
        };
        let resume = Resume {
            hard_skills: vec![cat.clone()],
            interests: vec![cat],
            ..Default::default()
        };
        let doc = DocumentAssembler::assemble(&resume);

        let interests = doc.find("\\cvsection{Interests}").unwrap();
        let column2 = doc.find("\\switchcolumn").unwrap();
        let hard = doc.find("\\cvsection{Hard Skills}").unwrap();
        let newpage = doc.find("\\newpage").unwrap();
        assert!(interests < column2 && column2 < hard && hard < newpage);
        assert!(doc.contains("\\vspace{4pt}\n\\cvsection{Interests}"));
        assert!(doc.contains("\\vspace{2pt}\n\\cvsection{Hard Skills}"));
    }

    #[test]
    fn test_deterministic() {
        let resume = Resume {
            profile: Some(profile("Summary")),
            ..Default::default()
        };
        assert_eq!(
            DocumentAssembler::assemble(&resume),
            DocumentAssembler::assemble(&resume)
        );
    }
}
