use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub location: String,
    pub graduation_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub authority: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Award {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolunteerExperience {
    pub id: String,
    pub role: String,
    pub organization: String,
    pub dates: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub proficiency: String,
}

/// The structured resume document as edited in the builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
    pub awards: Vec<Award>,
    pub volunteer_experience: Vec<VolunteerExperience>,
    pub languages: Vec<Language>,
}

/// Resume text split into the three scoring tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeTextSections {
    pub skills: String,
    pub experience: String,
    pub other: String,
}

impl ResumeTextSections {
    pub fn new(
        skills: impl Into<String>,
        experience: impl Into<String>,
        other: impl Into<String>,
    ) -> Self {
        Self {
            skills: skills.into(),
            experience: experience.into(),
            other: other.into(),
        }
    }

    /// Flattens a structured resume into tier text. Contact details are left
    /// out of every tier.
    pub fn from_resume(resume: &Resume) -> Self {
        let skills = resume.skills.join(", ");

        let experience = join_nonempty(resume.experience.iter().flat_map(|exp| {
            [
                exp.job_title.as_str(),
                exp.company.as_str(),
                exp.description.as_str(),
            ]
        }));

        let mut other_parts: Vec<&str> = vec![resume.summary.as_str()];
        for edu in &resume.education {
            other_parts.extend([edu.degree.as_str(), edu.school.as_str()]);
        }
        for proj in &resume.projects {
            other_parts.extend([proj.name.as_str(), proj.description.as_str()]);
        }
        for cert in &resume.certifications {
            other_parts.extend([cert.name.as_str(), cert.authority.as_str()]);
        }
        other_parts.extend(resume.awards.iter().map(|a| a.name.as_str()));
        for vol in &resume.volunteer_experience {
            other_parts.extend([
                vol.role.as_str(),
                vol.organization.as_str(),
                vol.description.as_str(),
            ]);
        }
        other_parts.extend(resume.languages.iter().map(|l| l.name.as_str()));

        Self {
            skills,
            experience,
            other: join_nonempty(other_parts),
        }
    }
}

fn join_nonempty<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the whole resume as plain text, in builder section order.
pub fn render_resume_text(resume: &Resume) -> String {
    let mut out = String::new();
    let info = &resume.personal_info;

    out.push_str(&format!("Name: {}\n", info.name));
    out.push_str(&format!("Email: {}\n", info.email));
    out.push_str(&format!("Phone: {}\n", info.phone));
    out.push_str(&format!("Address: {}\n", info.address));
    out.push_str(&format!("LinkedIn: {}\n", info.linkedin));
    out.push_str(&format!("Portfolio: {}\n\n", info.portfolio));

    if !resume.summary.is_empty() {
        out.push_str(&format!("Summary:\n{}\n\n", resume.summary));
    }

    if !resume.experience.is_empty() {
        out.push_str("Experience:\n");
        for exp in &resume.experience {
            out.push_str(&format!(
                "- {} at {}, {} ({} - {})\n",
                exp.job_title, exp.company, exp.location, exp.start_date, exp.end_date
            ));
            out.push_str(&format!("  Description: {}\n", exp.description));
        }
        out.push('\n');
    }

    if !resume.education.is_empty() {
        out.push_str("Education:\n");
        for edu in &resume.education {
            out.push_str(&format!(
                "- {} from {}, {} (Graduated: {})\n",
                edu.degree, edu.school, edu.location, edu.graduation_date
            ));
        }
        out.push('\n');
    }

    if !resume.projects.is_empty() {
        out.push_str("Projects:\n");
        for proj in &resume.projects {
            out.push_str(&format!("- Project: {}\n", proj.name));
            out.push_str(&format!("  Description: {}\n", proj.description));
            if let Some(link) = proj.link.as_deref().filter(|l| !l.is_empty()) {
                out.push_str(&format!("  Link: {link}\n"));
            }
        }
        out.push('\n');
    }

    if !resume.skills.is_empty() {
        out.push_str(&format!("Skills: {}\n\n", resume.skills.join(", ")));
    }

    if !resume.certifications.is_empty() {
        out.push_str("Certifications:\n");
        for cert in &resume.certifications {
            out.push_str(&format!(
                "- {} - {} ({})\n",
                cert.name, cert.authority, cert.date
            ));
        }
        out.push('\n');
    }

    if !resume.awards.is_empty() {
        out.push_str("Awards:\n");
        for award in &resume.awards {
            out.push_str(&format!("- {}\n", award.name));
        }
        out.push('\n');
    }

    if !resume.volunteer_experience.is_empty() {
        out.push_str("Volunteer Experience:\n");
        for vol in &resume.volunteer_experience {
            out.push_str(&format!(
                "- {} at {} ({})\n",
                vol.role, vol.organization, vol.dates
            ));
            out.push_str(&format!("  Description: {}\n", vol.description));
        }
        out.push('\n');
    }

    if !resume.languages.is_empty() {
        out.push_str("Languages:\n");
        for lang in &resume.languages {
            out.push_str(&format!("- {} ({})\n", lang.name, lang.proficiency));
        }
        out.push('\n');
    }

    out.trim().to_string()
}
