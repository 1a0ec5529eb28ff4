//! Rendering of search results and statistics as markdown text.
//!
//! Pure functions; no I/O.

use crate::models::{CommunityInfo, CommunityStats, JobPosting, Member};

pub const NO_MEMBERS_FOUND: &str = "No members found matching your search.";
pub const NO_JOBS_FOUND: &str = "No job opportunities found matching your search.";

/// Maximum number of description characters shown per job.
const DESCRIPTION_PREVIEW_CHARS: usize = 200;

const COMMUNITY_WEBSITE: &str = "https://www.garjemarathi.com";

pub fn format_members(members: &[Member]) -> String {
    if members.is_empty() {
        return NO_MEMBERS_FOUND.to_string();
    }

    let mut out = format!("Found {} member(s):\n\n", members.len());
    for member in members {
        out.push_str(&member_entry(member));
    }
    out
}

fn member_entry(member: &Member) -> String {
    let mut lines = vec![
        format!("**{}**", member.name),
        format!("- 📧 {}", member.email),
    ];
    if let Some(phone) = &member.phone {
        lines.push(format!("- 📱 {}", phone));
    }
    if let Some(linkedin) = &member.linkedin {
        lines.push(format!("- 🔗 {}", linkedin));
    }
    if let (Some(designation), Some(company)) = (&member.designation, &member.company) {
        lines.push(format!("- 💼 {} at {}", designation, company));
    }
    let location: Vec<&str> = [&member.city, &member.state, &member.country]
        .into_iter()
        .map(String::as_str)
        .filter(|part| !part.is_empty())
        .collect();
    if !location.is_empty() {
        lines.push(format!("- 📍 {}", location.join(", ")));
    }
    format!("{}\n\n", lines.join("\n"))
}

pub fn format_jobs(jobs: &[JobPosting]) -> String {
    if jobs.is_empty() {
        return NO_JOBS_FOUND.to_string();
    }

    let mut out = format!("Found {} job opportunity/ies:\n\n", jobs.len());
    for job in jobs {
        out.push_str(&format!("**{}** at {}\n", job.designation, job.company));
        out.push_str(&format!("- 📍 {}\n", job.location));
        out.push_str(&format!("- 📋 Type: {}\n", job.job_type));
        if let Some(description) = &job.description {
            // The marker is appended even when nothing was cut.
            let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            out.push_str(&format!("- 📝 {}...\n", preview));
        }
        out.push('\n');
    }
    out
}

pub fn format_statistics(stats: &CommunityStats) -> String {
    format!(
        "**Community Statistics:**\n\n\
         - 👥 Total Members: {}\n\
         - 💼 Job Opportunities: {}\n\
         - 📸 Profiles with Photos: {}\n\
         - 💼 Members with Work Experience: {}",
        stats.total_members,
        stats.total_jobs,
        stats.members_with_photo,
        stats.members_with_work_history
    )
}

pub fn format_community_info(info: &CommunityInfo) -> String {
    format!(
        "**{}**\n\n\
         {}\n\n\
         This is a global community platform for Marathi professionals and enthusiasts. \
         We connect members through networking, job opportunities, and community events.\n\n\
         For more information, visit: {}",
        info.name, info.description, COMMUNITY_WEBSITE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;

    fn member(name: &str) -> Member {
        Member {
            id: "p-1".to_string(),
            name: name.to_string(),
            email: "asha@x.com".to_string(),
            role: 2,
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            country: "India".to_string(),
            phone: None,
            linkedin: None,
            designation: None,
            company: None,
            has_photo: false,
            has_work_history: false,
        }
    }

    fn job(description: Option<&str>) -> JobPosting {
        JobPosting {
            designation: "Rust Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Pune".to_string(),
            job_type: "Full Time".to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_results_use_sentinels() {
        assert_eq!(format_members(&[]), NO_MEMBERS_FOUND);
        assert_eq!(format_jobs(&[]), NO_JOBS_FOUND);
    }

    #[test]
    fn test_format_members_minimal() {
        let text = format_members(&[member("Asha Patil")]);

        assert!(text.starts_with("Found 1 member(s):\n\n"));
        assert!(text.contains("**Asha Patil**\n- 📧 asha@x.com\n"));
        assert!(text.contains("- 📍 Pune, Maharashtra, India\n"));
        assert!(!text.contains("📱"));
        assert!(!text.contains("🔗"));
        assert!(!text.contains("💼"));
    }

    #[test]
    fn test_format_members_optional_lines() {
        let mut full = member("Asha Patil");
        full.phone = Some("+91 98765".to_string());
        full.linkedin = Some("https://linkedin.com/in/asha".to_string());
        full.designation = Some("Engineer".to_string());
        full.company = Some("Acme".to_string());
        full.state = String::new();

        let text = format_members(&[full]);
        assert!(text.contains("- 📱 +91 98765\n"));
        assert!(text.contains("- 🔗 https://linkedin.com/in/asha\n"));
        assert!(text.contains("- 💼 Engineer at Acme\n"));
        assert!(text.contains("- 📍 Pune, India\n"));
    }

    #[test]
    fn test_format_members_exact_layout() {
        let mut second = member("John Doe");
        second.phone = Some("+91 12345".to_string());

        let text = format_members(&[member("Asha Patil"), second]);
        assert_eq!(
            text,
            "Found 2 member(s):\n\n\
             **Asha Patil**\n- 📧 asha@x.com\n- 📍 Pune, Maharashtra, India\n\n\
             **John Doe**\n- 📧 asha@x.com\n- 📱 +91 12345\n- 📍 Pune, Maharashtra, India\n\n"
        );
    }

    #[test]
    fn test_format_jobs_exact_layout() {
        assert_eq!(
            format_jobs(&[job(Some("Build things"))]),
            "Found 1 job opportunity/ies:\n\n\
             **Rust Engineer** at Acme\n- 📍 Pune\n- 📋 Type: Full Time\n- 📝 Build things...\n\n"
        );
    }

    #[test]
    fn test_designation_needs_company() {
        let mut partial = member("Asha Patil");
        partial.designation = Some("Engineer".to_string());
        assert!(!format_members(&[partial]).contains("💼"));
    }

    #[test]
    fn test_format_members_defaulted_location() {
        let mut m = member("N/A");
        m.city = NOT_AVAILABLE.to_string();
        m.state = NOT_AVAILABLE.to_string();
        m.country = NOT_AVAILABLE.to_string();
        assert!(format_members(&[m]).contains("- 📍 N/A, N/A, N/A\n"));
    }

    #[test]
    fn test_format_jobs() {
        let text = format_jobs(&[job(None), job(Some("Build things"))]);

        assert!(text.starts_with("Found 2 job opportunity/ies:\n\n"));
        assert!(text.contains("**Rust Engineer** at Acme\n- 📍 Pune\n- 📋 Type: Full Time\n"));
        assert!(text.contains("- 📝 Build things...\n"));
        assert_eq!(text.matches("📝").count(), 1);
    }

    #[test]
    fn test_job_description_truncation() {
        let long = "x".repeat(250);
        let text = format_jobs(&[job(Some(&long))]);
        let expected = format!("- 📝 {}...\n", "x".repeat(200));
        assert!(text.contains(&expected));
        assert!(!text.contains(&"x".repeat(201)));
    }

    #[test]
    fn test_format_statistics() {
        let stats = CommunityStats {
            total_members: 12,
            total_jobs: 3,
            members_with_photo: 5,
            members_with_work_history: 4,
        };
        let text = format_statistics(&stats);

        assert!(text.starts_with("**Community Statistics:**"));
        assert!(text.contains("- 👥 Total Members: 12\n"));
        assert!(text.contains("- 💼 Job Opportunities: 3\n"));
        assert!(text.contains("- 📸 Profiles with Photos: 5\n"));
        assert!(text.ends_with("- 💼 Members with Work Experience: 4"));
    }

    #[test]
    fn test_format_community_info() {
        let text = format_community_info(&CommunityInfo::default());
        assert!(text.starts_with("**Garje Marathi Global**\n\n"));
        assert!(text.contains("For more information, visit: https://www.garjemarathi.com"));
    }
}
