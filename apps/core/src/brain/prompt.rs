//! Prompt construction for messages answered by the LLM.

use crate::models::{CommunityInfo, CommunityStats};

/// Builds the system prompt describing the community and the assistant's behaviour.
pub fn system_prompt(community: &CommunityInfo) -> String {
    format!(
        r#"You are a helpful AI assistant for the {name} community.

Community Information:
- Name: {name}
- Description: {description}
- Contact Email: {email}

Your Role:
1. Answer questions about the community based on the data
2. Help users find other members
3. Help users find job opportunities
4. Provide community statistics
5. Be friendly, professional, and helpful

Data Sources:
- Member information from the community snapshot
- Job postings from the community snapshot
- Community info from the community website

When responding:
- Be concise and to the point
- Use bullet points for lists
- Include relevant details like names, locations, and roles
- If you don't know something, say so honestly
- Don't make up information

Format your responses in markdown for better readability."#,
        name = community.name,
        description = community.description,
        email = community.contact_email.as_deref().unwrap_or("Not available"),
    )
}

/// Builds the user prompt: the raw message plus the current totals as context.
pub fn fallback_prompt(message: &str, stats: &CommunityStats) -> String {
    format!(
        r#"User asked: "{message}"

Available data:
- {members} community members
- {jobs} job opportunities

Please provide a helpful response based on this context."#,
        members = stats.total_members,
        jobs = stats.total_jobs,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_contains_community() {
        let community = CommunityInfo {
            contact_email: Some("hello@garje.org".to_string()),
            ..CommunityInfo::default()
        };
        let prompt = system_prompt(&community);

        assert!(prompt.contains("Garje Marathi Global community"));
        assert!(prompt.contains("Contact Email: hello@garje.org"));
        assert!(prompt.contains("say so honestly"));
        assert!(prompt.contains("markdown"));
    }

    #[test]
    fn test_system_prompt_without_email() {
        let prompt = system_prompt(&CommunityInfo::default());
        assert!(prompt.contains("Contact Email: Not available"));
    }

    #[test]
    fn test_fallback_prompt_keeps_raw_message() {
        let stats = CommunityStats {
            total_members: 42,
            total_jobs: 7,
            ..CommunityStats::default()
        };
        let prompt = fallback_prompt("Tell me a JOKE", &stats);

        assert!(prompt.starts_with("User asked: \"Tell me a JOKE\""));
        assert!(prompt.contains("- 42 community members"));
        assert!(prompt.contains("- 7 job opportunities"));
    }
}
