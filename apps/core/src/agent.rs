//! The community assistant.
//!
//! `CommunityAgent` owns the snapshot store and the scraped community info,
//! routes each message by intent and answers it either from the store or by
//! delegating to the LLM. It never returns an error to its caller: every
//! collaborator failure becomes a user-visible reply.

use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::actors::traits::LlmActor;
use crate::brain::prompt::{fallback_prompt, system_prompt};
use crate::brain::{Intent, IntentClassifier};
use crate::config::AgentConfig;
use crate::formatter;
use crate::models::{ChatContext, CommunityInfo, CommunityStats};
use crate::store::{DataStore, DEFAULT_SEARCH_LIMIT};
use crate::website::WebsiteScraper;

pub const MEMBER_QUERY_PROMPT: &str =
    "Please provide a name, email, or role to search for members.";
pub const LLM_UNAVAILABLE: &str =
    "I'm having trouble connecting to the AI service. Please try again later.";
pub const LLM_EMPTY_REPLY: &str = "I couldn't generate a response. Please try again.";

pub struct CommunityAgent<L: LlmActor> {
    store: DataStore,
    community: CommunityInfo,
    classifier: IntentClassifier,
    llm: Arc<L>,
}

impl<L: LlmActor> CommunityAgent<L> {
    pub fn new(store: DataStore, community: CommunityInfo, llm: Arc<L>) -> Self {
        let agent = Self {
            store,
            community,
            classifier: IntentClassifier::new(),
            llm,
        };
        info!("Community: {}", agent.community.name);
        info!("Stats: {:?}", agent.store.statistics());
        if agent.store.is_empty() {
            warn!("No community data loaded; searches will return nothing");
        }
        agent
    }

    /// Loads the snapshot and scrapes the community website.
    ///
    /// Both steps degrade to empty or default data, so this always succeeds.
    pub async fn bootstrap(config: &AgentConfig, llm: Arc<L>) -> Self {
        let store = DataStore::load(&config.data_file);
        let community = match WebsiteScraper::new(config.site_url.clone(), config.scrape_timeout) {
            Ok(scraper) => scraper.scrape().await,
            Err(e) => {
                error!("Failed to build website client: {}", e);
                CommunityInfo::default()
            }
        };
        Self::new(store, community, llm)
    }

    pub fn community(&self) -> &CommunityInfo {
        &self.community
    }

    pub fn statistics(&self) -> CommunityStats {
        self.store.statistics()
    }

    /// Answers one chat message.
    #[instrument(skip(self, message), fields(model = %ctx.model))]
    pub async fn handle_message(&self, message: &str, ctx: &ChatContext) -> String {
        let routed = self.classifier.classify(message);
        info!("Routing message as {}", routed.intent);

        match routed.intent {
            Intent::MemberSearch => {
                if routed.residual.is_empty() {
                    return MEMBER_QUERY_PROMPT.to_string();
                }
                let members = self
                    .store
                    .search_members(&routed.residual, DEFAULT_SEARCH_LIMIT);
                formatter::format_members(&members)
            }
            Intent::JobSearch => {
                // An empty residual lists every job.
                let jobs = self.store.search_jobs(&routed.residual, DEFAULT_SEARCH_LIMIT);
                formatter::format_jobs(&jobs)
            }
            Intent::Statistics => formatter::format_statistics(&self.store.statistics()),
            Intent::CommunityInfo => formatter::format_community_info(&self.community),
            Intent::Fallback => self.ask_llm(message, ctx).await,
        }
    }

    async fn ask_llm(&self, message: &str, ctx: &ChatContext) -> String {
        let prompt = fallback_prompt(message, &self.store.statistics());
        match self
            .llm
            .chat(ctx.model, system_prompt(&self.community), prompt)
            .await
        {
            Ok(reply) if reply.is_empty() => LLM_EMPTY_REPLY.to_string(),
            Ok(reply) => reply,
            Err(e) => {
                error!("LLM call failed: {}", e);
                LLM_UNAVAILABLE.to_string()
            }
        }
    }
}
