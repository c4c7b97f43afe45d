//! Twinlink CLI - interactive chat with a digital twin over stdin.

use std::io::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use twinlink::adapters::ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
use twinlink::adapters::profile::JsonFileProfileStore;
use twinlink::config::{AiProviderKind, AppConfig};
use twinlink::domain::conversation::{ConversationDriver, ConversationState};
use twinlink::domain::foundation::UserId;
use twinlink::domain::profile::Profile;
use twinlink::ports::{AIProvider, ProfileStore};

/// Inputs that end the session.
const QUIT_COMMANDS: &[&str] = &["quit", "exit", "bye"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("twinlink=info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let provider: Arc<dyn AIProvider> = match config.ai.provider {
        AiProviderKind::OpenAI => {
            let api_key = config.ai.openai_api_key.clone().unwrap_or_default();
            Arc::new(OpenAIProvider::new(
                OpenAIConfig::new(api_key)
                    .with_model(config.ai.model.clone())
                    .with_base_url(config.ai.base_url.clone())
                    .with_timeout(config.ai.timeout()),
            ))
        }
        AiProviderKind::Mock => Arc::new(MockAIProvider::new()),
    };
    tracing::info!(provider = %provider.provider_info().name, "AI provider ready");

    let user_id = UserId::new(config.agent.user_id.clone())?;
    let store = JsonFileProfileStore::new(&config.agent.profile_dir);
    let profile = match store.get_profile(&user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            tracing::warn!(%user_id, "no stored profile, using generic persona");
            Profile::default()
        }
        Err(err) => {
            tracing::warn!(%user_id, error = %err, "profile store failed, using generic persona");
            Profile::default()
        }
    };

    let summary = profile.summary();
    let mut state = ConversationState::new(user_id, profile);
    let mut driver = ConversationDriver::new(provider);

    println!("Digital twin ready: {}", summary);
    println!("Type 'quit' to end the conversation.\n");
    println!("Hi there! Nice to meet you.");
    println!("What brings you here today? I'd love to learn more about you!\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&input.to_lowercase().as_str()) {
            println!("\nGreat talking with you! Take care.");
            break;
        }

        let outcome = driver.chat(&mut state, input).await?;
        println!("\n{}", outcome.response);
        println!("{}\n", outcome.question);
    }

    Ok(())
}
