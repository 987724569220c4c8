use std::env;

use dotenvy::dotenv;
use futures_util::StreamExt;
use nagare_llm::config::{Credential, HandlerConfig, ProviderIdentity};
use nagare_llm::http::reqwest::default_dyn_transport;
use nagare_llm::{ChatRequestBuilder, HandlerFactory};

fn load_env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[tokio::test]
#[ignore = "requires a running Ollama instance"]
async fn ollama_chat_live_stream() {
    let _ = dotenv();

    let Some(model) = load_env_var("OLLAMA_CHAT_MODEL") else {
        eprintln!("skip live test: OLLAMA_CHAT_MODEL missing");
        return;
    };
    let mut config = HandlerConfig::new(ProviderIdentity::Ollama);
    if let Some(base_url) = load_env_var("OLLAMA_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    let factory = HandlerFactory::new(config, default_dyn_transport());
    let handler = factory.chat().expect("chat handler");

    let bag = ChatRequestBuilder::new()
        .model(model)
        .user_message("Please introduce Rust language in one sentence.")
        .build()
        .expect("bag");
    let mut stream = handler.chat(bag).await.expect("chat stream");

    let mut text = String::new();
    let mut saw_done = false;
    while let Some(item) = stream.next().await {
        let result = item.expect("stream frame should decode");
        text.push_str(&result.response);
        saw_done = result.done;
    }
    assert!(saw_done, "stream should end with a terminal frame");
    assert!(!text.is_empty(), "stream should produce some text");
}

#[tokio::test]
#[ignore = "requires a valid OpenAI-compatible endpoint"]
async fn openai_chat_live_stream() {
    let _ = dotenv();

    let Some(api_key) = load_env_var("OPENAI_API_KEY") else {
        eprintln!("skip live test: OPENAI_API_KEY missing");
        return;
    };
    let Some(model) = load_env_var("OPENAI_CHAT_MODEL") else {
        eprintln!("skip live test: OPENAI_CHAT_MODEL missing");
        return;
    };
    let mut config = HandlerConfig::new(ProviderIdentity::OpenAi)
        .with_credential(Credential::bearer(api_key));
    if let Some(base_url) = load_env_var("OPENAI_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    let factory = HandlerFactory::new(config, default_dyn_transport());
    let handler = factory.chat().expect("chat handler");

    let bag = ChatRequestBuilder::new()
        .model(model)
        .system_message("You are a helpful assistant.")
        .user_message("Please introduce Rust language in one sentence.")
        .build()
        .expect("bag");
    let mut stream = handler.chat(bag).await.expect("chat stream");

    let mut text = String::new();
    let mut saw_done = false;
    while let Some(item) = stream.next().await {
        let result = item.expect("stream frame should decode");
        text.push_str(&result.response);
        saw_done = saw_done || result.done;
    }
    assert!(saw_done, "stream should report a finish reason");
    assert!(!text.is_empty(), "stream should produce some text");
}
