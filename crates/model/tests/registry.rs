use sqirvy_model::{Error, MAX_TOKENS_DEFAULT, Provider, models, registry, resolve_max_tokens, resolve_provider};

#[test]
fn routes_known_models() {
    assert_eq!(
        resolve_provider("claude-3-5-sonnet-latest").unwrap(),
        Provider::Anthropic
    );
    assert_eq!(resolve_provider("gpt-4-turbo").unwrap(), Provider::OpenAI);
    assert_eq!(resolve_provider("o1-mini").unwrap(), Provider::OpenAI);
    assert_eq!(resolve_provider("deepseek-reasoner").unwrap(), Provider::DeepSeek);
    assert_eq!(resolve_provider("gemini-1.5-flash").unwrap(), Provider::Gemini);
    assert_eq!(
        resolve_provider("meta-llama/Llama-3.3-70B-Instruct-Turbo").unwrap(),
        Provider::Llama
    );
}

#[test]
fn unknown_model_is_rejected() {
    let err = resolve_provider("foo-bar").unwrap_err();
    assert!(matches!(err, Error::UnrecognizedModel(ref m) if m.as_str() == "foo-bar"));
    assert!(err.to_string().contains("unrecognized model"));
    assert!(err.is_invalid_input());
}

#[test]
fn unknown_model_still_gets_a_token_ceiling() {
    assert!(resolve_provider("made-up-model-xyz").is_err());
    assert_eq!(resolve_max_tokens("made-up-model-xyz"), MAX_TOKENS_DEFAULT);
    assert_eq!(MAX_TOKENS_DEFAULT, 8192);
}

#[test]
fn per_model_token_ceilings() {
    assert_eq!(resolve_max_tokens("gpt-4o"), 16384);
    assert_eq!(resolve_max_tokens("gpt-4-turbo"), 4096);
    assert_eq!(resolve_max_tokens("o1-mini"), 65536);
    assert_eq!(resolve_max_tokens("claude-3-opus-latest"), 4096);
}

#[test]
fn listing_is_sorted_and_complete() {
    let all = models();
    assert_eq!(all.len(), 14);
    assert!(all.windows(2).all(|w| w[0].name < w[1].name));
    for entry in all {
        assert_eq!(registry::lookup(entry.name), Some(entry));
        assert_eq!(resolve_provider(entry.name).unwrap(), entry.provider);
    }
}

#[test]
fn listing_serializes_name_and_provider() {
    let entry = registry::lookup("gpt-4o").unwrap();
    let json = serde_json::to_value(entry).unwrap();
    assert_eq!(json, serde_json::json!({ "name": "gpt-4o", "provider": "openai" }));
}
