use sqirvy_model::{Backend, Client, ClientConfig, Context, Error, Options, Provider, build_client};

#[test]
fn builds_matching_backend() {
    let config = ClientConfig::new("k").with_base_url("http://localhost:9");
    for provider in Provider::ALL {
        let backend = build_client(provider, &config).unwrap();
        assert_eq!(backend.provider(), provider);
        assert!(!backend.is_connected());
        match provider {
            Provider::Anthropic => assert!(matches!(backend, Backend::Anthropic(_))),
            Provider::Gemini => assert!(matches!(backend, Backend::Gemini(_))),
            _ => assert!(matches!(backend, Backend::OpenAI(_))),
        }
    }
}

#[test]
fn default_endpoints() {
    let config = ClientConfig::new("k");
    match build_client(Provider::OpenAI, &config).unwrap() {
        Backend::OpenAI(c) => assert_eq!(c.endpoint(), "https://api.openai.com/v1/chat/completions"),
        other => panic!("unexpected backend: {other:?}"),
    }
}

#[test]
fn required_base_url_is_enforced() {
    let config = ClientConfig::new("k");
    let err = build_client(Provider::DeepSeek, &config).unwrap_err();
    assert!(matches!(err, Error::MissingCredential { var: "DEEPSEEK_API_BASE" }));
    let err = build_client(Provider::Llama, &config).unwrap_err();
    assert!(matches!(err, Error::MissingCredential { var: "LLAMA_BASE_URL" }));
}

#[test]
fn unprintable_key_is_rejected() {
    let err = build_client(Provider::OpenAI, &ClientConfig::new("bad\nkey")).unwrap_err();
    assert!(matches!(err, Error::Provider(_)));
}

#[tokio::test]
async fn closed_backend() {
    let mut backend = build_client(Provider::Gemini, &ClientConfig::new("k")).unwrap();
    backend.close();
    let err = backend
        .query_text(&Context::background(), "p", "gemini-1.5-pro", Options::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Closed(Provider::Gemini)));
}
