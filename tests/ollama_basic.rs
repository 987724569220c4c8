use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures_core::Stream;
use futures_util::StreamExt;
use serde_json::{Value, json};

use nagare_llm::config::{HandlerConfig, ProviderIdentity};
use nagare_llm::error::LLMError;
use nagare_llm::http::{
    DynHttpTransport, HttpRequest, HttpResponse, HttpStreamResponse, HttpTransport,
};
use nagare_llm::params::{Message, ParameterBag};
use nagare_llm::{ChatRequestBuilder, HandlerFactory};

/// Body stream that counts polls and drops so tests can observe cancellation.
struct TrackingBody {
    chunks: VecDeque<Vec<u8>>,
    reads: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl Stream for TrackingBody {
    type Item = Result<Vec<u8>, LLMError>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        this.reads.fetch_add(1, Ordering::SeqCst);
        Poll::Ready(this.chunks.pop_front().map(Ok))
    }
}

impl Drop for TrackingBody {
    fn drop(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Transport serving canned responses while recording the request it saw.
struct RecordingTransport {
    status: u16,
    chunks: Vec<Vec<u8>>,
    request: Mutex<Option<HttpRequest>>,
    reads: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl RecordingTransport {
    fn new(status: u16, chunks: Vec<&str>) -> Arc<Self> {
        Arc::new(Self {
            status,
            chunks: chunks.into_iter().map(|c| c.as_bytes().to_vec()).collect(),
            request: Mutex::new(None),
            reads: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn seen_request(&self) -> HttpRequest {
        self.request
            .lock()
            .unwrap()
            .clone()
            .expect("transport should have been called")
    }

    fn seen_body(&self) -> Value {
        serde_json::from_slice(&self.seen_request().body).expect("request body should be JSON")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, LLMError> {
        *self.request.lock().unwrap() = Some(request);
        Ok(HttpResponse {
            status: self.status,
            body: self.chunks.concat(),
        })
    }

    async fn send_stream(&self, request: HttpRequest) -> Result<HttpStreamResponse, LLMError> {
        *self.request.lock().unwrap() = Some(request);
        Ok(HttpStreamResponse {
            status: self.status,
            body: Box::pin(TrackingBody {
                chunks: self.chunks.iter().cloned().collect(),
                reads: self.reads.clone(),
                closes: self.closes.clone(),
            }),
        })
    }
}

fn ollama_factory(transport: &Arc<RecordingTransport>) -> HandlerFactory {
    let dyn_transport: DynHttpTransport = transport.clone();
    HandlerFactory::new(
        HandlerConfig::new(ProviderIdentity::Ollama).with_base_url("http://localhost:11434"),
        dyn_transport,
    )
}

fn chat_bag() -> ParameterBag {
    let mut bag = ParameterBag::new();
    bag.put("model", "llama3");
    bag.put("messages", vec![Message::new("user", "hi")]);
    bag
}

#[tokio::test]
async fn chat_stream_emits_every_frame_with_done_only_last() {
    let transport = RecordingTransport::new(
        200,
        vec![
            "{\"model\":\"llama3\",\"created_at\":\"t1\",\"message\":{\"role\":\"assistant\",\"content\":\"Hel\"},\"done\":false}\n",
            "{\"model\":\"llama3\",\"created_at\":\"t2\",\"message\":{\"role\":\"assistant\",\"content\":\"lo\"},\"done\":false}\n",
            "{\"model\":\"llama3\",\"created_at\":\"t3\",\"message\":{\"role\":\"assistant\",\"content\":\"\"},\"done\":true,\"eval_count\":2}\n",
        ],
    );
    let handler = ollama_factory(&transport).chat().expect("handler");

    let mut stream = handler.chat(chat_bag()).await.expect("stream");
    let mut results = Vec::new();
    while let Some(item) = stream.next().await {
        results.push(item.expect("frame"));
    }

    assert_eq!(results.len(), 3);
    assert!(results.iter().take(2).all(|r| !r.done));
    assert!(results[2].done);
    assert_eq!(results[2].eval_count, Some(2));
    assert_eq!(results[0].response, "Hel");
    assert_eq!(results[1].response, "lo");

    // 发出的请求命中 /api/chat 且 model 原样保留
    let request = transport.seen_request();
    assert_eq!(request.url, "http://localhost:11434/api/chat");
    assert_eq!(
        request.headers.get("Content-Type"),
        Some(&"application/json".to_string())
    );
    let body = transport.seen_body();
    assert_eq!(body["model"], json!("llama3"));
    assert_eq!(body["stream"], Value::Null);
    assert_eq!(body["tools"], Value::Null);
    // model 经过 翻译→回显→归一化 往返不变
    assert!(results.iter().all(|r| r.model == body["model"].as_str().unwrap()));
}

#[tokio::test]
async fn malformed_frame_emits_prior_results_then_terminal_decode_failure() {
    let transport = RecordingTransport::new(
        200,
        vec![
            "{\"model\":\"llama3\",\"created_at\":\"t1\",\"response\":\"ok\",\"done\":false}\n",
            "{not json}\n",
            "{\"model\":\"llama3\",\"created_at\":\"t3\",\"response\":\"after\",\"done\":true}\n",
        ],
    );
    let handler = ollama_factory(&transport).generation().expect("handler");

    let mut bag = ParameterBag::new();
    bag.put("model", "llama3");
    bag.put("prompt", "say hi");
    let mut stream = handler.generate(bag).await.expect("stream");

    let first = stream.next().await.expect("item").expect("ok");
    assert_eq!(first.response, "ok");

    let err = stream.next().await.expect("item").unwrap_err();
    match err {
        LLMError::Decode { provider, message } => {
            assert_eq!(provider, "ollama");
            assert!(message.contains("{not json}"), "payload kept: {message}");
        }
        other => panic!("unexpected error type: {other:?}"),
    }

    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn dropping_stream_after_first_element_closes_body_and_stops_reads() {
    let transport = RecordingTransport::new(
        200,
        vec![
            "{\"model\":\"llama3\",\"created_at\":\"t1\",\"response\":\"a\",\"done\":false}\n",
            "{\"model\":\"llama3\",\"created_at\":\"t2\",\"response\":\"b\",\"done\":false}\n",
            "{\"model\":\"llama3\",\"created_at\":\"t3\",\"response\":\"\",\"done\":true}\n",
        ],
    );
    let handler = ollama_factory(&transport).generation().expect("handler");

    let mut bag = ParameterBag::new();
    bag.put("model", "llama3");
    bag.put("prompt", "say hi");
    let mut stream = handler.generate(bag).await.expect("stream");

    let first = stream.next().await.expect("item").expect("ok");
    assert_eq!(first.response, "a");
    let reads_before_drop = transport.reads.load(Ordering::SeqCst);
    assert_eq!(transport.closes.load(Ordering::SeqCst), 0);

    drop(stream);

    assert_eq!(transport.closes.load(Ordering::SeqCst), 1);
    assert_eq!(transport.reads.load(Ordering::SeqCst), reads_before_drop);
}

#[tokio::test]
async fn embeddings_return_single_terminal_result() {
    let transport = RecordingTransport::new(
        200,
        vec!["{\"model\":\"nomic-embed-text\",\"embeddings\":[[0.1,0.2],[0.3,0.4]],\"prompt_eval_count\":5}"],
    );
    let handler = ollama_factory(&transport).embeddings().expect("handler");

    let mut bag = ParameterBag::new();
    bag.put("model", "nomic-embed-text");
    bag.put("input", vec!["a".to_string(), "b".to_string()]);
    let result = handler.embed(bag).await.expect("result");

    assert!(result.done);
    assert_eq!(result.response, "");
    assert_eq!(result.embeddings, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    assert_eq!(result.prompt_eval_count, Some(5));
    assert_eq!(result.eval_count, None);
    assert_eq!(
        transport.seen_request().url,
        "http://localhost:11434/api/embed"
    );
}

#[tokio::test]
async fn non_2xx_status_surfaces_as_transport_error() {
    let transport = RecordingTransport::new(500, vec!["model failed to load"]);
    let handler = ollama_factory(&transport).chat().expect("handler");

    let err = match handler.chat(chat_bag()).await {
        Ok(_) => panic!("expected transport error"),
        Err(err) => err,
    };
    match err {
        LLMError::Transport { message } => {
            assert!(message.contains("500"), "status kept: {message}");
            assert!(message.contains("model failed to load"), "body kept: {message}");
        }
        other => panic!("unexpected error type: {other:?}"),
    }
}

#[tokio::test]
async fn builder_bag_flows_through_translator_with_options() {
    let transport = RecordingTransport::new(
        200,
        vec!["{\"model\":\"llama3\",\"created_at\":\"t\",\"message\":{\"role\":\"assistant\",\"content\":\"hi\"},\"done\":true}\n"],
    );
    let handler = ollama_factory(&transport).chat().expect("handler");

    let bag = ChatRequestBuilder::new()
        .model("llama3")
        .user_message("hi")
        .streaming(true)
        .build()
        .expect("bag");
    let mut stream = handler.chat(bag).await.expect("stream");
    while stream.next().await.is_some() {}

    let body = transport.seen_body();
    assert_eq!(body["stream"], json!(true));
    assert_eq!(body["messages"], json!([{"role": "user", "content": "hi"}]));
}
