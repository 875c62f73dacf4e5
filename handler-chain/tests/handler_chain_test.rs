//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before/after order, a `before` returning false stopping the chain, Stop/Reply ending the
//! handle phase and being passed to `after`, and Ignore/Continue falling through to later handlers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bot_core::{
    Activity, ActivityKind, Adapter, ChannelAccount, ConversationAccount, ConversationReference,
    Handler, HandlerResponse, Result, TurnContext,
};
use chrono::Utc;
use handler_chain::HandlerChain;

struct NullAdapter;

#[async_trait]
impl Adapter for NullAdapter {
    async fn send_text(&self, _reference: &ConversationReference, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn check_reference(&self, _reference: &ConversationReference) -> Result<()> {
        Ok(())
    }
}

fn create_test_turn(text: &str) -> TurnContext {
    let activity = Activity {
        kind: ActivityKind::Message,
        id: Some("test_message_id".to_string()),
        channel_id: "test".to_string(),
        service_url: "http://localhost".to_string(),
        from: ChannelAccount::new("123", Some("test_user".to_string())),
        recipient: ChannelAccount::new("999", Some("bot".to_string())),
        conversation: ConversationAccount {
            id: "456".to_string(),
            is_group: false,
            conversation_type: Some("private".to_string()),
        },
        text: Some(text.to_string()),
        members_added: Vec::new(),
        timestamp: Utc::now(),
    };
    TurnContext::new(Arc::new(NullAdapter), activity)
}

/// **Test: Handler before and after run; handle runs once.**
///
/// **Setup:** One handler counting before/after, one handler counting handle.
/// **Action:** `chain.handle(&turn)`.
/// **Expected:** before=1, handle=1, after=1; response is Continue.
#[tokio::test]
async fn test_handler_chain_with_handler() {
    let before_count = Arc::new(AtomicUsize::new(0));
    let after_count = Arc::new(AtomicUsize::new(0));
    let handle_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(TestBeforeAfterHandler {
            before_count: before_count.clone(),
            after_count: after_count.clone(),
        }))
        .add_handler(Arc::new(TestHandler {
            handle_count: handle_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let result = chain.handle(&create_test_turn("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(before_count.load(Ordering::SeqCst), 1);
    assert_eq!(handle_count.load(Ordering::SeqCst), 1);
    assert_eq!(after_count.load(Ordering::SeqCst), 1);
}

/// **Test: A before returning false stops the chain; handle is not run.**
#[tokio::test]
async fn test_handler_stops_chain() {
    struct BlockingHandler;

    #[async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _turn: &TurnContext) -> Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(TestHandler {
            handle_count: handle_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let result = chain.handle(&create_test_turn("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: Reply ends the handle phase and is passed to after.**
///
/// **Setup:** Capture handler (asserts Reply in after), Reply handler, counting handler.
/// **Expected:** result is Reply; the counting handler after the Reply never runs.
#[tokio::test]
async fn test_handler_reply_stops_chain_and_passes_to_after() {
    struct CaptureResponseHandler {
        seen: Arc<Mutex<Option<HandlerResponse>>>,
    }

    #[async_trait]
    impl Handler for CaptureResponseHandler {
        async fn after(&self, _turn: &TurnContext, response: &HandlerResponse) -> Result<()> {
            *self.seen.lock().unwrap() = Some(response.clone());
            Ok(())
        }
    }

    let seen = Arc::new(Mutex::new(None));
    let late_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureResponseHandler { seen: seen.clone() }))
        .add_handler(Arc::new(TestHandler {
            handle_count: Arc::new(AtomicUsize::new(0)),
            response: HandlerResponse::Reply("delivered".to_string()),
        }))
        .add_handler(Arc::new(TestHandler {
            handle_count: late_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let result = chain.handle(&create_test_turn("2delivered")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("delivered".to_string()));
    assert_eq!(
        *seen.lock().unwrap(),
        Some(HandlerResponse::Reply("delivered".to_string()))
    );
    assert_eq!(late_count.load(Ordering::SeqCst), 0);
}

/// **Test: Ignore falls through to the next handler.**
#[tokio::test]
async fn test_ignore_falls_through() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(TestHandler {
            handle_count: first.clone(),
            response: HandlerResponse::Ignore,
        }))
        .add_handler(Arc::new(TestHandler {
            handle_count: second.clone(),
            response: HandlerResponse::Stop,
        }));

    let result = chain.handle(&create_test_turn("x")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

/// **Test: before runs first→last, after runs last→first.**
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    struct OrderHandler {
        name: &'static str,
        order: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Handler for OrderHandler {
        async fn before(&self, _turn: &TurnContext) -> Result<bool> {
            self.order.lock().unwrap().push(format!("before_{}", self.name));
            Ok(true)
        }

        async fn after(&self, _turn: &TurnContext, _response: &HandlerResponse) -> Result<()> {
            self.order.lock().unwrap().push(format!("after_{}", self.name));
            Ok(())
        }
    }

    let order = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            order: order.clone(),
        }));

    chain.handle(&create_test_turn("test")).await.unwrap();

    assert_eq!(
        *order.lock().unwrap(),
        vec!["before_first", "before_second", "after_second", "after_first"]
    );
}

/// **Test: An error from handle propagates and after is skipped.**
#[tokio::test]
async fn test_handle_error_propagates() {
    struct FailingHandler;

    #[async_trait]
    impl Handler for FailingHandler {
        async fn handle(&self, _turn: &TurnContext) -> Result<HandlerResponse> {
            Err(bot_core::BotError::DeliveryFailed("gone".to_string()))
        }
    }

    let before_count = Arc::new(AtomicUsize::new(0));
    let after_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(TestBeforeAfterHandler {
            before_count: before_count.clone(),
            after_count: after_count.clone(),
        }))
        .add_handler(Arc::new(FailingHandler));

    let result = chain.handle(&create_test_turn("2hello")).await;

    assert!(matches!(result, Err(bot_core::BotError::DeliveryFailed(_))));
    assert_eq!(before_count.load(Ordering::SeqCst), 1);
    assert_eq!(after_count.load(Ordering::SeqCst), 0);
}

// --- Helpers used by tests ---

struct TestBeforeAfterHandler {
    before_count: Arc<AtomicUsize>,
    after_count: Arc<AtomicUsize>,
}

#[async_trait]
impl Handler for TestBeforeAfterHandler {
    async fn before(&self, _turn: &TurnContext) -> Result<bool> {
        self.before_count.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn after(&self, _turn: &TurnContext, _response: &HandlerResponse) -> Result<()> {
        self.after_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct TestHandler {
    handle_count: Arc<AtomicUsize>,
    response: HandlerResponse,
}

#[async_trait]
impl Handler for TestHandler {
    async fn handle(&self, _turn: &TurnContext) -> Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}
