//! Scripted in-memory transport shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use futures::channel::oneshot;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{ApiRequest, Method, RawResponse, Transport};

type Reply = Result<RawResponse, ApiError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct Script {
    replies: HashMap<(Method, String), VecDeque<Scripted>>,
    log: Vec<ApiRequest>,
}

/// Answers requests from per-endpoint reply queues and records every call.
/// Clones share the same script.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.script
            .borrow_mut()
            .replies
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(scripted);
    }

    pub(crate) fn reply(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.push(method, path, Scripted::Ready(Ok(RawResponse::new(status, body))));
        self
    }

    pub(crate) fn fail(&self, method: Method, path: &str, err: ApiError) -> &Self {
        self.push(method, path, Scripted::Ready(Err(err)));
        self
    }

    /// Queue a reply that stays pending until the returned sender fires.
    pub(crate) fn gate(&self, method: Method, path: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(method, path, Scripted::Gated(rx));
        tx
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.script.borrow().log.clone()
    }

    pub(crate) fn count(&self, method: Method, path: &str) -> usize {
        self.script
            .borrow()
            .log
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let next = {
            let mut script = self.script.borrow_mut();
            script.log.push(request.clone());
            script
                .replies
                .get_mut(&(request.method, request.path.clone()))
                .and_then(VecDeque::pop_front)
        };
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx.await.unwrap_or_else(|_| Err(ApiError::Transport("gate dropped".into()))),
            None => Err(ApiError::Transport(format!(
                "no scripted reply for {} {}",
                request.method.as_str(),
                request.path
            ))),
        }
    }
}
