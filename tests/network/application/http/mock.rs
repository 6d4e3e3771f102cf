use libhttp::network::application::http::{
    AuthScope, CredentialsProvider, Request, Response, Transport,
};
use libhttp::network::error::Error;
use libhttp::network::{Close, Connect, Connection, Read, Write};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// What a [`RecordingTransport`] saw for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRequest {
    pub method: &'static str,
    pub target: String,
    pub headers: Vec<(String, String)>,
    /// Entity content and content type.
    pub entity: Option<(Vec<u8>, String)>,
    /// Whether a credential store was passed at all.
    pub had_store: bool,
    /// Username/password the store yielded for `AuthScope::ANY`.
    pub any_credentials: Option<(String, String)>,
}

impl SentRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A transport that records every request and replays queued responses.
///
/// With nothing queued it answers with the default response (200 "OK").
#[derive(Debug)]
pub struct RecordingTransport {
    sent: Vec<SentRequest>,
    pending: VecDeque<(u16, Vec<u8>)>,
    default_response: (u16, Vec<u8>),
    failure: Option<Error>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            pending: VecDeque::new(),
            default_response: (200, b"OK".to_vec()),
            failure: None,
        }
    }

    pub fn add_pending_response(&mut self, status: u16, body: &str) {
        self.pending.push_back((status, body.as_bytes().to_vec()));
    }

    pub fn fail_with(&mut self, error: Error) {
        self.failure = Some(error);
    }

    pub fn sent_request(&self, index: usize) -> &SentRequest {
        &self.sent[index]
    }

    pub fn sent_count(&self) -> usize {
        self.sent.len()
    }
}

impl Transport for RecordingTransport {
    type Error = Error;

    fn execute(
        &mut self,
        request: &Request<'_>,
        credentials: Option<&dyn CredentialsProvider>,
    ) -> Result<Response, Self::Error> {
        self.sent.push(SentRequest {
            method: request.method().as_str(),
            target: request.target().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
            entity: request
                .entity()
                .map(|e| (e.content().to_vec(), e.content_type().to_string())),
            had_store: credentials.is_some(),
            any_credentials: credentials
                .and_then(|store| store.credentials(&AuthScope::ANY))
                .map(|c| (c.username().to_string(), c.password().to_string())),
        });

        if let Some(error) = self.failure {
            return Err(error);
        }
        let (status, body) = self
            .pending
            .pop_front()
            .unwrap_or_else(|| self.default_response.clone());
        Response::from_parts(status, &body)
    }
}

#[derive(Debug, Default)]
struct NetworkState {
    /// One scripted server reply per connection, in order.
    replies: VecDeque<Vec<u8>>,
    /// Addresses passed to `connect`.
    connected: Vec<String>,
    /// Bytes written on each connection.
    written: Vec<Vec<u8>>,
    closed: usize,
}

/// A connector whose connections replay scripted server bytes and record
/// everything written to them.
#[derive(Debug, Clone)]
pub struct ScriptedNetwork {
    state: Rc<RefCell<NetworkState>>,
    read_chunk: usize,
}

impl ScriptedNetwork {
    pub fn new() -> Self {
        Self {
            state: Rc::default(),
            read_chunk: 64,
        }
    }

    /// Caps each `read` at `len` bytes to exercise partial reads.
    pub fn with_read_chunk(mut self, len: usize) -> Self {
        self.read_chunk = len;
        self
    }

    pub fn push_reply(&self, reply: &str) {
        self.state
            .borrow_mut()
            .replies
            .push_back(reply.as_bytes().to_vec());
    }

    pub fn connected(&self) -> Vec<String> {
        self.state.borrow().connected.clone()
    }

    /// Everything written on connection `index`, as text.
    pub fn written(&self, index: usize) -> String {
        String::from_utf8(self.state.borrow().written[index].clone()).unwrap()
    }

    pub fn connection_count(&self) -> usize {
        self.state.borrow().written.len()
    }

    pub fn closed(&self) -> usize {
        self.state.borrow().closed
    }
}

impl Connect for ScriptedNetwork {
    type Connection = ScriptedConnection;
    type Error = Error;

    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error> {
        let mut state = self.state.borrow_mut();
        let reply = state.replies.pop_front().ok_or(Error::ConnectionRefused)?;
        state.connected.push(remote.to_string());
        state.written.push(Vec::new());
        Ok(ScriptedConnection {
            state: Rc::clone(&self.state),
            index: state.written.len() - 1,
            reply: reply.into(),
            read_chunk: self.read_chunk,
        })
    }
}

#[derive(Debug)]
pub struct ScriptedConnection {
    state: Rc<RefCell<NetworkState>>,
    index: usize,
    reply: VecDeque<u8>,
    read_chunk: usize,
}

impl Read for ScriptedConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let len = buf.len().min(self.read_chunk).min(self.reply.len());
        for (slot, byte) in buf.iter_mut().zip(self.reply.drain(..len)) {
            *slot = byte;
        }
        Ok(len)
    }
}

impl Write for ScriptedConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.state.borrow_mut().written[self.index].extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for ScriptedConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        self.state.borrow_mut().closed += 1;
        Ok(())
    }
}

impl Connection for ScriptedConnection {}
