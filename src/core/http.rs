use crate::error::Result;
use std::io::Read;
use std::time::Duration;

const USER_AGENT: &str = concat!("spargat/", env!("CARGO_PKG_VERSION"));

/// Response of a GET request with the body left unread.
pub struct HttpResponse {
    pub status: u16,
    pub content_length: Option<u64>,
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn text(mut self) -> Result<String> {
        let mut text = String::new();
        self.body.read_to_string(&mut text)?;
        Ok(text)
    }
}

/// Blocking transport used for both the index request and file downloads.
pub trait HttpClient {
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Build a client; `timeout` of `None` lets a request wait indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        log::debug!("{url} -> {status}");

        Ok(HttpResponse {
            status,
            content_length: response.content_length(),
            body: Box::new(response),
        })
    }
}
