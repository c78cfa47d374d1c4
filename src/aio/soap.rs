use std::future::Future;
use std::io;
use std::time::Duration;

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use tokio::time::error::Elapsed;
use tokio::time::{timeout_at, Instant};
use url::Url;

use crate::common;
use crate::errors::RequestError;

/// Posts `body` and reads the whole response, giving up once `timeout` has passed.
///
/// Running out of time before the response arrives is a transport failure, while reading
/// the body is an IO failure, the same split the blocking transport has.
pub async fn send_async(url: &Url, body: String, timeout: Option<Duration>) -> Result<(u16, Vec<u8>), RequestError> {
    let deadline = timeout.map(|t| Instant::now() + t);
    let client = reqwest::Client::new();

    debug!("sending request to: {}", url);
    let resp = run_until(
        deadline,
        client
            .post(url.clone())
            .header(CONTENT_TYPE, common::CONTENT_TYPE)
            .header(CONTENT_LENGTH, body.len() as u64)
            .body(body)
            .send(),
    )
    .await??;

    let status = resp.status().as_u16();
    debug!("handling response from: {}, status: {}", url, status);
    let body = run_until(deadline, resp.bytes())
        .await
        .map_err(|_| RequestError::IoError(io::Error::new(io::ErrorKind::TimedOut, "response body timed out")))?
        .map_err(|e| RequestError::IoError(io::Error::other(e)))?;

    Ok((status, body.to_vec()))
}

async fn run_until<F>(deadline: Option<Instant>, fut: F) -> Result<F::Output, Elapsed>
where
    F: Future,
{
    match deadline {
        Some(d) => timeout_at(d, fut).await,
        None => Ok(fut.await),
    }
}
