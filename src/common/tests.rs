use crate::{soap_params, Client, ClientOptions, Field, RequestError};
use http_body_util::{BodyExt, Full};
use hyper::{body::Bytes, body::Incoming, header::CONTENT_TYPE, service::service_fn, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::{future::Future, net::SocketAddr, time::Duration};
use test_log::test;
use tokio::{net::TcpListener, sync::mpsc};

#[derive(Debug)]
struct ReceivedRequest {
    method: String,
    content_type: Option<String>,
    body: String,
}

soap_params! {
    #[derive(Clone, Debug)]
    struct GetPrice {
        item: String => "Item",
        currency: String => "Currency",
        session: u64,
    }
}

const NAMESPACES: [(&str, &str); 2] = [
    ("xmlns:soap", "http://schemas.xmlsoap.org/soap/envelope/"),
    ("xmlns:ws", "http://example.com/prices"),
];

async fn start_http_server(responses: Vec<(u16, String)>) -> (u16, mpsc::UnboundedReceiver<ReceivedRequest>) {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
    let local_port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn(async move {
        for (status, resp) in responses {
            let (stream, _) = listener.accept().await.unwrap();
            let io = TokioIo::new(stream);
            let tx = tx.clone();

            let handler = move |r: Request<Incoming>| {
                let tx = tx.clone();
                let resp = resp.clone();
                async move {
                    let method = r.method().to_string();
                    let content_type = r
                        .headers()
                        .get(CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned);
                    let body = r.into_body().collect().await?.to_bytes();
                    let _ = tx.send(ReceivedRequest {
                        method,
                        content_type,
                        body: String::from_utf8_lossy(&body).into_owned(),
                    });

                    let mut response = Response::new(Full::new(Bytes::from(resp)));
                    *response.status_mut() = StatusCode::from_u16(status).unwrap();
                    Ok::<_, hyper::Error>(response)
                }
            };

            if let Err(err) = hyper::server::conn::http1::Builder::new()
                .serve_connection(io, service_fn(handler))
                .await
            {
                eprintln!("Error serving connection: {:?}", err);
            }
        }
    });

    (local_port, rx)
}

async fn start_stalled_server(delay: Duration) -> u16 {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await.unwrap();
    let local_port = listener.local_addr().unwrap().port();

    tokio::task::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let io = TokioIo::new(stream);

        let handler = move |_r: Request<Incoming>| async move {
            tokio::time::sleep(delay).await;
            Ok::<_, hyper::Error>(Response::new(Full::new(Bytes::from("late"))))
        };

        if let Err(err) = hyper::server::conn::http1::Builder::new()
            .serve_connection(io, service_fn(handler))
            .await
        {
            eprintln!("Error serving connection: {:?}", err);
        }
    });

    local_port
}

fn endpoint(port: u16) -> String {
    format!("http://127.0.0.1:{port}/prices")
}

fn get_price(item: &str) -> GetPrice {
    GetPrice {
        item: item.to_owned(),
        currency: "EUR".to_owned(),
        session: 7,
    }
}

#[test(tokio::test)]
async fn call_posts_envelope_and_returns_body() {
    async fn aux<F, Fut>(call: F)
    where
        Fut: Future<Output = Result<Vec<u8>, RequestError>>,
        F: Fn(String) -> Fut,
    {
        let (port, mut received) = start_http_server(vec![(200, "<price>1.25</price>".to_owned())]).await;

        let result = call(endpoint(port)).await;
        assert_eq!(result.unwrap(), b"<price>1.25</price>");

        let request = received.recv().await.unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.content_type.as_deref(), Some("text/xml;charset=UTF-8"));
        assert_eq!(
            request.body,
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ws="http://example.com/prices">
    <soap:Body>
        <ws:GetPrice>
            <Item>Apple</Item>
            <Currency>EUR</Currency>
        </ws:GetPrice>
    </soap:Body>
</soap:Envelope>"#
        );
        assert!(!request.body.contains('7'));
    }

    aux(|url| async move {
        tokio::task::spawn_blocking(move || {
            let client = Client::new(&url, NAMESPACES).unwrap();
            client.call("GetPrice", &get_price("Apple"))
        })
        .await
        .unwrap()
    })
    .await;
    #[cfg(feature = "aio")]
    aux(|url| async move {
        let client = crate::aio::Client::new(&url, NAMESPACES).unwrap();
        client.call("GetPrice", &get_price("Apple")).await
    })
    .await;
}

#[test(tokio::test)]
async fn consecutive_calls_send_only_their_own_tokens() {
    let (port, mut received) =
        start_http_server(vec![(200, "first".to_owned()), (200, "second".to_owned())]).await;

    let url = endpoint(port);
    let (first, second) = tokio::task::spawn_blocking(move || {
        let client = Client::new(&url, NAMESPACES).unwrap();
        let first = client.call("GetPrice", &get_price("Apple")).unwrap();
        let second = client.call("GetStock", &[Field::new("Warehouse", "North")]).unwrap();
        (first, second)
    })
    .await
    .unwrap();
    assert_eq!(first, b"first");
    assert_eq!(second, b"second");

    let first = received.recv().await.unwrap().body;
    let second = received.recv().await.unwrap().body;

    let first_root = xmltree::Element::parse(first.as_bytes()).unwrap();
    let second_root = xmltree::Element::parse(second.as_bytes()).unwrap();

    let first_body = first_root.get_child("Body").unwrap();
    assert_eq!(first_body.children.iter().filter_map(|c| c.as_element()).count(), 1);
    assert!(first_body.get_child("GetPrice").is_some());

    let second_body = second_root.get_child("Body").unwrap();
    assert_eq!(second_body.children.iter().filter_map(|c| c.as_element()).count(), 1);
    let method = second_body.get_child("GetStock").unwrap();
    let fields: Vec<_> = method.children.iter().filter_map(|c| c.as_element()).map(|e| e.name.as_str()).collect();
    assert_eq!(fields, ["Warehouse"]);
    assert!(!second.contains("Apple"));
}

#[test(tokio::test)]
async fn error_status_is_returned_as_body() {
    async fn aux<F, Fut>(call: F)
    where
        Fut: Future<Output = Result<Vec<u8>, RequestError>>,
        F: Fn(String, bool) -> Fut,
    {
        let (port, _received) = start_http_server(vec![
            (500, "<soap:Fault/>".to_owned()),
            (500, "<soap:Fault/>".to_owned()),
        ])
        .await;

        let result = call(endpoint(port), false).await;
        assert_eq!(result.unwrap(), b"<soap:Fault/>");

        let result = call(endpoint(port), true).await;
        match result {
            Err(RequestError::ErrorCode(500, body)) => assert_eq!(body, b"<soap:Fault/>"),
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    aux(|url, check_status| async move {
        tokio::task::spawn_blocking(move || {
            let options = ClientOptions {
                check_status,
                ..ClientOptions::from_namespaces(NAMESPACES)
            };
            let client = Client::with_options(&url, options).unwrap();
            client.call("GetPrice", &get_price("Pear"))
        })
        .await
        .unwrap()
    })
    .await;
    #[cfg(feature = "aio")]
    aux(|url, check_status| async move {
        let options = ClientOptions {
            check_status,
            ..ClientOptions::from_namespaces(NAMESPACES)
        };
        let client = crate::aio::Client::with_options(&url, options).unwrap();
        client.call("GetPrice", &get_price("Pear")).await
    })
    .await;
}

#[test(tokio::test)]
async fn special_characters_reach_the_server_escaped() {
    let (port, mut received) = start_http_server(vec![(200, String::new())]).await;

    let url = endpoint(port);
    tokio::task::spawn_blocking(move || {
        let client = Client::new(&url, NAMESPACES).unwrap();
        client.call("GetPrice", &get_price(r#"Fish & "Chips" <large>"#))
    })
    .await
    .unwrap()
    .unwrap();

    let body = received.recv().await.unwrap().body;
    let root = xmltree::Element::parse(body.as_bytes()).unwrap();
    let item = root
        .get_child("Body")
        .and_then(|b| b.get_child("GetPrice"))
        .and_then(|m| m.get_child("Item"))
        .unwrap();
    assert_eq!(item.get_text().unwrap(), r#"Fish & "Chips" <large>"#);
}

#[test(tokio::test)]
async fn stalled_endpoint_times_out_as_transport_error() {
    async fn aux<F, Fut>(call: F)
    where
        Fut: Future<Output = Result<Vec<u8>, RequestError>>,
        F: Fn(String, ClientOptions) -> Fut,
    {
        let port = start_stalled_server(Duration::from_secs(5)).await;
        let options = ClientOptions {
            timeout: Some(Duration::from_millis(300)),
            ..ClientOptions::from_namespaces(NAMESPACES)
        };

        let started = std::time::Instant::now();
        let result = call(endpoint(port), options).await;
        assert!(started.elapsed() < Duration::from_secs(4), "deadline was not applied");
        assert!(
            matches!(result, Err(RequestError::TransportError(_))),
            "Unexpected result: {result:?}"
        );
    }

    aux(|url, options| async move {
        tokio::task::spawn_blocking(move || {
            let client = Client::with_options(&url, options).unwrap();
            client.call("GetPrice", &get_price("Plum"))
        })
        .await
        .unwrap()
    })
    .await;
    #[cfg(feature = "aio")]
    aux(|url, options| async move {
        let client = crate::aio::Client::with_options(&url, options).unwrap();
        client.call("GetPrice", &get_price("Plum")).await
    })
    .await;
}
