//! One-shot HTTP responder for exercising the compiler client without the network.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

pub struct MockServer {
	addr: SocketAddr,
	request: oneshot::Receiver<Request>,
}

#[derive(Debug)]
pub struct Request {
	pub head: String,
	pub headers: Vec<(String, String)>,
	pub body: String,
}

impl Request {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}
}

impl MockServer {
	/// Accepts a single connection and answers it with `status` and `body`.
	pub async fn start(status: u16, body: &str) -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let addr = listener.local_addr().unwrap();
		let (tx, rx) = oneshot::channel();
		let body = body.to_string();

		tokio::spawn(async move {
			let (mut stream, _) = listener.accept().await.unwrap();
			let request = read_request(&mut stream).await;
			let _ = tx.send(request);

			let response = format!(
				"HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
				status,
				reason(status),
				body.len(),
				body,
			);

			stream.write_all(response.as_bytes()).await.unwrap();
			let _ = stream.shutdown().await;
		});

		Self { addr, request: rx }
	}

	pub fn url(&self) -> String {
		format!("http://{}/compile", self.addr)
	}

	/// The request the server received.
	pub async fn request(self) -> Request {
		self.request.await.unwrap()
	}
}

async fn read_request(stream: &mut TcpStream) -> Request {
	let mut buf = Vec::new();
	let mut chunk = [0u8; 4096];

	let header_end = loop {
		let n = stream.read(&mut chunk).await.unwrap();
		assert!(n > 0, "connection closed before headers were complete");
		buf.extend_from_slice(&chunk[..n]);

		if let Some(i) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
			break i;
		}
	};

	let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
	let mut lines = head.split("\r\n");
	let request_line = lines.next().unwrap_or_default().to_string();
	let headers: Vec<(String, String)> = lines
		.filter_map(|line| line.split_once(':'))
		.map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
		.collect();

	let length = headers
		.iter()
		.find(|(k, _)| k == "content-length")
		.and_then(|(_, v)| v.parse::<usize>().ok())
		.unwrap_or(0);

	let mut body = buf[header_end + 4..].to_vec();

	while body.len() < length {
		let n = stream.read(&mut chunk).await.unwrap();
		assert!(n > 0, "connection closed before body was complete");
		body.extend_from_slice(&chunk[..n]);
	}

	Request {
		head: request_line,
		headers,
		body: String::from_utf8_lossy(&body).to_string(),
	}
}

fn reason(status: u16) -> &'static str {
	match status {
		200 => "OK",
		400 => "Bad Request",
		500 => "Internal Server Error",
		_ => "Unknown",
	}
}
