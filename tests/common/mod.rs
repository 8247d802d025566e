//! Canned-response HTTP stub serving the two trade-data endpoints on a
//! loopback socket, so end-to-end tests can exercise URL shapes and
//! per-dataset failure isolation without the live API.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Route {
    pub fn json(body: &str) -> Route {
        Route {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Route {
        self.delay = delay;
        self
    }
}

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Start serving `routes` (path -> response) on an ephemeral loopback
    /// port. Unknown paths get a 404. The listener thread lives until the
    /// test process exits.
    pub fn start(routes: HashMap<String, Route>) -> StubServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let seen = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let routes = Arc::clone(&routes);
                let seen = Arc::clone(&seen);
                thread::spawn(move || handle(stream, &routes, &seen));
            }
        });

        StubServer {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Paths requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, seen: &Mutex<Vec<String>>) {
    let mut reader = BufReader::new(match stream.try_clone() {
        Ok(s) => s,
        Err(_) => return,
    });
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let path = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();
    // Drain headers.
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) => break,
            Ok(_) if header == "\r\n" || header == "\n" => break,
            Ok(_) => {}
            Err(_) => return,
        }
    }
    seen.lock().unwrap().push(path.clone());

    let response = match routes.get(&path) {
        Some(route) => {
            thread::sleep(route.delay);
            format!(
                "HTTP/1.1 {} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                route.status,
                route.body.len(),
                route.body
            )
        }
        None => {
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
        }
    };
    let _ = stream.write_all(response.as_bytes());
}

/// A small but realistic evolution payload: unsorted years, string-encoded
/// values, one missing imports slot.
pub const EVOLUTION_BODY: &str = r#"
{
  "records": [
    [2020, "1500000", 1200000, 300000],
    [2010, 900000, "700000.5", 199999.5],
    [2015, "1100000.25", null, 1100000.25]
  ]
}
"#;

/// A two-category goods payload with one nested subcategory level.
pub const TREEMAP_BODY: &str = r#"
{
  "treemap": {
    "name": "Trade in goods 2020",
    "children": [
      {
        "name": "Exports",
        "children": [
          { "name": "Pharmaceutical products", "titlePrefix": "30", "value": 700 },
          {
            "name": "Machinery",
            "children": [
              { "name": "Turbines", "titlePrefix": "84", "value": 200 },
              { "name": "Pumps", "titlePrefix": "84", "value": 100 }
            ]
          }
        ]
      },
      {
        "name": "Imports",
        "children": [
          { "name": "Mineral fuels", "titlePrefix": "27", "value": "400" },
          { "name": "Vehicles", "titlePrefix": "87", "value": 350 }
        ]
      }
    ]
  }
}
"#;
