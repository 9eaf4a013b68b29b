//! Portal RPC server: JSON-RPC over stdin/stdout for the web front-end shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"nav.go", "params":{"input":"example.com"}}
//! Response: {"id":1, "result":{...}, "events":[...]} or {"id":1, "error":"...", "events":[...]}
//!
//! `events` carries the UI updates (frame loads, tab labels, notices) the call produced.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use portal_browser::app::App;
use portal_browser::platform;
use portal_browser::rpc_handler::handle_method;

use serde_json::{json, Value};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn emit(out: &mut impl Write, value: &Value) -> io::Result<()> {
    writeln!(out, "{}", value)?;
    out.flush()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // PORTAL_DATA_DIR keeps the database and settings together; otherwise use platform dirs.
    let (data_dir, settings_path) = match std::env::var("PORTAL_DATA_DIR") {
        Ok(dir) => {
            let dir = PathBuf::from(dir);
            let settings = dir.join("settings.json").to_string_lossy().to_string();
            (dir, Some(settings))
        }
        Err(_) => (platform::get_data_dir(), None),
    };
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        log::error!("cannot create data dir {}: {}", data_dir.display(), e);
        std::process::exit(1);
    }
    let db_path = data_dir.join("portal.db");

    let app = match App::new(&db_path.to_string_lossy(), settings_path) {
        Ok(app) => Mutex::new(app),
        Err(e) => {
            log::error!("failed to initialize portal: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ready = json!({
        "event": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "events": app.lock().map(|mut a| a.drain_events()).unwrap_or_default(),
    });
    if emit(&mut out, &ready).is_err() {
        return;
    }

    let mut rate_limiter = RateLimiter::new(200);

    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("unparseable request: {}", e);
                if emit(&mut out, &json!({"id": null, "error": format!("parse error: {}", e)})).is_err() {
                    break;
                }
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            if emit(&mut out, &json!({"id": id, "error": "rate limit exceeded"})).is_err() {
                break;
            }
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        log::debug!("rpc {}", method);
        let result = handle_method(&app, method, &params);
        let events = app.lock().map(|mut a| a.drain_events()).unwrap_or_default();

        let response = match result {
            Ok(val) => json!({"id": id, "result": val, "events": events}),
            Err(err) => json!({"id": id, "error": err, "events": events}),
        };
        if emit(&mut out, &response).is_err() {
            break;
        }
    }
}
