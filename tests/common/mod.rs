#![allow(dead_code)]

pub mod fixtures {
    use skeleton_java::problem::{parse_problems, Problem};
    use std::path::PathBuf;

    pub const PROBLEMS_JSON: &str = include_str!("../fixtures/problems.json");

    pub fn problems() -> Vec<Problem> {
        parse_problems(PROBLEMS_JSON).unwrap()
    }

    pub fn problems_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/problems.json")
    }
}

pub mod sources {
    use skeleton_java::problem::Problem;
    use skeleton_java::{FetchError, ProblemSource};

    /// In-memory problem source with a fixed answer
    pub struct StaticSource {
        pub problems: Option<Vec<Problem>>,
        pub healthy: bool,
    }

    impl StaticSource {
        pub fn serving(problems: Vec<Problem>) -> Self {
            Self {
                problems: Some(problems),
                healthy: true,
            }
        }

        pub fn unavailable() -> Self {
            Self {
                problems: None,
                healthy: false,
            }
        }
    }

    impl ProblemSource for StaticSource {
        fn fetch_all(&self) -> Result<Vec<Problem>, FetchError> {
            self.problems.clone().ok_or_else(|| FetchError::Status {
                url: "http://problems.test/api/v1/problems".into(),
                status: 503,
            })
        }

        fn check_health(&self) -> Result<(), FetchError> {
            if self.healthy {
                Ok(())
            } else {
                Err(FetchError::Status {
                    url: "http://problems.test/health".into(),
                    status: 503,
                })
            }
        }

        fn describe(&self) -> &str {
            "problems.test"
        }
    }
}

pub mod test_server {
    use skeleton_java::server::{HttpServer, ServerHandle, SkeletonService};
    use skeleton_java::{AppContext, ProblemSource};
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpListener, TcpStream};
    use std::sync::{Arc, Once};
    use std::time::Duration;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Running service bound to a random local port; stops on drop.
    pub struct TestServer {
        pub ctx: Arc<AppContext>,
        pub addr: SocketAddr,
        handle: Option<ServerHandle>,
    }

    impl TestServer {
        /// Build a context over `source`, load it once and start serving.
        pub fn start<S: ProblemSource + 'static>(source: S) -> Self {
            setup_may_runtime();
            let ctx = Arc::new(AppContext::new(Arc::new(source)));
            ctx.refresh_or_log();

            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);
            let handle = HttpServer(SkeletonService::new(Arc::clone(&ctx)))
                .start(addr)
                .unwrap();
            handle.wait_ready().unwrap();
            Self {
                ctx,
                addr,
                handle: Some(handle),
            }
        }

        pub fn get(&self, path: &str) -> (u16, String, String) {
            let req = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n");
            parse_response(&send_request(&self.addr, &req))
        }
    }

    impl Drop for TestServer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
        }
    }

    pub fn send_request(addr: &SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(100)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 1024];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {e:?}"),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Split a raw response into status, `Content-Type` and body.
    pub fn parse_response(resp: &str) -> (u16, String, String) {
        let (head, body) = resp.split_once("\r\n\r\n").unwrap_or((resp, ""));
        let mut status = 0;
        let mut content_type = String::new();
        for line in head.lines() {
            if line.starts_with("HTTP/1.1") {
                status = line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("0")
                    .parse()
                    .unwrap();
            } else if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-type") {
                    content_type = value.trim().to_string();
                }
            }
        }
        (status, content_type, body.to_string())
    }
}
