use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::client::conn::http1::{self, SendRequest};
use hyper::header::HOST;
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use wasm_devserver::{Config, DevServer};

struct RunningServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    async fn stop(self) {
        let _ = self.stop.send(());
        self.task.await.unwrap().unwrap();
    }
}

fn start(config: Config) -> RunningServer {
    let server = DevServer::bind(config).unwrap();
    let addr = server.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let task = tokio::spawn(server.run_until(async move {
        let _ = stopped.await;
    }));
    RunningServer { addr, stop, task }
}

fn loopback_config(root: &Path) -> Config {
    let mut config = Config::for_root(root);
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config
}

async fn connect(addr: SocketAddr) -> SendRequest<Empty<Bytes>> {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (sender, conn) = http1::handshake(TokioIo::new(stream)).await.unwrap();
    tokio::spawn(conn);
    sender
}

async fn send(
    sender: &mut SendRequest<Empty<Bytes>>,
    method: Method,
    path: &str,
) -> (StatusCode, Bytes) {
    sender.ready().await.unwrap();
    let req = Request::builder()
        .method(method)
        .uri(path)
        .header(HOST, "localhost")
        .body(Empty::new())
        .unwrap();
    let resp = sender.send_request(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

async fn get(addr: SocketAddr, path: &str) -> (StatusCode, Bytes) {
    let mut sender = connect(addr).await;
    send(&mut sender, Method::GET, path).await
}

#[tokio::test]
async fn test_root_serves_index_document() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();
    let server = start(loopback_config(dir.path()));

    let (status, body) = get(server.addr, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>hi</h1>");

    server.stop().await;
}

#[tokio::test]
async fn test_wasm_module_served_from_dist() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("dist")).unwrap();
    let mut module = b"\0asm\x01\0\0\0".to_vec();
    module.extend((0..=255u8).cycle().take(64 * 1024));
    std::fs::write(dir.path().join("dist/appWASM.wasm"), &module).unwrap();
    let server = start(loopback_config(dir.path()));

    let (status, body) = get(server.addr, "/appWASM.wasm").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.len(), module.len());
    assert_eq!(body.as_ref(), module.as_slice());

    server.stop().await;
}

#[tokio::test]
async fn test_missing_file_keeps_connection_usable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();
    let server = start(loopback_config(dir.path()));

    let mut sender = connect(server.addr).await;
    let (status, body) = send(&mut sender, Method::GET, "/does-not-exist.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (status, body) = send(&mut sender, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>hi</h1>");

    // A fresh connection is served too
    let (status, body) = get(server.addr, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>hi</h1>");

    server.stop().await;
}

#[tokio::test]
async fn test_sequential_requests_do_not_mix() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("dist")).unwrap();
    std::fs::write(dir.path().join("dist/appWASM.js"), "var Module = {};").unwrap();
    std::fs::write(dir.path().join("style.css"), "body { margin: 0 }").unwrap();
    let server = start(loopback_config(dir.path()));

    let mut sender = connect(server.addr).await;
    let (_, js) = send(&mut sender, Method::GET, "/dist/appWASM.js").await;
    let (_, css) = send(&mut sender, Method::GET, "/style.css").await;
    assert_eq!(js, "var Module = {};");
    assert_eq!(css, "body { margin: 0 }");

    server.stop().await;
}

#[tokio::test]
async fn test_any_method_reads_the_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();
    let server = start(loopback_config(dir.path()));

    let mut sender = connect(server.addr).await;
    let (status, body) = send(&mut sender, Method::POST, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<h1>hi</h1>");

    server.stop().await;
}

#[tokio::test]
async fn test_escape_from_root_is_refused() {
    let outer = tempfile::tempdir().unwrap();
    let root = outer.path().join("public");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(outer.path().join("secret.txt"), "secret").unwrap();
    let server = start(loopback_config(&root));

    let (status, body) = get(server.addr, "/../secret.txt").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body.is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_custom_rewrite_rules() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("build")).unwrap();
    std::fs::write(dir.path().join("build/game.wasm"), b"\0asm").unwrap();
    std::fs::write(dir.path().join("main.html"), "main").unwrap();

    let mut config = loopback_config(dir.path());
    config.routes.index_document = "/main.html".to_string();
    config.routes.dist_prefix = "/build".to_string();
    config.routes.dist_assets = vec!["/game.wasm".to_string()];
    let server = start(config);

    let (_, index) = get(server.addr, "/").await;
    assert_eq!(index, "main");
    let (status, module) = get(server.addr, "/game.wasm").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(module.as_ref(), b"\0asm");

    server.stop().await;
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinked_build_dir_is_served() {
    let outer = tempfile::tempdir().unwrap();
    let root = outer.path().join("site");
    let build = outer.path().join("build");
    std::fs::create_dir(&root).unwrap();
    std::fs::create_dir(&build).unwrap();
    std::fs::write(build.join("appWASM.wasm"), b"\0asm\x01\0\0\0").unwrap();
    std::os::unix::fs::symlink(&build, root.join("dist")).unwrap();
    let server = start(loopback_config(&root));

    let (status, body) = get(server.addr, "/appWASM.wasm").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_ref(), b"\0asm\x01\0\0\0");

    server.stop().await;
}
