//! End-to-end tests driving a real listener with an HTTP client.

use std::time::{Duration, Instant};

use cmdserve::config::{RouteConfig, ServerConfig};

mod common;

fn config_with(routes: Vec<RouteConfig>) -> ServerConfig {
    ServerConfig {
        routes,
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn test_command_stdout_is_response_body() {
    let config = config_with(vec![RouteConfig::new("/hello", "echo hello")]);
    let server = common::spawn_server(config, common::ambient_env()).await;

    let res = common::client()
        .get(server.url("/hello"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "hello\n");
}

#[tokio::test]
async fn test_shell_pipeline_runs_in_subshell() {
    let config = config_with(vec![RouteConfig::new("/two", "seq 5 | head -2")]);
    let server = common::spawn_server(config, common::ambient_env()).await;

    let body = common::client()
        .get(server.url("/two"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "1\n2\n");
}

#[tokio::test]
async fn test_unregistered_path_is_404() {
    let config = config_with(vec![RouteConfig::new("/hello", "echo hello")]);
    let server = common::spawn_server(config, common::ambient_env()).await;

    let res = common::client()
        .get(server.url("/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    // Exact matching: a trailing slash is a different path.
    let res = common::client()
        .get(server.url("/hello/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_index_page_lists_and_escapes_commands() {
    let config = config_with(vec![
        RouteConfig::new("/date", "date"),
        RouteConfig::new("/html", "echo '<b>&</b>'"),
    ]);
    let server = common::spawn_server(config, common::ambient_env()).await;

    let res = common::client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();

    assert!(body.contains(r#"<a href="/date">/date</a>"#));
    assert!(body.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
    assert!(!body.contains("<b>&</b>"));
}

#[tokio::test]
async fn test_no_index_root_is_404() {
    let mut config = config_with(vec![RouteConfig::new("/date", "date")]);
    config.no_index = true;
    let server = common::spawn_server(config, common::ambient_env()).await;

    let res = common::client().get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_form_vars_from_query() {
    let mut config = config_with(vec![RouteConfig::new("/form", "echo \"$v_a $v_b\"")]);
    config.form = true;
    let server = common::spawn_server(config, common::ambient_env()).await;

    let body = common::client()
        .get(server.url("/form?a=1&a=2&b=x"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "1,2 x\n");
}

#[tokio::test]
async fn test_form_vars_from_urlencoded_body() {
    let mut config = config_with(vec![RouteConfig::new("/form", "echo \"$v_from -> $v_to\"")]);
    config.form = true;
    let server = common::spawn_server(config, common::ambient_env()).await;

    let body = common::client()
        .post(server.url("/form"))
        .form(&[("from", "me"), ("to", "you")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "me -> you\n");
}

#[tokio::test]
async fn test_form_disabled_sets_no_vars() {
    let config = config_with(vec![RouteConfig::new("/form", "echo \"${v_a:-unset}\"")]);
    let server = common::spawn_server(config, common::ambient_env()).await;

    let body = common::client()
        .get(server.url("/form?a=1"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "unset\n");
}

#[tokio::test]
async fn test_cgi_header_exposed_to_command() {
    let mut config = config_with(vec![RouteConfig::new("/ua", "echo \"$HTTP_X_FOO\"")]);
    config.cgi = true;
    let server = common::spawn_server(config, common::ambient_env()).await;

    let body = common::client()
        .get(server.url("/ua"))
        .header("X-Foo", "bar")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "bar\n");
}

#[tokio::test]
async fn test_cgi_request_metadata_vars() {
    let mut config = config_with(vec![RouteConfig::new(
        "/meta",
        "echo \"$REQUEST_METHOD $PATH_INFO $QUERY_STRING $REMOTE_ADDR $SERVER_SOFTWARE\"",
    )]);
    config.cgi = true;
    let server = common::spawn_server(config, common::ambient_env()).await;

    let body = common::client()
        .get(server.url("/meta?q=1"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "GET /meta q=1 127.0.0.1 cmdserve\n");
}

#[tokio::test]
async fn test_passthrough_restricted_to_allow_list() {
    let mut ambient = vec![
        ("PATH".to_string(), "/usr/bin:/bin".to_string()),
        ("HOME".to_string(), "/test-home".to_string()),
        ("SUPER_SECRET".to_string(), "hunter2".to_string()),
    ];
    ambient.extend(common::ambient_env().into_iter().filter(|(k, _)| k == "LANG"));

    let config = config_with(vec![RouteConfig::new(
        "/env",
        "echo \"${SUPER_SECRET:-unset} $HOME\"",
    )]);
    let server = common::spawn_server(config, ambient).await;

    let body = common::client()
        .get(server.url("/env"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "unset /test-home\n");
}

#[tokio::test]
async fn test_command_failure_surfaced_in_body_with_200() {
    let config = config_with(vec![RouteConfig::new("/fail", "exit 3")]);
    let server = common::spawn_server(config, common::ambient_env()).await;

    let res = common::client()
        .get(server.url("/fail"))
        .send()
        .await
        .unwrap();
    // Failures report in the body, not the status (see DESIGN.md).
    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("exec error: "), "body was {body:?}");
}

#[tokio::test]
async fn test_exit_route_responds_then_terminates() {
    let mut config = config_with(vec![RouteConfig::new("/date", "date")]);
    config.add_exit = true;
    let server = common::spawn_server(config, common::ambient_env()).await;

    let res = common::client()
        .get(server.url("/exit"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Bye...");

    // The serve loop must drain and return shortly after the response.
    let run_result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop after /exit")
        .unwrap();
    assert!(run_result.is_ok());
}

#[tokio::test]
async fn test_exit_route_absent_unless_enabled() {
    let config = config_with(vec![RouteConfig::new("/date", "date")]);
    let server = common::spawn_server(config, common::ambient_env()).await;

    let res = common::client()
        .get(server.url("/exit"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_concurrent_requests_do_not_serialize() {
    let config = config_with(vec![
        RouteConfig::new("/a", "sleep 1; echo a"),
        RouteConfig::new("/b", "sleep 1; echo b"),
    ]);
    let server = common::spawn_server(config, common::ambient_env()).await;
    let client = common::client();

    let started = Instant::now();
    let (a, b) = tokio::join!(
        client.get(server.url("/a")).send(),
        client.get(server.url("/b")).send(),
    );
    let elapsed = started.elapsed();

    assert_eq!(a.unwrap().text().await.unwrap(), "a\n");
    assert_eq!(b.unwrap().text().await.unwrap(), "b\n");
    // Two one-second commands overlapping, not queuing.
    assert!(
        elapsed < Duration::from_millis(1900),
        "requests serialized: {elapsed:?}"
    );
}

#[tokio::test]
async fn test_any_method_dispatches() {
    let config = config_with(vec![RouteConfig::new("/hello", "echo hello")]);
    let server = common::spawn_server(config, common::ambient_env()).await;

    let res = common::client()
        .delete(server.url("/hello"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "hello\n");
}
