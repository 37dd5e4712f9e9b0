// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::net::TcpListener;

use serial_test::serial;

use super::*;

#[test]
#[serial]
fn candidates_follow_search_order() {
    std::env::set_var("SIMLINK_APP_PATH", "/from/env");
    let config = LinkConfig { app_path: Some(PathBuf::from("/from/config")), ..LinkConfig::default() };

    let candidates = app_path_candidates(&config);
    std::env::remove_var("SIMLINK_APP_PATH");

    assert_eq!(
        candidates,
        vec![PathBuf::from("/from/config"), PathBuf::from("/from/env"), default_app_path()]
    );
}

#[test]
#[serial]
fn resolve_skips_missing_paths() {
    std::env::remove_var("SIMLINK_APP_PATH");
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("station");
    std::fs::write(&app, b"").unwrap();

    let config = LinkConfig { app_path: Some(app.clone()), ..LinkConfig::default() };
    assert_eq!(resolve_app_path(&config).unwrap(), app);

    let config =
        LinkConfig { app_path: Some(dir.path().join("missing")), ..LinkConfig::default() };
    if !default_app_path().is_file() {
        let err = resolve_app_path(&config).unwrap_err();
        let LaunchError::NotFound { searched } = err else { panic!("expected NotFound") };
        assert_eq!(searched.len(), 2);
    }
}

#[test]
fn remote_hosts_are_never_launched() {
    let config = LinkConfig { host: "10.1.2.3".into(), launch: true, ..LinkConfig::default() };
    assert!(matches!(launch(&config), Err(LaunchError::RemoteHost(h)) if h == "10.1.2.3"));
}

#[test]
fn wait_listening_returns_once_port_accepts() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    wait_listening("127.0.0.1", port, Duration::from_secs(2)).unwrap();
}

#[test]
fn wait_listening_times_out() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let err = wait_listening("127.0.0.1", port, Duration::from_millis(150)).unwrap_err();
    assert!(matches!(err, LaunchError::NotListening { .. }), "got {err:?}");
}
