//! Unit tests for reconciling tabs with frame-load reports.

use portal_browser::managers::navigation_controller::NavigationController;
use portal_browser::services::frame_host::EventFrameHost;
use portal_browser::services::frame_sync::SyncOutcome;
use portal_browser::services::proxy_codec::ProxyCodec;
use portal_browser::types::frame::{HostEvent, NavOutcome, NavTicket};
use portal_browser::types::settings::{PortalSettings, ProxyBackend};

fn settings(backend: ProxyBackend) -> PortalSettings {
    let mut settings = PortalSettings::default();
    settings.geo_shard.enabled = false;
    settings.proxy.backend = backend;
    settings
}

fn loaded(nav: &mut NavigationController<EventFrameHost>, host: &str) -> NavTicket {
    let pending = nav.prepare(host).unwrap().unwrap();
    let destination = format!("https://{}", pending.input);
    match nav.commit(pending, &destination).unwrap() {
        NavOutcome::Loaded { ticket, .. } => ticket,
        other => panic!("expected a load, got {:?}", other),
    }
}

fn report(
    nav: &mut NavigationController<EventFrameHost>,
    src: &str,
    title: Option<&str>,
    cross_origin: bool,
) {
    let frame = nav.active_tab().unwrap().frame.unwrap();
    nav.host_mut()
        .report_load(frame, src, title.map(String::from), cross_origin)
        .unwrap();
}

#[test]
fn test_title_from_document() {
    let mut nav = NavigationController::new(EventFrameHost::new(), &settings(ProxyBackend::Scramjet));
    let ticket = loaded(&mut nav, "example.com");
    let src = nav.codec().encode("https://example.com");
    report(&mut nav, &src, Some("Example Domain"), false);

    assert_eq!(
        nav.on_frame_load(ticket),
        SyncOutcome::Synced {
            title: "Example Domain".to_string(),
            redirected_to: None
        }
    );
    assert_eq!(nav.active_tab().unwrap().title, "Example Domain");
}

#[test]
fn test_cross_origin_falls_back_to_hostname() {
    let mut nav = NavigationController::new(EventFrameHost::new(), &settings(ProxyBackend::Scramjet));
    let ticket = loaded(&mut nav, "www.example.com");
    let src = nav.codec().encode("https://www.example.com");
    report(&mut nav, &src, Some("Hidden"), true);

    let outcome = nav.on_frame_load(ticket);
    assert!(matches!(outcome, SyncOutcome::Synced { ref title, .. } if title == "www.example.com"));
    assert!(nav.host().events().contains(&HostEvent::TabLabel {
        tab_id: ticket.tab_id,
        label: "www.example.com".to_string()
    }));
}

#[test]
fn test_blank_title_falls_back_to_hostname() {
    let mut nav = NavigationController::new(EventFrameHost::new(), &settings(ProxyBackend::Scramjet));
    let ticket = loaded(&mut nav, "example.org");
    let src = nav.codec().encode("https://example.org");
    report(&mut nav, &src, Some("   "), false);

    assert!(matches!(
        nav.on_frame_load(ticket),
        SyncOutcome::Synced { ref title, .. } if title == "example.org"
    ));
}

#[test]
fn test_redirect_updates_url_and_favicon() {
    let mut nav = NavigationController::new(EventFrameHost::new(), &settings(ProxyBackend::Ultraviolet));
    let ticket = loaded(&mut nav, "example.com");
    let landed = nav.codec().encode("https://www.example.com/home");
    report(&mut nav, &format!("http://localhost:8080{}", landed), None, false);
    nav.host_mut().drain_events();

    let outcome = nav.on_frame_load(ticket);
    assert_eq!(
        outcome,
        SyncOutcome::Synced {
            title: "example.com".to_string(),
            redirected_to: Some("https://www.example.com/home".to_string())
        }
    );

    let tab = nav.active_tab().unwrap();
    assert_eq!(tab.current_url, "https://www.example.com/home");
    assert_eq!(
        tab.favicon.as_deref(),
        Some("https://www.google.com/s2/favicons?domain=https://www.example.com/home&sz=256")
    );
    assert!(nav.host().events().contains(&HostEvent::AddressBar {
        value: "https://www.example.com/home".to_string()
    }));
}

#[test]
fn test_redirect_in_background_tab_keeps_address_bar() {
    let mut nav = NavigationController::new(EventFrameHost::new(), &settings(ProxyBackend::Scramjet));
    let ticket = loaded(&mut nav, "example.com");
    let landed = nav.codec().encode("https://example.com/moved");
    report(&mut nav, &landed, None, false);
    nav.new_tab();
    nav.host_mut().drain_events();

    let outcome = nav.on_frame_load(ticket);
    assert!(matches!(outcome, SyncOutcome::Synced { redirected_to: Some(_), .. }));
    assert!(!nav
        .host()
        .events()
        .iter()
        .any(|e| matches!(e, HostEvent::AddressBar { .. })));
}

#[test]
fn test_stale_ticket_is_dropped() {
    let mut nav = NavigationController::new(EventFrameHost::new(), &settings(ProxyBackend::Scramjet));
    let old = loaded(&mut nav, "old.example");
    loaded(&mut nav, "new.example");
    let src = nav.codec().encode("https://elsewhere.example");
    report(&mut nav, &src, Some("Elsewhere"), false);

    assert_eq!(nav.on_frame_load(old), SyncOutcome::Stale);
    assert_eq!(nav.active_tab().unwrap().current_url, "https://new.example");
}

#[test]
fn test_unknown_tab_is_stale() {
    let mut nav = NavigationController::new(EventFrameHost::new(), &settings(ProxyBackend::Scramjet));
    assert_eq!(
        nav.on_frame_load(NavTicket { tab_id: 77, seq: 1 }),
        SyncOutcome::Stale
    );
}

#[test]
fn test_other_backend_source_is_not_decoded() {
    let mut nav = NavigationController::new(EventFrameHost::new(), &settings(ProxyBackend::Scramjet));
    let ticket = loaded(&mut nav, "example.com");
    let uv = ProxyCodec::for_backend(ProxyBackend::Ultraviolet, &nav.config().proxy);
    report(&mut nav, &uv.encode("https://other.example"), None, false);

    nav.apply_settings(&settings(ProxyBackend::Ultraviolet));
    let outcome = nav.on_frame_load(ticket);
    assert!(matches!(outcome, SyncOutcome::Synced { redirected_to: None, .. }));
    assert_eq!(nav.active_tab().unwrap().current_url, "https://example.com");
}

#[test]
fn test_undecodable_source_keeps_url() {
    let mut nav = NavigationController::new(EventFrameHost::new(), &settings(ProxyBackend::Scramjet));
    let ticket = loaded(&mut nav, "example.com");
    report(&mut nav, "/newtab.html", Some("New Tab"), false);

    assert_eq!(
        nav.on_frame_load(ticket),
        SyncOutcome::Synced {
            title: "New Tab".to_string(),
            redirected_to: None
        }
    );
    assert_eq!(nav.active_tab().unwrap().current_url, "https://example.com");
}
