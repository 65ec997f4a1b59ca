//! Cross-binding navigation scenarios: a client session driven through an
//! in-process history, and the same table read one-shot on the server.

use shopfront::router::{
    ClientRouter, MemoryHistory, Query, QueryPatch, RouteTable, RouteView, RouterError,
    ServerRouter,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn storefront_table(base: &str) -> Arc<RouteTable<&'static str>> {
    let mut t = RouteTable::new(base);
    t.add_route("/", "home");
    t.add_route("/product/:id/", "detail");
    t.add_route("*", "not_found");
    Arc::new(t)
}

#[test]
fn test_browsing_session() {
    let mut router = ClientRouter::new(
        storefront_table("/shop"),
        MemoryHistory::new("/shop/?search=socks"),
    );
    let notified = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&notified);
    router.subscribe(move || *counter.borrow_mut() += 1);

    router.start();
    assert_eq!(router.target(), Some("home"));
    assert_eq!(router.query().get("search"), Some("socks"));
    assert_eq!(*notified.borrow(), 1);

    // Open a product; the bare path is normalized under the base.
    router.push("/product/85067212996/");
    assert_eq!(router.target(), Some("detail"));
    assert_eq!(router.param("id"), Some("85067212996"));
    assert_eq!(router.env().current(), "/shop/product/85067212996/");
    assert_eq!(*notified.borrow(), 2);

    // Back to the listing; the search survives because it lives in the URL.
    router.env_mut().back();
    router.handle_pop();
    assert_eq!(router.target(), Some("home"));
    assert_eq!(router.query().get("search"), Some("socks"));
    assert_eq!(*notified.borrow(), 3);

    // Refine the listing without touching the pathname.
    router.apply_query(&QueryPatch::new().set("sort", "price_desc").delete("search"));
    assert_eq!(router.env().current(), "/shop/?sort=price_desc");
    assert_eq!(router.target(), Some("home"));
    assert_eq!(router.query().get("search"), None);
}

#[test]
fn test_duplicate_push_notifies_without_new_history_entry() {
    let mut router = ClientRouter::new(storefront_table(""), MemoryHistory::new("/"));
    let notified = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&notified);
    router.subscribe(move || *counter.borrow_mut() += 1);

    router.start();
    router.push("/product/42/");
    assert_eq!(router.env().len(), 2);
    assert_eq!(*notified.borrow(), 2);

    // Same URL again: history stays put, the subscriber still fires.
    router.push("/product/42/");
    assert_eq!(router.env().len(), 2);
    assert_eq!(*notified.borrow(), 3);
    assert_eq!(router.param("id"), Some("42"));
}

#[test]
fn test_forward_entries_dropped_on_push() {
    let mut router = ClientRouter::new(storefront_table(""), MemoryHistory::new("/"));
    router.start();
    router.push("/product/1/");
    router.push("/product/2/");

    router.env_mut().back();
    router.handle_pop();
    assert_eq!(router.param("id"), Some("1"));

    // Pushing from the middle of the stack discards the forward entry.
    router.push("/product/3/");
    assert_eq!(router.env().len(), 3);
    assert!(router.env_mut().forward().is_none());
}

#[test]
fn test_unsubscribed_listener_stops_firing() {
    let mut router = ClientRouter::new(storefront_table(""), MemoryHistory::new("/"));
    let notified = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&notified);
    let subscription = router.subscribe(move || *counter.borrow_mut() += 1);

    router.start();
    router.unsubscribe(subscription);
    router.push("/product/1/");
    assert_eq!(*notified.borrow(), 1);
}

#[test]
fn test_unknown_url_lands_on_catch_all() {
    let mut router = ClientRouter::new(
        storefront_table(""),
        MemoryHistory::new("/totally/unknown?x=1"),
    );
    router.start();
    assert_eq!(router.target(), Some("not_found"));
    assert_eq!(router.query().get("x"), Some("1"));
}

#[test]
fn test_server_router_shares_table_but_refuses_push() {
    let table = storefront_table("/shop");

    let mut server = ServerRouter::new(Arc::clone(&table));
    server.start("/shop/product/42/", Query::decode("ref=email"));
    assert_eq!(server.target(), Some("detail"));
    assert_eq!(server.param("id"), Some("42"));

    let err = server.push("/shop/").expect_err("push must fail on the server");
    assert_eq!(err, RouterError::PushUnsupported);
    assert_eq!(server.target(), Some("detail"));

    // The same table still serves the client binding untouched.
    let mut client = ClientRouter::new(table, MemoryHistory::new("/shop/"));
    client.start();
    assert_eq!(client.target(), Some("home"));
}

#[test]
fn test_server_router_isolated_per_request() {
    let table = storefront_table("");
    let mut first = ServerRouter::new(Arc::clone(&table));
    let mut second = ServerRouter::new(table);

    first.start("/product/1/", Query::decode("a=1"));
    second.start("/", Query::new());

    assert_eq!(first.param("id"), Some("1"));
    assert!(second.route().map(|m| m.params.is_empty()).unwrap_or(false));
    assert!(second.query().is_empty());
}
