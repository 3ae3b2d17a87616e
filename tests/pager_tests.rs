//! End-to-end tests for page rendering and boundary discovery
//!
//! Each test feeds bytes into a session, renders, and checks the exact
//! screen bytes or the resulting page table.

use bulk::core::{DisplayOptions, Viewport};
use bulk::renderer::{CLEAR_SCREEN, CURSOR_HOME};
use bulk::Session;
use proptest::prelude::*;

fn plain() -> DisplayOptions {
    DisplayOptions {
        color: false,
        style: false,
        ..DisplayOptions::default()
    }
}

fn wrapping() -> DisplayOptions {
    DisplayOptions {
        wrap: true,
        ..plain()
    }
}

/// Strip the clear/home prefix every frame starts with
fn body(frame: &[u8]) -> String {
    let prefix = [CLEAR_SCREEN, CURSOR_HOME].concat();
    assert!(frame.starts_with(&prefix), "frame must start by clearing the screen");
    String::from_utf8_lossy(&frame[prefix.len()..]).into_owned()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_wrap_scenario() {
    let mut session = Session::new(Viewport::new(10, 3), wrapping());
    session.append(b"abcdefghijk\nX\n");

    let frame = session.render();
    assert_eq!(body(&frame), "abcdefghij\nk\nX\nPAGE 1/2\n:");
    assert_eq!(session.pages().offsets(), &[0, 14]);
}

#[test]
fn test_short_input_padded() {
    let mut session = Session::new(Viewport::new(80, 5), plain());
    session.append(b"hello");

    let frame = session.render();
    assert_eq!(body(&frame), "hello\n\n\n\n\nPAGE 1/1\n:");
    assert_eq!(session.page_count(), 1);
}

#[test]
fn test_back_on_first_page() {
    let mut session = Session::new(Viewport::new(80, 5), plain());
    session.append(b"text\n");
    session.render();

    assert!(!session.handle_key(b'b'));
    assert_eq!(session.current_page(), 0);
    assert_eq!(body(&session.render()), "text\n\n\n\n\nPAGE 1/1\nb");
}

#[test]
fn test_truncation_without_wrap() {
    let mut session = Session::new(Viewport::new(4, 3), plain());
    session.append(b"abcdefgh\nij\n");

    let text = body(&session.render());
    assert_eq!(text, "abcd\x1b[1D\x1b[1C$\nij\n\nPAGE 1/1\n:");
    assert_eq!(text.matches('$').count(), 1);
}

#[test]
fn test_colored_text_fits_width() {
    let options = DisplayOptions {
        style: false,
        ..DisplayOptions::default()
    };
    let mut session = Session::new(Viewport::new(5, 2), options);
    session.append(b"\x1b[1;31mhello\x1b[0m\n");

    let text = body(&session.render());
    assert!(text.starts_with("\x1b[1;31mhello\x1b[0m\n"));
    assert!(!text.contains('$'));
}

#[test]
fn test_minimal_interface() {
    let options = DisplayOptions {
        minimal: true,
        ..plain()
    };
    let mut session = Session::new(Viewport::new(20, 2), options);
    session.append(b"x\n");
    assert_eq!(body(&session.render()), "x\n\n:");
}

// ============================================================================
// Navigation and discovery
// ============================================================================

#[test]
fn test_next_only_reaches_discovered_pages() {
    let mut session = Session::new(Viewport::new(80, 2), plain());
    session.append(b"1\n2\n3\n4\n5\n");

    // Nothing rendered yet, so only page 1 is known
    assert!(!session.handle_key(b'n'));

    session.render();
    assert_eq!(session.page_count(), 2);
    assert!(session.handle_key(b'n'));
    assert_eq!(body(&session.render()), "3\n4\nPAGE 2/3\nn");
    assert!(session.handle_key(b'n'));
    assert_eq!(body(&session.render()), "5\n\nPAGE 3/3\nn");
    assert!(!session.handle_key(b'n'));
}

#[test]
fn test_rerender_keeps_boundaries() {
    let mut session = Session::new(Viewport::new(80, 2), plain());
    session.append(b"a\nb\nc\nd\n");
    session.render();
    session.handle_key(b'n');
    session.render();
    let before = session.pages().offsets().to_vec();

    session.handle_key(b'b');
    session.append(b"e\nf\n");
    session.render();
    session.render();
    assert_eq!(session.pages().offsets(), before.as_slice());
}

#[test]
fn test_streaming_discovery() {
    let mut session = Session::new(Viewport::new(80, 3), plain());
    session.append(b"one\ntw");
    session.render();
    assert_eq!(session.page_count(), 1);

    session.append(b"o\nthree\nfour\n");
    session.render();
    assert_eq!(session.pages().offsets(), &[0, 14]);

    session.handle_key(b'n');
    assert_eq!(body(&session.render()), "four\n\n\nPAGE 2/2\nn");
}

#[test]
fn test_discover_all_and_report() {
    let mut session = Session::new(Viewport::new(80, 1), plain());
    session.append(b"a\nb\nc");
    session.discover_all();

    let report = session.report();
    assert_eq!(report.offsets, vec![0, 2, 4]);
    assert_eq!(report.page_count, 3);
    assert_eq!(report.bytes, 5);
    assert_eq!(session.current_page(), 0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["page_count"], 3);
}

#[test]
fn test_goto_page_clamps() {
    let mut session = Session::new(Viewport::new(80, 1), plain());
    session.append(b"a\nb\n");
    session.discover_all();
    session.goto_page(10);
    assert_eq!(session.current_page(), session.page_count() - 1);
}

// ============================================================================
// Headless page selection
// ============================================================================

/// Session sized the way `bulk-headless -c 10 -r 5 -w -C -S` builds it
fn headless_session() -> Session {
    let viewport = Viewport::for_terminal(10, 5, false);
    let mut session = Session::new(viewport, wrapping());
    session.append(b"abcdefghijk\nX\nY\n");
    session
}

#[test]
fn test_seek_page_discovers_on_the_way() {
    let mut session = headless_session();
    assert_eq!(session.page_count(), 1);

    assert_eq!(session.seek_page(1), 1);
    assert_eq!(body(&session.render()), "Y\n\n\nPAGE 2/2\n:");
    assert_eq!(session.last_action(), None);
}

#[test]
fn test_seek_page_stops_at_last_page() {
    let mut session = headless_session();
    assert_eq!(session.seek_page(7), 1);
    assert_eq!(session.current_page(), 1);
    assert_eq!(session.page_count(), 2);

    assert_eq!(session.seek_page(0), 1);
}

#[test]
fn test_headless_json_report() {
    let mut session = headless_session();
    session.discover_all();

    let json = serde_json::to_value(session.report()).unwrap();
    assert_eq!(json["offsets"], serde_json::json!([0, 14]));
    assert_eq!(json["page_count"], 2);
    assert_eq!(json["bytes"], 16);
}

// ============================================================================
// Properties
// ============================================================================

fn arb_input() -> impl Strategy<Value = Vec<Vec<u8>>> {
    let byte = prop_oneof![
        4 => b'a'..=b'z',
        2 => Just(b'\n'),
        1 => Just(0x1Bu8),
        1 => Just(b'['),
        1 => b'0'..=b'9',
        1 => Just(b';'),
        1 => Just(b'm'),
    ];
    proptest::collection::vec(proptest::collection::vec(byte, 0..64), 1..16)
}

proptest! {
    #[test]
    fn prop_pages_increase_and_stay_fixed(
        chunks in arb_input(),
        keys in proptest::collection::vec(prop_oneof![Just(b'n'), Just(b'b'), Just(b'x')], 0..32),
        cols in 1usize..12,
        rows in 1usize..6,
        wrap in any::<bool>(),
    ) {
        let options = DisplayOptions { wrap, ..DisplayOptions::default() };
        let mut session = Session::new(Viewport::new(cols, rows), options);
        let mut keys = keys.into_iter();
        let mut seen: Vec<usize> = vec![0];

        for chunk in &chunks {
            session.append(chunk);
            session.render();
            if let Some(key) = keys.next() {
                session.handle_key(key);
            }
            session.render();

            let offsets = session.pages().offsets();
            prop_assert_eq!(offsets[0], 0);
            prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(offsets.starts_with(&seen));
            prop_assert!(session.current_page() < session.page_count());
            seen = offsets.to_vec();
        }
    }

    #[test]
    fn prop_render_is_idempotent(chunks in arb_input(), cols in 1usize..12, rows in 1usize..6) {
        let mut session = Session::new(Viewport::new(cols, rows), DisplayOptions::default());
        for chunk in &chunks {
            session.append(chunk);
        }
        session.render();
        let pages = session.pages().clone();
        let first = session.render();
        let second = session.render();
        prop_assert_eq!(first, second);
        prop_assert_eq!(session.pages(), &pages);
    }
}
