#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
    assert_eq!(format_amount(dec!(5)), "$5.00");
    assert_eq!(format_amount(dec!(1234.5)), "$1,234.50");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-5)), "-$5.00");
    assert_eq!(format_amount(dec!(-1234567.89)), "-$1,234,567.89");
}

#[test]
fn test_format_amount_thousands() {
    assert_eq!(format_amount(dec!(1000)), "$1,000.00");
    assert_eq!(format_amount(dec!(100000)), "$100,000.00");
    assert_eq!(format_amount(dec!(999)), "$999.00");
}

#[test]
fn test_format_amount_rounds_to_cents() {
    assert_eq!(format_amount(dec!(10.004)), "$10.00");
    assert_eq!(format_amount(dec!(10.006)), "$10.01");
    assert_eq!(format_amount(Decimal::new(1, 3)), "$0.00"); // 0.001
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string_unchanged() {
    assert_eq!(truncate("Rent", 10), "Rent");
    assert_eq!(truncate("Rent", 4), "Rent");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Groceries & Food", 10), "Groceries…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("anything", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("ééééé", 3), "éé…");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_and_scrolls() {
    let (mut index, mut scroll) = (0, 0);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (1, 0));
    scroll_down(&mut index, &mut scroll, 10, 3);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!((index, scroll), (3, 1));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (9, 7);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!(index, 9);
}

#[test]
fn test_scroll_up() {
    let (mut index, mut scroll) = (5, 5);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (4, 4));

    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_top_and_bottom() {
    let (mut index, mut scroll) = (5, 3);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
}

#[test]
fn test_scroll_to_bottom_empty_list() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 0, 4);
    assert_eq!((index, scroll), (0, 0));
}
