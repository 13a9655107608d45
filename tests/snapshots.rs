//! Snapshot tests — view-model and markup output regression detection.

mod common;

use common::sample_books;
use insta::{assert_json_snapshot, assert_snapshot};

use booka::application::storefront::Frame;
use booka::domain::model::locale::{Language, Theme};
use booka::domain::search::filter;
use booka::domain::view::{chrome, project};
use booka::interface::markup::{render_catalog, render_page, PageLinks};

// =============================================================================
// View-model snapshots
// =============================================================================

#[test]
fn snapshot_arabic_cards() {
    let books = sample_books();
    let view = project(filter(&books, "dune"), Language::Ar);
    assert_json_snapshot!(view, @r###"
    {
      "kind": "cards",
      "cards": [
        {
          "id": 1,
          "title": "كثبان",
          "author": "هربرت",
          "description": "عن كثبان.",
          "image": "images/1.jpg",
          "image_alt": "كثبان",
          "price": "السعر: 45 ر.س",
          "buy_label": "اشتري الآن"
        }
      ]
    }
    "###);
}

#[test]
fn snapshot_empty_english() {
    let books = sample_books();
    let view = project(filter(&books, "xyz"), Language::En);
    assert_json_snapshot!(view, @r###"
    {
      "kind": "empty",
      "message": "No books found."
    }
    "###);
}

#[test]
fn snapshot_fractional_price() {
    let books = sample_books();
    let view = project(filter(&books, "salih"), Language::En);
    assert_json_snapshot!(view.cards()[0].price, @r###""Price: 52.5 SAR""###);
}

// =============================================================================
// Markup snapshots
// =============================================================================

#[test]
fn snapshot_arabic_empty_markup() {
    let books = sample_books();
    let links = PageLinks::new(Language::Ar, Theme::Light, "zzz");
    let html = render_catalog(&project(filter(&books, "zzz"), Language::Ar), &links);
    assert_snapshot!(html.trim_end(), @r###"
    <p class="no-results" style="grid-column: 1/-1; text-align: center; padding: 2rem;">لم يتم العثور على كتب.</p>
    "###);
}

#[test]
fn page_head_for_dark_arabic() {
    let books = sample_books();
    let frame = Frame {
        chrome: chrome(Language::Ar, Theme::Dark),
        catalog: project(filter(&books, ""), Language::Ar),
    };
    let page = render_page(&frame, None, &PageLinks::new(Language::Ar, Theme::Dark, ""));
    let top: Vec<&str> = page
        .lines()
        .skip_while(|line| !line.starts_with("<body"))
        .take(5)
        .collect();
    assert_snapshot!(top.join("\n"), @r###"
    <body class="dark-mode">
    <header>
    <a id="theme-toggle" href="/?lang=ar&amp;theme=light"><i class="fas fa-sun"></i></a>
    <a id="lang-toggle" href="/?lang=en&amp;theme=dark">English</a>
    </header>
    "###);
    assert!(page.starts_with("<!DOCTYPE html>\n<html lang=\"ar\" dir=\"rtl\">\n<head>"));
    assert_eq!(page.matches("class=\"book-card\"").count(), 3);
}
