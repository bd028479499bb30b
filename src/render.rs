//! HTML generation for the gallery page.
//!
//! One document per request: heading, a summary line, a pager strip, the
//! thumbnail grid, and a second pager strip below the grid so long pages
//! can be navigated from either end. Thumbnails are rendered as src-less
//! placeholders carrying `data-src`; the embedded script swaps the real
//! source in as each image nears the viewport.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping, which
//! matters here because filenames are attacker-ish input: the generation
//! pipeline writes them, but nothing stops a user from dropping an oddly
//! named file into the output directory.
//!
//! CSS and the lazy-loading script are embedded at compile time from
//! `static/`, so the served page is fully self-contained.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::page::PageView;

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

/// Renders the full gallery document for one page view.
pub fn gallery_page(view: &PageView) -> Markup {
    let pager = pager_strip(view.page, view.total_pages);

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Output Gallery" }
                style { (PreEscaped(CSS)) }
            }
            body {
                h1 { "Output Gallery" }
                div.meta {
                    "Total images: " (view.total)
                    " — Page " (view.page) " / " (view.total_pages)
                }
                div.pager { (pager) }
                @if view.files.is_empty() {
                    p.empty { "No images found." }
                } @else {
                    div.grid {
                        @for file in view.files {
                            a href=(file) target="_blank" rel="noopener" {
                                img.lazy data-src=(file) alt=(file);
                            }
                        }
                    }
                }
                div.pager { (pager) }
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the navigation strip for a page.
///
/// Prev when there is a previous page, numbered links for the window
/// `[page-2, page+2]` clamped to `[1, total_pages]` with the current page
/// as emphasized text, and Next when there is a following page. A gallery
/// that fits on one page gets an empty strip.
pub fn pager_strip(page: usize, total_pages: usize) -> Markup {
    if total_pages <= 1 {
        return html! {};
    }

    let window_start = page.saturating_sub(2).max(1);
    let window_end = (page + 2).min(total_pages);

    html! {
        @if page > 1 {
            a href={ "/?page=" ((page - 1)) } { "Prev" }
        }
        @for p in window_start..=window_end {
            @if p == page {
                strong { (p) }
            } @else {
                a href={ "/?page=" (p) } { (p) }
            }
        }
        @if page < total_pages {
            a href={ "/?page=" ((page + 1)) } { "Next" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::paginate;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn document_has_doctype_and_title() {
        let files = names(&["a.png"]);
        let html = gallery_page(&paginate(&files, 1, 64)).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Output Gallery</title>"));
    }

    #[test]
    fn summary_line_shows_totals() {
        let files = names(&["c.png", "b.png", "a.png"]);
        let html = gallery_page(&paginate(&files, 1, 2)).into_string();
        assert!(html.contains("Total images: 3"));
        assert!(html.contains("Page 1 / 2"));
    }

    #[test]
    fn grid_preserves_listing_order() {
        let files = names(&["c.png", "b.png", "a.png"]);
        let html = gallery_page(&paginate(&files, 1, 64)).into_string();

        let c = html.find("data-src=\"c.png\"").unwrap();
        let b = html.find("data-src=\"b.png\"").unwrap();
        let a = html.find("data-src=\"a.png\"").unwrap();
        assert!(c < b && b < a);
    }

    #[test]
    fn thumbnails_are_lazy_placeholders() {
        let files = names(&["a.png"]);
        let html = gallery_page(&paginate(&files, 1, 64)).into_string();

        assert!(html.contains(r#"<img class="lazy" data-src="a.png" alt="a.png">"#));
        assert!(html.contains(r#"href="a.png""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains("IntersectionObserver"));
    }

    #[test]
    fn empty_listing_renders_placeholder() {
        let files: Vec<String> = Vec::new();
        let html = gallery_page(&paginate(&files, 1, 64)).into_string();

        assert!(html.contains("No images found."));
        assert!(!html.contains("class=\"grid\""));
    }

    #[test]
    fn pager_rendered_above_and_below_grid() {
        let files = names(&["c.png", "b.png", "a.png"]);
        let html = gallery_page(&paginate(&files, 1, 2)).into_string();
        assert_eq!(html.matches(r#"<div class="pager">"#).count(), 2);
    }

    #[test]
    fn filenames_are_escaped() {
        let files = names(&["<script>alert('x')</script>.png"]);
        let html = gallery_page(&paginate(&files, 1, 64)).into_string();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // =========================================================================
    // Pager strip tests
    // =========================================================================

    #[test]
    fn single_page_strip_is_empty() {
        assert_eq!(pager_strip(1, 1).into_string(), "");
    }

    #[test]
    fn first_page_has_next_but_no_prev() {
        let strip = pager_strip(1, 5).into_string();
        assert!(!strip.contains("Prev"));
        assert!(strip.contains("Next"));
        assert!(strip.contains(r#"href="/?page=2""#));
    }

    #[test]
    fn last_page_has_prev_but_no_next() {
        let strip = pager_strip(5, 5).into_string();
        assert!(strip.contains("Prev"));
        assert!(!strip.contains("Next"));
        assert!(strip.contains(r#"href="/?page=4""#));
    }

    #[test]
    fn current_page_is_emphasized_not_linked() {
        let strip = pager_strip(3, 5).into_string();
        assert!(strip.contains("<strong>3</strong>"));
        assert!(!strip.contains(r#"href="/?page=3""#));
    }

    #[test]
    fn window_spans_two_pages_each_side() {
        let strip = pager_strip(5, 9).into_string();
        for p in 3..=7 {
            assert!(strip.contains(&format!(">{p}<")), "missing page {p}");
        }
        assert!(!strip.contains(r#"href="/?page=2""#));
        assert!(!strip.contains(r#"href="/?page=8""#));
    }

    #[test]
    fn window_clamps_at_edges() {
        let strip = pager_strip(1, 9).into_string();
        assert!(strip.contains("<strong>1</strong>"));
        assert!(strip.contains(r#"href="/?page=3""#));
        assert!(!strip.contains(r#"href="/?page=0""#));

        let strip = pager_strip(9, 9).into_string();
        assert!(strip.contains("<strong>9</strong>"));
        assert!(strip.contains(r#"href="/?page=7""#));
        assert!(!strip.contains(r#"href="/?page=10""#));
    }
}
