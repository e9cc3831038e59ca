//! Benchmarks for markup insertion on the text buffer
//!
//! Run with: cargo bench markup_operations

use postedit::editable::{Selection, TextBuffer};
use postedit::markup::{apply_block, apply_wrap};
use postedit::messages::{EditorMsg, Msg};
use postedit::model::EditorSurface;
use postedit::toolbar::{ToolbarAction, UNORDERED_LIST_BLOCK};
use postedit::update::update;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn post_text(paragraphs: usize) -> String {
    "<p>The quick brown fox jumps over the lazy dog.</p>\n\n".repeat(paragraphs)
}

fn buffer_with_selection(paragraphs: usize) -> TextBuffer {
    let mut buffer = TextBuffer::from_text(&post_text(paragraphs));
    let middle = buffer.len_chars() / 2;
    buffer.set_selection(middle, middle + 20);
    buffer
}

// ============================================================================
// Markup operations
// ============================================================================

#[divan::bench(args = [10, 1_000, 10_000])]
fn wrap_selection(bencher: divan::Bencher, paragraphs: usize) {
    let buffer = buffer_with_selection(paragraphs);
    bencher.bench_local(|| {
        apply_wrap(
            divan::black_box(&buffer),
            "<strong>",
            "</strong>",
            "bold text",
        )
    });
}

#[divan::bench(args = [10, 1_000, 10_000])]
fn insert_block(bencher: divan::Bencher, paragraphs: usize) {
    let buffer = buffer_with_selection(paragraphs);
    bencher.bench_local(|| apply_block(divan::black_box(&buffer), UNORDERED_LIST_BLOCK));
}

#[divan::bench(args = [10, 1_000, 10_000])]
fn selected_text(bencher: divan::Bencher, paragraphs: usize) {
    let buffer = buffer_with_selection(paragraphs);
    bencher.bench_local(|| divan::black_box(&buffer).selected_text());
}

// ============================================================================
// Full update path
// ============================================================================

#[divan::bench(args = [10, 1_000])]
fn toolbar_bold_via_update(bencher: divan::Bencher, paragraphs: usize) {
    let text = post_text(paragraphs);
    bencher
        .with_inputs(|| {
            let mut surface = EditorSurface::with_text(&text);
            let middle = surface.buffer.len_chars() / 2;
            surface.buffer.set_selection(middle, middle + 20);
            surface
        })
        .bench_local_values(|mut surface| {
            update(&mut surface, Msg::Toolbar(ToolbarAction::Bold));
            surface
        });
}

#[divan::bench(args = [10, 1_000])]
fn keystroke_input(bencher: divan::Bencher, paragraphs: usize) {
    let text = post_text(paragraphs);
    let typed = format!("{}x", text);
    let end = typed.chars().count();
    bencher
        .with_inputs(|| EditorSurface::with_text(&text))
        .bench_local_values(|mut surface| {
            update(
                &mut surface,
                Msg::Editor(EditorMsg::Input {
                    text: typed.clone(),
                    selection: Selection::collapsed(end),
                }),
            );
            surface
        });
}
