// TUI widget modules for each dashboard panel.

pub mod popularity;
pub mod standings;
pub mod status_bar;
pub mod summary;
pub mod teams;

/// Drop the first `scroll` items, but always leave the last one visible.
pub fn scrolled<T>(items: Vec<T>, scroll: usize) -> Vec<T> {
    let start = scroll.min(items.len().saturating_sub(1));
    items.into_iter().skip(start).collect()
}
