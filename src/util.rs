use crate::consts;
use ratatui::layout::{Flex, Layout, Rect, Size};

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a rectangle of the given size (or smaller, if `area` is too small)
/// centered within `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Shorten a player ID (typically a long wallet address) to at most `width`
/// characters by eliding its middle
pub(crate) fn abbreviate(id: &str, width: usize) -> String {
    let len = id.chars().count();
    if len <= width || width < 3 {
        return id.chars().take(width.max(1)).collect();
    }
    let tail = (width - 1) / 3;
    let head = width - 1 - tail;
    let mut s = id.chars().take(head).collect::<String>();
    s.push('…');
    s.extend(id.chars().skip(len - tail));
    s
}
