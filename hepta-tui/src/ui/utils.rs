use ratatui::layout::Rect;

/// A centered rect of the given width/height, clamped to the frame.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render a cursor into an input line: `before█after`, or a bare block when
/// the input is empty.
pub fn input_with_cursor(before: &str, after: &str, focused: bool) -> String {
    if !focused {
        return format!("{}{}", before, after);
    }
    format!("{}█{}", before, after)
}
