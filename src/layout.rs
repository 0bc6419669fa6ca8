//! Split-pane layout state for the chat column and the document viewer.

/// Neither pane may be dragged narrower than this.
pub const MIN_PANE_PX: f64 = 300.0;

const DEFAULT_SPLIT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// Chat column width in percent of the container.
    pub chat_pct: f64,
    /// Viewer column width in percent of the container.
    pub viewer_pct: f64,
    /// False once the close animation has finished and the pane is removed.
    pub visible: bool,
    /// Divider position from the last successful drag, restored on reopen.
    pub custom_split: Option<f64>,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            chat_pct: 100.0,
            viewer_pct: 0.0,
            visible: false,
            custom_split: None,
        }
    }
}

impl PanelLayout {
    pub fn new() -> Self {
        Self::default()
    }

    // show the viewer at the remembered split, or an even split
    pub fn open(&mut self) {
        let chat = self.custom_split.unwrap_or(DEFAULT_SPLIT);
        self.chat_pct = chat;
        self.viewer_pct = 100.0 - chat;
        self.visible = true;
    }

    /// First half of closing: widths return to full chat while the pane is
    /// still mounted, so the width transition can play out.
    pub fn begin_close(&mut self) {
        self.chat_pct = 100.0;
        self.viewer_pct = 0.0;
    }

    /// Second half of closing, run once the transition has finished.
    pub fn finish_close(&mut self) {
        self.chat_pct = 100.0;
        self.viewer_pct = 0.0;
        self.visible = false;
    }

    /// Move the divider to the pointer. Returns false (leaving the split
    /// untouched) when either pane would end up narrower than
    /// [`MIN_PANE_PX`]. A successful drag becomes the remembered split.
    pub fn drag(&mut self, pointer_x: f64, total_width: f64) -> bool {
        if !self.visible || total_width <= 0.0 {
            return false;
        }
        let viewer_px = total_width - pointer_x;
        if pointer_x < MIN_PANE_PX || viewer_px < MIN_PANE_PX {
            return false;
        }

        let chat = pointer_x / total_width * 100.0;
        self.chat_pct = chat;
        self.viewer_pct = 100.0 - chat;
        self.custom_split = Some(chat);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden_with_full_chat() {
        let layout = PanelLayout::new();
        assert!(!layout.visible);
        assert_eq!(layout.chat_pct, 100.0);
        assert_eq!(layout.viewer_pct, 0.0);
    }

    #[test]
    fn open_defaults_to_even_split() {
        let mut layout = PanelLayout::new();
        layout.open();
        assert!(layout.visible);
        assert_eq!(layout.chat_pct, 50.0);
        assert_eq!(layout.viewer_pct, 50.0);
    }

    #[test]
    fn close_runs_in_two_phases() {
        let mut layout = PanelLayout::new();
        layout.open();

        layout.begin_close();
        assert!(layout.visible, "pane stays mounted while animating");
        assert_eq!(layout.chat_pct, 100.0);
        assert_eq!(layout.viewer_pct, 0.0);

        layout.finish_close();
        assert!(!layout.visible);
        assert_eq!(layout.chat_pct, 100.0);
    }

    #[test]
    fn drag_moves_the_divider() {
        let mut layout = PanelLayout::new();
        layout.open();
        assert!(layout.drag(400.0, 1000.0));
        assert_eq!(layout.chat_pct, 40.0);
        assert_eq!(layout.viewer_pct, 60.0);
    }

    #[test]
    fn drag_below_minimum_width_is_a_no_op() {
        let mut layout = PanelLayout::new();
        layout.open();

        assert!(!layout.drag(200.0, 1000.0), "chat pane would be too narrow");
        assert_eq!(layout.chat_pct, 50.0);

        assert!(!layout.drag(800.0, 1000.0), "viewer pane would be too narrow");
        assert_eq!(layout.chat_pct, 50.0);
        assert_eq!(layout.custom_split, None);
    }

    #[test]
    fn drag_ignored_while_hidden() {
        let mut layout = PanelLayout::new();
        assert!(!layout.drag(400.0, 1000.0));
        assert_eq!(layout.chat_pct, 100.0);
    }

    #[test]
    fn reopen_restores_the_custom_split() {
        let mut layout = PanelLayout::new();
        layout.open();
        assert!(layout.drag(700.0, 1000.0));

        layout.begin_close();
        layout.finish_close();
        layout.open();
        assert_eq!(layout.chat_pct, 70.0);
        assert_eq!(layout.viewer_pct, 30.0);
    }

    #[test]
    fn narrow_containers_cannot_satisfy_both_minimums() {
        let mut layout = PanelLayout::new();
        layout.open();
        // 500px total cannot hold two 300px panes at any divider position
        for x in [0.0, 250.0, 499.0] {
            assert!(!layout.drag(x, 500.0));
        }
    }
}
