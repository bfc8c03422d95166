//! Resilient image view widget.
//!
//! Projects an [`ImageViewModel`] onto the terminal: skeleton while
//! loading, the image protocol once resolved, and a visible broken-state
//! treatment on terminal failure so the layout never collapses into a gap.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, StatefulWidget, Widget},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

use crate::infrastructure::config::SkeletonVariant;
use crate::presentation::view_model::ImageViewModel;

use super::skeleton::SkeletonWidget;

/// Widget rendering one resilient image with its alt-text caption.
///
/// The caption belongs to the image (it is drawn in every phase, like alt
/// text on an image element); the skeleton itself stays decorative.
#[derive(Debug)]
pub struct ImageView<'a> {
    model: &'a ImageViewModel,
    variant: SkeletonVariant,
    show_alt: bool,
    tick: u64,
    now: Instant,
}

impl<'a> ImageView<'a> {
    /// Creates a view over the given model.
    #[must_use]
    pub fn new(model: &'a ImageViewModel, variant: SkeletonVariant) -> Self {
        Self {
            model,
            variant,
            show_alt: true,
            tick: 0,
            now: Instant::now(),
        }
    }

    /// Enables or disables the alt-text caption row.
    #[must_use]
    pub const fn show_alt(mut self, show: bool) -> Self {
        self.show_alt = show;
        self
    }

    /// Sets the frame tick driving the shimmer.
    #[must_use]
    pub const fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// Sets the frame timestamp used for the cross-fade.
    #[must_use]
    pub const fn at(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }

    fn split_caption(&self, area: Rect) -> (Rect, Option<Rect>) {
        if !self.show_alt || self.model.alt().is_empty() || area.height < 2 {
            return (area, None);
        }
        let caption = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let image = Rect::new(area.x, area.y, area.width, area.height - 1);
        (image, Some(caption))
    }

    fn render_broken(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::Red);
        let block = Block::bordered().border_style(style);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(Span::styled("✗ image unavailable", style))];
        if let Some(url) = self.model.active_url() {
            lines.push(Line::from(Span::styled(
                url.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        Paragraph::new(lines).centered().render(inner, buf);
    }
}

impl StatefulWidget for ImageView<'_> {
    type State = Option<StatefulProtocol>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }

        let (image_area, caption_area) = self.split_caption(area);

        if self.model.placeholder_visible() {
            SkeletonWidget::new(self.variant)
                .animated(!self.model.motion().is_reduced())
                .tick(self.tick)
                .render(image_area, buf);
        } else if self.model.is_broken() {
            self.render_broken(image_area, buf);
        } else if self.model.image_opacity(self.now) > 0.0 {
            // Terminal cells cannot alpha-blend; the first nonzero opacity
            // frame reveals the image and the ramp governs only timing.
            if let Some(protocol) = state.as_mut() {
                StatefulImage::default()
                    .resize(Resize::Fit(None))
                    .render(image_area, buf, protocol);
            }
        }

        if let Some(caption_area) = caption_area {
            let caption = Line::from(Span::styled(
                self.model.alt().to_string(),
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            ));
            Paragraph::new(caption).render(caption_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use ratatui_image::picker::Picker;

    use super::*;
    use crate::application::events::LoadEvent;
    use crate::domain::entities::{MotionPreference, SourceKind};

    fn model(alt: &str) -> ImageViewModel {
        ImageViewModel::new(
            alt,
            true,
            MotionPreference::Reduced,
            Duration::from_millis(300),
            false,
        )
    }

    fn render(view: ImageView<'_>, state: &mut Option<StatefulProtocol>) -> Buffer {
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf, state);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol())
            .collect()
    }

    fn buffer_text(buf: &Buffer) -> String {
        (0..buf.area.height).map(|y| row_text(buf, y)).collect()
    }

    #[test]
    fn test_loading_shows_skeleton_and_caption() {
        let model = model("Hero banner");
        let buf = render(ImageView::new(&model, SkeletonVariant::Rectangular), &mut None);

        assert!(row_text(&buf, 0).contains('░'));
        assert!(row_text(&buf, 5).contains("Hero banner"));
    }

    #[test]
    fn test_skeleton_carries_no_alt_text() {
        let model = model("Hero banner");
        let buf = render(ImageView::new(&model, SkeletonVariant::Rectangular), &mut None);

        for y in 0..5 {
            assert!(!row_text(&buf, y).contains("Hero"));
        }
    }

    #[test]
    fn test_broken_state_is_visible() {
        let mut model = model("Hero banner");
        model.on_event(
            &LoadEvent::AttemptStarted {
                kind: SourceKind::Primary,
                url: "/img/a.png".to_string(),
            },
            Instant::now(),
        );
        model.on_event(&LoadEvent::Failed, Instant::now());

        let buf = render(ImageView::new(&model, SkeletonVariant::Rectangular), &mut None);
        let text = buffer_text(&buf);
        assert!(text.contains("image unavailable"));
        assert!(text.contains("/img/a.png"));
        assert!(text.contains("Hero banner"));
    }

    #[test]
    fn test_success_renders_image_cells() {
        let mut model = model("");
        let image = Arc::new(image::DynamicImage::new_rgb8(8, 8));
        model.on_event(
            &LoadEvent::Loaded {
                kind: SourceKind::Primary,
                url: "/img/a.png".to_string(),
                image: image.clone(),
            },
            Instant::now(),
        );

        let picker = Picker::halfblocks();
        let mut state = Some(picker.new_resize_protocol((*image).clone()));
        let buf = render(ImageView::new(&model, SkeletonVariant::Rectangular), &mut state);

        // No skeleton and no broken treatment once resolved.
        let text = buffer_text(&buf);
        assert!(!text.contains('░'));
        assert!(!text.contains("image unavailable"));
    }

    #[test]
    fn test_no_caption_without_alt() {
        let model = model("");
        let buf = render(ImageView::new(&model, SkeletonVariant::Rectangular), &mut None);
        // Last row belongs to the skeleton when there is no caption.
        assert!(row_text(&buf, 5).contains('░'));
    }
}
