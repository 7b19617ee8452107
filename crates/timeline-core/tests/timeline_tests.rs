//! Installation, Progress and Absence-Tolerance Tests

use std::rc::Rc;

use timeline_core::{
    Rect, Side, Timeline, TimelineConfig, TimelineError, TimelineEvent, VisibilityEntry,
};
use timeline_testkit::{init_test_tracing, installed_timeline, MockDocumentBuilder};

const PROGRESS: &str = "--timeline-progress";

mod install_tests {
    use super::*;

    #[test]
    fn test_no_items_is_a_no_op() {
        init_test_tracing();
        let doc = MockDocumentBuilder::new()
            .container(Rect::new(0.0, 0.0, 600.0, 1000.0))
            .build();

        let timeline = Timeline::install(Rc::clone(&doc), TimelineConfig::default()).unwrap();
        assert!(timeline.is_none());
        assert_eq!(doc.custom_property(doc.container().unwrap(), PROGRESS), None);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        init_test_tracing();
        let doc = MockDocumentBuilder::new().alternating(2).build();
        let mut config = TimelineConfig::default();
        config.reveal.threshold = -0.1;

        let result = Timeline::install(Rc::clone(&doc), config);
        assert!(matches!(result, Err(TimelineError::InvalidConfig { .. })));
        // Nothing was touched
        assert_eq!(doc.opacity(doc.items()[0].element), None);
    }

    #[test]
    fn test_snapshot_after_install() {
        let (_doc, timeline) = installed_timeline(
            MockDocumentBuilder::new()
                .item(Side::Left)
                .item_without_card(Side::Right)
                .item(Side::Left),
        );

        let snapshot = timeline.snapshot();
        assert_eq!(snapshot.items, 3);
        assert_eq!(snapshot.pending, 3);
        assert_eq!(snapshot.revealed, 0);
        assert_eq!(snapshot.active_card, None);
        assert_eq!(snapshot.progress, None);
        assert_eq!(timeline.cards().len(), 2);
        assert_eq!(timeline.container(), None);
    }

    #[test]
    fn test_observer_options() {
        let (_doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(1));
        let options = timeline.observer_options();
        assert_eq!(options.threshold, 0.15);
        assert_eq!(options.root_margin, "0px 0px -100px 0px");
    }

    #[test]
    fn test_host_write_failures_are_tolerated() {
        let (doc, timeline) = installed_timeline(
            MockDocumentBuilder::new()
                .alternating(2)
                .container(Rect::new(0.0, 0.0, 600.0, 1000.0)),
        );
        doc.fail_writes(true);

        let a = doc.items()[0].element;
        timeline.dispatch(TimelineEvent::Visibility(vec![VisibilityEntry::visible(a)]));
        timeline.dispatch(TimelineEvent::Click { card: doc.card(1) });
        timeline.dispatch(TimelineEvent::Scroll);
        doc.run_all_timers();

        // State machines still advance even though the host refused the writes
        let snapshot = timeline.snapshot();
        assert_eq!(snapshot.revealed, 1);
        assert_eq!(snapshot.active_card, Some(doc.card(1)));
        assert_eq!(snapshot.progress, Some(80.0));
        assert_eq!(doc.opacity(a), Some(0.0));
    }
}

mod progress_tests {
    use super::*;

    fn timeline_with_container(
        rect: Rect,
    ) -> (Rc<timeline_testkit::MockDocument>, Timeline<timeline_testkit::MockDocument>) {
        installed_timeline(MockDocumentBuilder::new().alternating(2).container(rect))
    }

    #[test]
    fn test_publishes_visible_percentage() {
        let (doc, timeline) = timeline_with_container(Rect::new(0.0, 0.0, 600.0, 1000.0));
        let container = doc.container().unwrap();

        timeline.dispatch(TimelineEvent::Scroll);

        assert_eq!(doc.custom_property(container, PROGRESS).as_deref(), Some("80%"));
        assert_eq!(timeline.snapshot().progress, Some(80.0));
    }

    #[test]
    fn test_scrolled_past_top_is_full() {
        let (doc, timeline) = timeline_with_container(Rect::new(0.0, -300.0, 600.0, 1000.0));
        let container = doc.container().unwrap();

        timeline.dispatch(TimelineEvent::Scroll);
        assert_eq!(doc.custom_property(container, PROGRESS).as_deref(), Some("100%"));
    }

    #[test]
    fn test_recomputes_on_every_scroll() {
        let (doc, timeline) = timeline_with_container(Rect::new(0.0, 600.0, 600.0, 1000.0));
        let container = doc.container().unwrap();

        timeline.dispatch(TimelineEvent::Scroll);
        assert_eq!(doc.custom_property(container, PROGRESS).as_deref(), Some("20%"));

        doc.set_rect(container, Rect::new(0.0, 200.0, 600.0, 1000.0));
        timeline.dispatch(TimelineEvent::Scroll);
        assert_eq!(doc.custom_property(container, PROGRESS).as_deref(), Some("60%"));

        doc.set_viewport_height(1000.0);
        timeline.dispatch(TimelineEvent::Scroll);
        assert_eq!(doc.custom_property(container, PROGRESS).as_deref(), Some("80%"));
    }

    #[test]
    fn test_off_screen_keeps_last_value() {
        let (doc, timeline) = timeline_with_container(Rect::new(0.0, 0.0, 600.0, 1000.0));
        let container = doc.container().unwrap();

        timeline.dispatch(TimelineEvent::Scroll);
        doc.set_rect(container, Rect::new(0.0, -1200.0, 600.0, 1000.0));

        assert_eq!(timeline.progress().unwrap().on_scroll(), None);
        assert_eq!(doc.custom_property(container, PROGRESS).as_deref(), Some("80%"));
        assert_eq!(timeline.snapshot().progress, Some(80.0));
    }

    #[test]
    fn test_nothing_published_before_first_intersection() {
        let (doc, timeline) = timeline_with_container(Rect::new(0.0, 900.0, 600.0, 1000.0));

        timeline.dispatch(TimelineEvent::Scroll);
        assert_eq!(doc.custom_property(doc.container().unwrap(), PROGRESS), None);
        assert_eq!(timeline.snapshot().progress, None);
    }

    #[test]
    fn test_missing_container_disables_tracking() {
        let (_doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(2));

        assert!(timeline.progress().is_none());
        timeline.dispatch(TimelineEvent::Scroll);
        assert_eq!(timeline.snapshot().progress, None);
    }
}
