//! Pointer Tilt and Selection Tests

use timeline_core::{Cursor, Point, Rect, SelectionOutcome, Side, TimelineEvent, Transform};
use timeline_testkit::{installed_timeline, MockDocumentBuilder};

const ACTIVE: &str = "timeline-active";

mod tilt_tests {
    use super::*;

    #[test]
    fn test_enter_installs_transition_and_cursor() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(1));
        let card = doc.card(0);

        timeline.dispatch(TimelineEvent::PointerEnter { card });

        let state = doc.node(card);
        assert_eq!(
            state.transition.unwrap().to_css(),
            "transform 0.3s ease, box-shadow 0.3s ease"
        );
        assert_eq!(state.cursor, Some(Cursor::Pointer));
        assert_eq!(state.transform, None);
    }

    #[test]
    fn test_move_applies_tilt() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(1));
        let card = doc.card(0);
        doc.set_rect(card, Rect::new(0.0, 0.0, 200.0, 100.0));

        timeline.dispatch(TimelineEvent::PointerMove {
            card,
            client: Point::new(150.0, 25.0),
        });

        match doc.transform(card) {
            Some(Transform::Tilt(tilt)) => {
                assert_eq!(tilt.rotate_x, -1.25);
                assert_eq!(tilt.rotate_y, -2.5);
            }
            other => panic!("expected tilt, got {other:?}"),
        }
        assert_eq!(
            doc.transform(card).unwrap().to_css(),
            "translateY(-5px) perspective(1000px) rotateX(-1.25deg) rotateY(-2.5deg) scale(1.02)"
        );
    }

    #[test]
    fn test_moves_do_not_accumulate() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(1));
        let card = doc.card(0);
        doc.set_rect(card, Rect::new(100.0, 100.0, 200.0, 100.0));

        for x in [110.0, 290.0, 150.0] {
            timeline.tilt().on_move(card, Point::new(x, 120.0));
        }
        let tilt = timeline.tilt().on_move(card, Point::new(200.0, 150.0)).unwrap();

        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(tilt.rotate_y, 0.0);
    }

    #[test]
    fn test_leave_clears_transform() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(1));
        let card = doc.card(0);

        timeline.dispatch(TimelineEvent::PointerEnter { card });
        timeline.dispatch(TimelineEvent::PointerMove {
            card,
            client: Point::new(10.0, 10.0),
        });
        assert!(doc.transform(card).is_some());

        timeline.dispatch(TimelineEvent::PointerLeave { card });
        assert_eq!(doc.transform(card), None);
    }

    #[test]
    fn test_non_card_is_ignored() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(1));
        let element = doc.items()[0].element;

        assert!(timeline.tilt().on_move(element, Point::new(1.0, 1.0)).is_none());
        // Still the reveal offset, untouched by the tilt controller
        assert_eq!(doc.transform(element), Some(Transform::TranslateX(-50.0)));
    }
}

mod selection_tests {
    use super::*;

    fn active_cards(doc: &timeline_testkit::MockDocument) -> Vec<timeline_core::NodeId> {
        doc.nodes_with_class(ACTIVE)
    }

    #[test]
    fn test_cards_are_clickable_after_install() {
        let (doc, _timeline) = installed_timeline(MockDocumentBuilder::new().alternating(3));
        for i in 0..3 {
            assert_eq!(doc.node(doc.card(i)).cursor, Some(Cursor::Pointer));
        }
    }

    #[test]
    fn test_click_activates_and_centers() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(2));
        let a = doc.card(0);

        assert_eq!(timeline.selection().on_click(a), SelectionOutcome::Activated(a));
        assert_eq!(active_cards(&doc), vec![a]);
        assert_eq!(doc.scroll_requests(), vec![a]);
        assert_eq!(timeline.selection().active(), Some(a));
    }

    #[test]
    fn test_second_click_deactivates_without_scroll() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(2));
        let a = doc.card(0);

        timeline.dispatch(TimelineEvent::Click { card: a });
        assert_eq!(timeline.selection().on_click(a), SelectionOutcome::Deactivated(a));

        assert!(active_cards(&doc).is_empty());
        assert_eq!(doc.scroll_requests(), vec![a]);
        assert_eq!(timeline.selection().active(), None);
    }

    #[test]
    fn test_click_sequence_a_a_b() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(2));
        let a = doc.card(0);
        let b = doc.card(1);

        for card in [a, a, b] {
            timeline.dispatch(TimelineEvent::Click { card });
        }

        assert_eq!(active_cards(&doc), vec![b]);
        assert_eq!(doc.scroll_requests(), vec![a, b]);
        assert_eq!(timeline.snapshot().active_card, Some(b));
    }

    #[test]
    fn test_switching_moves_the_marker() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(2));
        let a = doc.card(0);
        let b = doc.card(1);

        timeline.dispatch(TimelineEvent::Click { card: a });
        timeline.dispatch(TimelineEvent::Click { card: b });

        assert_eq!(active_cards(&doc), vec![b]);
    }

    #[test]
    fn test_click_restores_exclusivity() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(3));
        let (a, b, c) = (doc.card(0), doc.card(1), doc.card(2));
        doc.force_class(a, ACTIVE);
        doc.force_class(b, ACTIVE);

        timeline.dispatch(TimelineEvent::Click { card: c });
        assert_eq!(active_cards(&doc), vec![c]);
    }

    #[test]
    fn test_at_most_one_active_over_any_sequence() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().alternating(4));
        let cards: Vec<_> = (0..4).map(|i| doc.card(i)).collect();

        for step in 0..40usize {
            let card = cards[(step * 7 + step / 3) % cards.len()];
            timeline.dispatch(TimelineEvent::Click { card });
            assert!(active_cards(&doc).len() <= 1);
        }
    }

    #[test]
    fn test_click_on_non_card_is_ignored() {
        let (doc, timeline) = installed_timeline(MockDocumentBuilder::new().item(Side::Left));
        let element = doc.items()[0].element;

        assert_eq!(timeline.selection().on_click(element), SelectionOutcome::Ignored);
        assert!(doc.scroll_requests().is_empty());
        assert!(active_cards(&doc).is_empty());
    }
}
