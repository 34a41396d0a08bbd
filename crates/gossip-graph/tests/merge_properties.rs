//! Extraction + merge integration tests

use gossip_core::{RelationKind, RelationTriple};
use gossip_extractor::extract;
use gossip_graph::{merge, DotExporter, RelationGraph};
use proptest::prelude::*;

fn arb_kind() -> impl Strategy<Value = RelationKind> {
    prop::sample::select(RelationKind::ALL.to_vec())
}

fn pair_triples(kinds: &[RelationKind]) -> Vec<RelationTriple> {
    kinds
        .iter()
        .map(|k| RelationTriple::new("A", "B", *k).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn dominant_kind_is_order_independent(
        (kinds, shuffled) in prop::collection::vec(arb_kind(), 1..12)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let original = merge(pair_triples(&kinds));
        let permuted = merge(pair_triples(&shuffled));

        let a = original.edge("A", "B").unwrap();
        let b = permuted.edge("A", "B").unwrap();
        prop_assert_eq!(a.dominant(), b.dominant());

        let best = kinds.iter().min_by_key(|k| k.rank()).copied().unwrap();
        prop_assert_eq!(a.dominant(), best);
    }

    #[test]
    fn observed_kinds_are_distinct(kinds in prop::collection::vec(arb_kind(), 1..20)) {
        let graph = merge(pair_triples(&kinds));
        let edge = graph.edge("A", "B").unwrap();

        let mut seen = edge.kinds().to_vec();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), edge.kinds().len());
        prop_assert!(kinds.iter().all(|k| edge.contains(*k)));
        prop_assert_eq!(edge.kinds()[0], kinds[0]);
    }

    #[test]
    fn forward_triples_never_touch_reverse_edge(kinds in prop::collection::vec(arb_kind(), 1..8)) {
        let graph = merge(pair_triples(&kinds));
        prop_assert!(graph.edge("B", "A").is_none());
        prop_assert_eq!(graph.edge_count(), 1);
        prop_assert_eq!(graph.entity_count(), 2);
    }
}

#[test]
fn english_pipeline() {
    let graph = merge(extract("A loves B. B betrayed C."));

    assert_eq!(graph.entities().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    assert_eq!(graph.edge("A", "B").unwrap().dominant(), RelationKind::Love);
    assert_eq!(graph.edge("B", "C").unwrap().dominant(), RelationKind::Betray);
}

#[test]
fn chinese_pipeline_keeps_pairs_apart() {
    let graph = merge(extract("甄嬛爱上了果郡王. 雍正喜欢甄嬛."));

    assert_eq!(graph.edge_count(), 2);
    assert!(graph.edge("甄嬛", "果郡王").is_some());
    assert!(graph.edge("雍正", "甄嬛").is_some());
    assert!(graph.edge("甄嬛", "雍正").is_none());
}

#[test]
fn repeated_mentions_merge_with_betray_dominant() {
    let graph = merge(extract("A betrayed B. A is jealous of B."));

    let edge = graph.edge("A", "B").unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert!(edge.contains(RelationKind::Betray));
    assert!(edge.contains(RelationKind::Rival));
    assert_eq!(edge.kinds().len(), 2);
    assert_eq!(edge.dominant(), RelationKind::Betray);
}

#[test]
fn self_relation_leaves_graph_empty() {
    let graph: RelationGraph = extract("A loves A.").into_iter().collect();
    assert!(graph.is_empty());
}

#[test]
fn demo_passage_dot() {
    let text = "ZhenHuan loves King GuoJun. YongZheng loves ZhenHuan. \
                ZhenHuan is together with YongZheng. YongZheng is jealous of ZhenHuan.";
    let graph = merge(extract(text));

    let edge = graph.edge("YongZheng", "ZhenHuan").unwrap();
    assert_eq!(edge.label("|"), "love|rival");
    assert_eq!(edge.dominant(), RelationKind::Rival);

    let dot = DotExporter::new().to_dot_string(&graph);
    assert!(dot.contains("label=\"King GuoJun\""));
    assert!(dot.contains("label=\"love|rival\" color=\"#3949ab\""));
}
