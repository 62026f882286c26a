// tests/unit_graph.rs
//! Generator and connectivity behavior through the public API.

use coverlab_core::error::CoverlabError;
use coverlab_core::graph::{
    barabasi_albert, connected_multigraph, connected_simple, connection_counts,
    generate_connected, gnm_random, watts_strogatz, FamilySpec, Graph, GraphFamily,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn test_connectivity_basics() {
    assert!(!Graph::new(0).is_connected());
    assert!(Graph::new(1).is_connected());
    assert!(!Graph::new(2).is_connected());
    assert!(Graph::complete(5).is_connected());
}

#[test]
fn test_gnm_saturates_to_complete() {
    let g = gnm_random(6, 100, &mut rng(1));
    assert_eq!(g.edge_count(), 15);
    assert_eq!(g, Graph::complete(6));
}

#[test]
fn test_small_world_keeps_edge_count() {
    let g = watts_strogatz(20, 4, 0.1, &mut rng(2)).unwrap();
    assert_eq!(g.edge_count(), 40);
    for &(u, v) in g.edges() {
        assert_ne!(u, v);
    }
}

#[test]
fn test_small_world_rejects_large_k() {
    assert!(matches!(
        watts_strogatz(5, 6, 0.1, &mut rng(3)),
        Err(CoverlabError::InvalidParameter(_))
    ));
}

#[test]
fn test_scale_free_edge_count() {
    // star seed with m edges, then m edges per added node
    let g = barabasi_albert(30, 2, &mut rng(4)).unwrap();
    assert_eq!(g.edge_count(), 2 + 2 * (30 - 3));
    assert!(g.is_connected());
    assert!(barabasi_albert(3, 3, &mut rng(4)).is_err());
}

#[test]
fn test_spanning_tree_generators_are_connected() {
    for seed in 0..20 {
        let s = connected_simple(12, 20, &mut rng(seed));
        assert!(s.is_connected());
        assert_eq!(s.edge_count(), 20);

        let m = connected_multigraph(12, 30, &mut rng(seed)).unwrap();
        assert!(m.is_connected());
        assert_eq!(m.edge_count(), 30);
    }
}

#[test]
fn test_connected_simple_caps_at_complete() {
    let g = connected_simple(5, 50, &mut rng(5));
    assert_eq!(g.edge_count(), 10);
}

#[test]
fn test_connection_counts_table() {
    assert_eq!(connection_counts(5), vec![4, 8, 10, 15]);
    assert_eq!(connection_counts(10), vec![9, 15, 20, 30]);
}

#[test]
fn test_family_spec_parameters() {
    let spec = FamilySpec::new(GraphFamily::SmallWorld, 40, 60);
    assert_eq!(spec.lattice_degree(), 3);
    assert_eq!(spec.attachment(), 1);
    let spec = FamilySpec::new(GraphFamily::ScaleFree, 10, 40);
    assert_eq!(spec.attachment(), 4);
}

#[test]
fn test_generate_connected_gives_up() {
    // Three nodes and one edge can never be connected.
    let spec = FamilySpec::new(GraphFamily::Random, 3, 1);
    let err = generate_connected(&spec, 5, &mut rng(6)).unwrap_err();
    assert!(matches!(
        err,
        CoverlabError::GenerationExhausted { attempts: 5, .. }
    ));
}
